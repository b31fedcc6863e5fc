// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Reference, result, and resolver contract data types (§3, §4.3).

use std::collections::BTreeMap;

use crate::core::item::TaskItem;
use crate::core::request::SubmissionId;

/// `(name, referencedVersion?, minimumVersion?)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SdkReference {
    pub name: String,
    pub referenced_version: Option<String>,
    pub minimum_version: Option<String>,
}

impl SdkReference {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            referenced_version: None,
            minimum_version: None,
        }
    }

    #[must_use]
    pub fn with_referenced_version(mut self, version: impl Into<String>) -> Self {
        self.referenced_version = Some(version.into());
        self
    }

    #[must_use]
    pub fn with_minimum_version(mut self, version: impl Into<String>) -> Self {
        self.minimum_version = Some(version.into());
        self
    }
}

/// Two versions are the "same" iff both absent, both present and exactly
/// equal case-insensitively, or both present and equal case-insensitively
/// after dropping any patch component (§3).
#[must_use]
pub fn same_version(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => {
            if a.eq_ignore_ascii_case(b) {
                return true;
            }
            let major_minor = |s: &str| -> Vec<String> {
                s.split('.').take(2).map(str::to_ascii_lowercase).collect()
            };
            major_minor(a) == major_minor(b)
        }
        _ => false,
    }
}

/// Outcome of one resolver invocation, or the chain as a whole (§3).
#[derive(Debug, Clone)]
pub enum SdkResult {
    Failure {
        errors: Vec<String>,
        warnings: Vec<String>,
    },
    Success {
        primary_path: Option<String>,
        additional_paths: Vec<String>,
        version: Option<String>,
        properties: BTreeMap<String, String>,
        items: BTreeMap<String, Vec<TaskItem>>,
        environment_variables: BTreeMap<String, String>,
    },
}

impl SdkResult {
    #[must_use]
    pub fn success(primary_path: impl Into<String>) -> Self {
        Self::Success {
            primary_path: Some(primary_path.into()),
            additional_paths: Vec::new(),
            version: None,
            properties: BTreeMap::new(),
            items: BTreeMap::new(),
            environment_variables: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        if let Self::Success { version: slot, .. } = &mut self {
            *slot = Some(version.into());
        }
        self
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Per-invocation context handed to a resolver (§4.3 step 3).
#[derive(Debug, Clone, Default)]
pub struct ResolverContext {
    pub interactive: bool,
    pub running_in_ide: bool,
    /// Opaque resolver-owned state, restored from the submission's state
    /// map when `submission_id` is non-sentinel, preserved back afterward.
    pub state: Option<String>,
}

/// The full request to resolve one SDK reference (§4.3).
#[derive(Debug, Clone)]
pub struct SdkResolutionRequest {
    pub submission_id: SubmissionId,
    pub sdk: SdkReference,
    pub solution_path: Option<String>,
    pub project_path: Option<String>,
    pub interactive: bool,
    pub running_in_ide: bool,
    pub fail_on_unresolved: bool,
}

impl SdkResolutionRequest {
    #[must_use]
    pub const fn new(submission_id: SubmissionId, sdk: SdkReference) -> Self {
        Self {
            submission_id,
            sdk,
            solution_path: None,
            project_path: None,
            interactive: false,
            running_in_ide: false,
            fail_on_unresolved: false,
        }
    }
}

/// A registered resolver's priority-ordering metadata (§4.3 step 1-2).
///
/// A resolver with no `pattern` is "general" and fires after every
/// "specific" (pattern-bearing) resolver whose pattern matches the SDK name.
#[derive(Clone)]
pub struct ResolverManifest {
    pub display_name: String,
    pub load_path: Option<String>,
    pub pattern: Option<regex::Regex>,
}

impl std::fmt::Debug for ResolverManifest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverManifest")
            .field("display_name", &self.display_name)
            .field("load_path", &self.load_path)
            .field("pattern", &self.pattern.as_ref().map(regex::Regex::as_str))
            .finish()
    }
}

impl ResolverManifest {
    #[must_use]
    pub fn general(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            load_path: None,
            pattern: None,
        }
    }

    #[must_use]
    pub fn specific(display_name: impl Into<String>, pattern: regex::Regex) -> Self {
        Self {
            display_name: display_name.into(),
            load_path: None,
            pattern: Some(pattern),
        }
    }

    #[must_use]
    pub fn matches(&self, sdk_name: &str) -> bool {
        self.pattern.as_ref().is_none_or(|p| p.is_match(sdk_name))
    }

    #[must_use]
    pub const fn is_specific(&self) -> bool {
        self.pattern.is_some()
    }
}

/// One resolver implementation (§4.3 step 3). Invoked sequentially within a
/// chain; `Ok(None)` is the "returned null" no-opinion case.
pub trait SdkResolver: Send + Sync {
    fn name(&self) -> &str;

    /// # Errors
    ///
    /// Returns `Err` if the resolver raises an exception during resolution
    /// (§4.3 step 7); the message is carried verbatim into `SdkError::ResolverException`.
    fn resolve(
        &self,
        sdk: &SdkReference,
        context: &ResolverContext,
    ) -> Result<Option<SdkResult>, String>;
}
