// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!              ForgeError (~24 bytes)
//!                     |
//!   +---------+-------+-------+---------+
//!   |    |    |    |    |    |    |    |
//!   v    v    v    v    v    v    v    v
//! Project Task  Sdk  Cycle Config Engine Io Other
//!  File   Box   Box  Box   Box    Box   Box Box<str>
//!
//! Sub-errors (unboxed internally):
//!   ProjectFile  MissingRequiredParameter, UnsupportedParameterType, ...
//!   Task         NotFound, ExecutionFailed, AmbiguousOutput
//!   Sdk          ResolverException, AllResolversFailed, FailOnUnresolved
//!   Cycle        cycle path + diagnostic code
//!   Config       ReadError, ParseError, MissingKey, InvalidValue
//!   Engine       UnknownConfiguration, Internal
//!
//! All variants boxed => ForgeError fits in ~24 bytes on the stack.
//! ```

use thiserror::Error;

/// Convenience alias for call sites that only need to propagate.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`ForgeError`] for call sites that pattern-match the taxonomy.
pub type ForgeResult<T> = std::result::Result<T, ForgeError>;

/// Top-level engine error type.
///
/// All sub-errors are boxed to keep this enum small on the stack, mirroring
/// the error taxonomy of §7: project-file errors, task failures, SDK
/// resolution failures, cycle detection, and engine-internal exceptions.
#[derive(Debug, Error)]
pub enum ForgeError {
    /// Ill-formed project data: missing required task parameters,
    /// unsupported parameter types, multi-item where one item required, etc.
    #[error("project file error: {0}")]
    ProjectFile(#[from] Box<ProjectFileError>),

    /// A task invocation failed (`Execute()` returned `false` or threw).
    #[error("task error: {0}")]
    Task(#[from] Box<TaskError>),

    /// SDK resolution failed.
    #[error("sdk resolution error: {0}")]
    Sdk(#[from] Box<SdkError>),

    /// A dependency cycle was detected among targets.
    #[error("cycle detected: {0}")]
    Cycle(#[from] Box<CycleError>),

    /// Ambient engine configuration error (settings, not build configuration).
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Engine-internal exception; the engine transitions to `Shutdown`.
    #[error("engine error: {0}")]
    Engine(#[from] Box<EngineError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

/// Create a fatal [`ForgeError::Other`] carrying a free-form message.
pub fn bail_out(message: impl Into<String>) -> ForgeError {
    ForgeError::Other(message.into().into_boxed_str())
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for ForgeError {
                fn from(err: $error) -> Self {
                    ForgeError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ProjectFileError => ProjectFile,
    TaskError => Task,
    SdkError => Sdk,
    CycleError => Cycle,
    ConfigError => Config,
    EngineError => Engine,
    std::io::Error => Io,
}

/// Stable diagnostic codes tests and callers assert on (§6).
pub mod codes {
    /// Engine-internal failure.
    pub const ENGINE_FAILURE: &str = "FE4018";
    /// Task not found in the factory registry.
    pub const TASK_NOT_FOUND: &str = "FE4036";
    /// Multiple SDK versions referenced for the same SDK name.
    pub const SDK_MULTIPLE_VERSIONS: &str = "FE4240";
    /// Resolved SDK version differs from the requested version.
    pub const SDK_VERSION_MISMATCH: &str = "FE4241";
}

// --- Project-file errors ---

/// Project-file errors (§7.1): fatal for the enclosing request.
#[derive(Debug, Error)]
pub enum ProjectFileError {
    /// A parameter declared `required` by the task was absent from the
    /// supplied parameter map.
    #[error("task '{task}' is missing required parameter '{parameter}'")]
    MissingRequiredParameter { task: String, parameter: String },

    /// A parameter type is not one of the recognized binder types.
    #[error("task '{task}' parameter '{parameter}' has unsupported type '{ty}'")]
    UnsupportedParameterType {
        task: String,
        parameter: String,
        ty: String,
    },

    /// An `ITaskItem`-scalar parameter's expression evaluated to more than
    /// one item.
    #[error("task '{task}' parameter '{parameter}' expects a single item but evaluated to {count}")]
    MultipleItemsForScalar {
        task: String,
        parameter: String,
        count: usize,
    },

    /// A declared task output references a parameter the task never declared.
    #[error("task '{task}' has no output parameter named '{parameter}'")]
    UnknownOutputParameter { task: String, parameter: String },

    /// `UsingTask` names an assembly that does not exist on disk.
    #[error("UsingTask assembly not found for task '{task}': {assembly_path}")]
    UsingTaskAssemblyNotFound { task: String, assembly_path: String },
}

// --- Task errors ---

/// Task execution errors (§7.2).
#[derive(Debug, Error)]
pub enum TaskError {
    /// No factory registration exists for the named task.
    #[error("task '{0}' not found")]
    NotFound(String),

    /// `Execute()` returned `false`.
    #[error("task '{name}' reported failure")]
    ExecutionFailed { name: String },

    /// `Execute()` threw; the underlying exception is carried verbatim.
    #[error("task '{name}' threw during execution: {message}")]
    Threw { name: String, message: String },
}

// --- SDK errors ---

/// SDK resolution errors (§7.4, §4.3).
#[derive(Debug, Error)]
pub enum SdkError {
    /// Exactly one resolver ran and it failed.
    #[error("resolver '{resolver}' failed to resolve sdk '{sdk}': {}", .errors.join("; "))]
    SingleResolverFailed {
        resolver: String,
        sdk: String,
        errors: Vec<String>,
    },

    /// More than one resolver ran and none succeeded.
    #[error("sdk '{sdk}' could not be resolved: {}", .errors.join("; "))]
    AllResolversFailed { sdk: String, errors: Vec<String> },

    /// A resolver raised an exception during resolution.
    #[error("resolver '{resolver}' threw while resolving sdk '{sdk}': {message}")]
    ResolverException {
        resolver: String,
        sdk: String,
        message: String,
    },

    /// `failOnUnresolvedSdk` was set and no resolver succeeded.
    #[error("sdk '{0}' failed to resolve and failOnUnresolvedSdk is set")]
    FailOnUnresolved(String),
}

// --- Cycle errors ---

/// Dependency cycle detected among targets (§7.5).
#[derive(Debug, Error)]
#[error("target dependency cycle: {}", .cycle.join(" <- "))]
pub struct CycleError {
    /// The full cycle, in traversal order, for a readable message.
    pub cycle: Vec<String>,
}

// --- Config errors (ambient engine settings, not build configuration) ---

/// Ambient engine-settings errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a settings file.
    #[error("failed to read settings file '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a settings file.
    #[error("failed to parse settings file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required settings key.
    #[error("missing required settings key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid settings value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Engine errors ---

/// Engine-internal errors (§7.6, §9 open question: typed rather than a panic).
#[derive(Debug, Error)]
pub enum EngineError {
    /// A build request or nested request named a configuration id the
    /// Config Cache has never assigned.
    #[error("unknown configuration id {0}")]
    UnknownConfiguration(u32),

    /// An internal invariant was violated; surfaced via `onEngineException`
    /// and transitions the engine to `Shutdown`.
    #[error("internal engine exception: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests;
