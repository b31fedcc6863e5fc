// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! The uncached resolver chain (§4.3 steps 1-7).

use std::sync::Arc;

use crate::error::{ForgeResult, SdkError, codes};
use crate::logging::{EngineEvent, EventContext, LoggerSink};

use super::types::{ResolverManifest, SdkResolutionRequest, SdkResolver, SdkResult, same_version};

/// A resolver plus its priority-ordering manifest.
#[derive(Clone)]
pub struct ResolverRegistration {
    pub manifest: ResolverManifest,
    pub resolver: Arc<dyn SdkResolver>,
}

/// Whether default/fallback resolvers are consulted before or after the
/// regular chain (§4.3, "Default/fallback resolvers").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentStyle {
    /// Defaults first; if one succeeds the regular chain is never loaded.
    Core,
    /// Defaults only after the regular chain is exhausted.
    Framework,
}

/// The non-caching resolver chain. Registrations are in ascending priority
/// order within each list; [`ChainSdkResolverService::resolve`] pre-filters
/// and sequences them per §4.3 steps 1-2.
pub struct ChainSdkResolverService {
    deployment: DeploymentStyle,
    resolvers: Vec<ResolverRegistration>,
    default_resolvers: Vec<ResolverRegistration>,
}

impl ChainSdkResolverService {
    #[must_use]
    pub fn new(deployment: DeploymentStyle) -> Self {
        Self {
            deployment,
            resolvers: Vec::new(),
            default_resolvers: Vec::new(),
        }
    }

    #[must_use]
    pub fn register(mut self, manifest: ResolverManifest, resolver: Arc<dyn SdkResolver>) -> Self {
        self.resolvers.push(ResolverRegistration { manifest, resolver });
        self
    }

    #[must_use]
    pub fn register_default(mut self, manifest: ResolverManifest, resolver: Arc<dyn SdkResolver>) -> Self {
        self.default_resolvers.push(ResolverRegistration { manifest, resolver });
        self
    }

    /// Specific (pattern-bearing, matching) resolvers first in priority
    /// order, then general (pattern-less) resolvers (§4.3 step 2).
    fn regular_chain_for<'a>(&'a self, sdk_name: &str) -> Vec<&'a ResolverRegistration> {
        let mut specific: Vec<&ResolverRegistration> = self
            .resolvers
            .iter()
            .filter(|r| r.manifest.is_specific() && r.manifest.matches(sdk_name))
            .collect();
        let general = self.resolvers.iter().filter(|r| !r.manifest.is_specific());
        specific.extend(general);
        specific
    }

    /// Full invocation order for a resolution. Sequential short-circuiting
    /// on success naturally gives the Core-style "regular resolvers are not
    /// loaded at all" behavior: we simply never reach them.
    fn invocation_order<'a>(&'a self, sdk_name: &str) -> Vec<&'a ResolverRegistration> {
        let regular = self.regular_chain_for(sdk_name);
        match self.deployment {
            DeploymentStyle::Core => self
                .default_resolvers
                .iter()
                .chain(regular)
                .collect(),
            DeploymentStyle::Framework => regular
                .into_iter()
                .chain(self.default_resolvers.iter())
                .collect(),
        }
    }

    /// Runs the chain for one request. Returns `Ok((SdkResult::Failure, _))`
    /// for a non-fatal exhaustion; `Err` only for a resolver exception or
    /// when `fail_on_unresolved` forces a fatal outcome (§7.4).
    pub fn resolve(
        &self,
        request: &SdkResolutionRequest,
        context: &super::types::ResolverContext,
        logger: &dyn LoggerSink,
        event_context: EventContext,
    ) -> ForgeResult<(SdkResult, Option<String>)> {
        let order = self.invocation_order(&request.sdk.name);
        let mut accumulated_errors: Vec<(String, String)> = Vec::new();
        let mut accumulated_warnings: Vec<(String, String)> = Vec::new();
        let mut tried = 0usize;

        for registration in order {
            tried += 1;
            let name = registration.manifest.display_name.clone();
            match registration.resolver.resolve(&request.sdk, context) {
                Ok(None) => {
                    logger.emit(&EngineEvent::Message {
                        context: event_context,
                        importance: crate::logging::LogLevel::DEBUG,
                        text: format!("resolver '{name}' returned null"),
                    });
                }
                Ok(Some(SdkResult::Failure { errors, warnings })) => {
                    accumulated_errors.extend(errors.into_iter().map(|e| (name.clone(), e)));
                    accumulated_warnings.extend(warnings.into_iter().map(|w| (name.clone(), w)));
                }
                Ok(Some(ref result @ SdkResult::Success { ref version, .. })) => {
                    if !same_version(request.sdk.referenced_version.as_deref(), version.as_deref()) {
                        logger.emit(&EngineEvent::Warning {
                            context: event_context,
                            code: Some(codes::SDK_VERSION_MISMATCH),
                            text: format!(
                                "resolved sdk '{}' version {:?} differs from requested {:?}",
                                request.sdk.name, version, request.sdk.referenced_version
                            ),
                        });
                    }
                    let preserved_state = if request.submission_id != 0 {
                        context.state.clone()
                    } else {
                        None
                    };
                    return Ok((result.clone(), preserved_state));
                }
                Err(message) => {
                    return Err(SdkError::ResolverException {
                        resolver: name,
                        sdk: request.sdk.name.clone(),
                        message,
                    }
                    .into());
                }
            }
        }

        for (resolver, warning) in &accumulated_warnings {
            logger.emit(&EngineEvent::Warning {
                context: event_context,
                code: None,
                text: format!("{resolver}: {warning}"),
            });
        }

        let errors: Vec<String> = accumulated_errors
            .iter()
            .map(|(resolver, err)| format!("{resolver}: {err}"))
            .collect();

        let sdk_error = if tried == 1 {
            let resolver = accumulated_errors
                .first()
                .map_or_else(|| "unknown".to_string(), |(r, _)| r.clone());
            SdkError::SingleResolverFailed {
                resolver,
                sdk: request.sdk.name.clone(),
                errors: accumulated_errors.into_iter().map(|(_, e)| e).collect(),
            }
        } else {
            SdkError::AllResolversFailed {
                sdk: request.sdk.name.clone(),
                errors,
            }
        };

        logger.emit(&EngineEvent::Error {
            context: event_context,
            code: None,
            text: sdk_error.to_string(),
        });

        if request.fail_on_unresolved {
            return Err(SdkError::FailOnUnresolved(request.sdk.name.clone()).into());
        }

        Ok((
            SdkResult::Failure {
                errors: vec![sdk_error.to_string()],
                warnings: Vec::new(),
            },
            None,
        ))
    }
}

#[cfg(test)]
mod tests;
