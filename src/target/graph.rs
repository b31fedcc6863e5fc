// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Before/after/depends edge discovery (§4.5 "Graph construction").
//!
//! Edges are derived from *all* targets in the project, not just the ones
//! on a requested path, so a `beforeTargets`/`afterTargets` declaration on
//! an otherwise-unrelated target still participates.

use crate::project::ProjectInstance;

/// Targets that must complete before `name` may run: `name`'s own
/// `dependsOn` and `afterTargets`, plus every target elsewhere in the
/// project that declares `name` in its own `beforeTargets`.
///
/// Names with no matching target (missing `dependsOn`/`before`/`after`
/// references) are silently dropped, extending §4.5's explicit
/// before/after silent-ignore rule uniformly to `dependsOn`.
#[must_use]
pub fn prerequisites(project: &ProjectInstance, name: &str) -> Vec<String> {
    let mut deps = Vec::new();
    if let Some(target) = project.target(name) {
        deps.extend(target.depends_on.iter().cloned());
        deps.extend(target.after_targets.iter().cloned());
    }
    for other in project.targets.values() {
        if other.before_targets.iter().any(|b| b == name) {
            deps.push(other.name.clone());
        }
    }
    deps.retain(|dep| project.target(dep).is_some());
    deps.dedup();
    deps
}

/// Targets that declare `name` in their own `afterTargets`: these run
/// immediately once `name` completes (§4.5 traversal step 3, "then run
/// pending after targets").
#[must_use]
pub fn dependents_to_run_after(project: &ProjectInstance, name: &str) -> Vec<String> {
    project
        .targets
        .values()
        .filter(|t| t.after_targets.iter().any(|a| a == name))
        .map(|t| t.name.clone())
        .collect()
}

#[cfg(test)]
mod tests;
