// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Target Builder (§4.5): walks a project's target graph for a requested
//! target list, running tasks through the Task Execution Host and
//! committing every executed target (requested, depended-on, and
//! before/after-triggered) to a per-request results cache.
//!
//! ```text
//!  requested targets
//!        |
//!        v  visit() per name, explicit active-target stack for cycles
//!   condition false? -> Skipped
//!   already up to date (declared inputs/outputs)? -> Success, no tasks run
//!   otherwise: prerequisites -> own tasks -> after-targets
//!        |
//!        v
//!  BuildResult { per_target_results, overall_result }
//! ```

pub mod builder;
pub mod graph;
pub mod uptodate;

pub use builder::TargetBuilder;
