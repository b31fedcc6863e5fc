// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Declared inputs/outputs up-to-date check (§4.5).

use std::path::Path;
use std::time::SystemTime;

use crate::core::scope::{EvaluationScope, split_semicolon_list};

fn resolved_paths(scope: &EvaluationScope, specs: &[String]) -> Vec<String> {
    specs
        .iter()
        .flat_map(|spec| split_semicolon_list(&scope.evaluate(spec)))
        .filter(|s| !s.is_empty())
        .collect()
}

fn latest_mtime(paths: &[String]) -> Option<SystemTime> {
    paths
        .iter()
        .map(|p| std::fs::metadata(Path::new(p)).and_then(|m| m.modified()))
        .collect::<std::io::Result<Vec<_>>>()
        .ok()?
        .into_iter()
        .max()
}

fn earliest_mtime(paths: &[String]) -> Option<SystemTime> {
    paths
        .iter()
        .map(|p| std::fs::metadata(Path::new(p)).and_then(|m| m.modified()))
        .collect::<std::io::Result<Vec<_>>>()
        .ok()?
        .into_iter()
        .min()
}

/// `true` iff every declared output exists, every declared input exists,
/// and the oldest output is no older than the newest input.
#[must_use]
pub fn is_up_to_date(scope: &EvaluationScope, inputs: &[String], outputs: &[String]) -> bool {
    let input_paths = resolved_paths(scope, inputs);
    let output_paths = resolved_paths(scope, outputs);
    if input_paths.is_empty() || output_paths.is_empty() {
        return false;
    }
    let (Some(newest_input), Some(oldest_output)) =
        (latest_mtime(&input_paths), earliest_mtime(&output_paths))
    else {
        return false;
    };
    oldest_output >= newest_input
}

#[cfg(test)]
mod tests;
