// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Property/item evaluation scope.
//!
//! The full expression language belongs to the (out-of-scope) project
//! evaluator. What the core needs is narrower: expand `$(Property)` and
//! `@(Item)` references inside a raw task-parameter string (§4.4, binding
//! rule 1-2), and evaluate the small boolean-condition grammar a target's
//! `condition` attribute uses (§4.5).

use std::collections::BTreeMap;

use crate::core::item::TaskItem;

/// A property/item evaluation scope: the bucket a task's raw parameter
/// strings and a target's condition are evaluated against.
#[derive(Debug, Clone, Default)]
pub struct EvaluationScope {
    properties: BTreeMap<String, String>,
    items: BTreeMap<String, Vec<TaskItem>>,
}

impl EvaluationScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn set_items(&mut self, name: impl Into<String>, items: Vec<TaskItem>) {
        self.items.insert(name.into(), items);
    }

    pub fn add_item(&mut self, name: impl Into<String>, item: TaskItem) {
        self.items.entry(name.into()).or_default().push(item);
    }

    #[must_use]
    pub fn items_named(&self, name: &str) -> Option<&[TaskItem]> {
        self.items.get(name).map(Vec::as_slice)
    }

    /// Expands `$(Property)` and `@(Item)` references in `raw`, joining
    /// item lists with `;`. Unknown references expand to the empty string,
    /// matching binding rule 1's "no value" case.
    #[must_use]
    pub fn evaluate(&self, raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        let mut rest = raw;
        loop {
            let Some(marker) = rest.find(['$', '@']) else {
                out.push_str(rest);
                break;
            };
            let (head, tail) = rest.split_at(marker);
            out.push_str(head);
            let is_property = tail.starts_with("$(");
            let is_item = tail.starts_with("@(");
            if !is_property && !is_item {
                out.push_str(&tail[..tail.chars().next().map_or(1, char::len_utf8)]);
                rest = &tail[tail.chars().next().map_or(1, char::len_utf8)..];
                continue;
            }
            let Some(close) = tail[2..].find(')') else {
                out.push_str(&tail[..2]);
                rest = &tail[2..];
                continue;
            };
            let name = &tail[2..2 + close];
            if is_property {
                if let Some(value) = self.property(name) {
                    out.push_str(value);
                }
            } else if let Some(items) = self.items_named(name) {
                let joined = items
                    .iter()
                    .map(|item| item.item_spec.as_str())
                    .collect::<Vec<_>>()
                    .join(";");
                out.push_str(&joined);
            }
            rest = &tail[2 + close + 1..];
        }
        out
    }

    /// Returns `true` iff `raw`, trimmed, is exactly a single `@(Item)`
    /// reference — the case binding rule 2 treats specially for
    /// `ITaskItem` parameters (preserving metadata rather than
    /// round-tripping through a joined string).
    #[must_use]
    pub fn as_sole_item_reference<'a>(&'a self, raw: &str) -> Option<&'a [TaskItem]> {
        let trimmed = raw.trim();
        let inner = trimmed.strip_prefix("@(")?.strip_suffix(')')?;
        self.items_named(inner)
    }

    /// Evaluates a target's `condition` attribute.
    ///
    /// Supports the MSBuild-style grammar the test corpus exercises:
    /// property expansion followed by one or more `'A'=='B'` / `'A'!='B'`
    /// comparisons joined by `and`/`or` (case-insensitive), or a bare
    /// `true`/`false` literal. An empty or absent condition is `true`.
    #[must_use]
    pub fn evaluate_condition(&self, raw: &str) -> bool {
        let expanded = self.evaluate(raw);
        let trimmed = expanded.trim();
        if trimmed.is_empty() {
            return true;
        }
        if trimmed.eq_ignore_ascii_case("true") {
            return true;
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return false;
        }
        if let Some(rest) = split_ignore_case(trimmed, " and ") {
            return rest.iter().all(|term| self.evaluate_condition(term));
        }
        if let Some(rest) = split_ignore_case(trimmed, " or ") {
            return rest.iter().any(|term| self.evaluate_condition(term));
        }
        evaluate_comparison(trimmed).unwrap_or(false)
    }
}

fn split_ignore_case<'a>(input: &'a str, sep: &str) -> Option<Vec<&'a str>> {
    let lower = input.to_ascii_lowercase();
    if !lower.contains(&sep.to_ascii_lowercase()) {
        return None;
    }
    let mut parts = Vec::new();
    let mut rest = input;
    let sep_lower = sep.to_ascii_lowercase();
    loop {
        let rest_lower = rest.to_ascii_lowercase();
        if let Some(idx) = rest_lower.find(&sep_lower) {
            parts.push(&rest[..idx]);
            rest = &rest[idx + sep.len()..];
        } else {
            parts.push(rest);
            break;
        }
    }
    Some(parts)
}

fn evaluate_comparison(trimmed: &str) -> Option<bool> {
    let (op, negate) = if trimmed.contains("!=") {
        ("!=", true)
    } else {
        ("==", false)
    };
    let (lhs, rhs) = trimmed.split_once(op)?;
    let lhs = unquote(lhs.trim());
    let rhs = unquote(rhs.trim());
    let equal = lhs == rhs;
    Some(if negate { !equal } else { equal })
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .unwrap_or(s)
}

/// Splits a semicolon-delimited list, unescaping `%3B` *after* splitting,
/// matching binding rule 2: escaped separators only decode post-split.
#[must_use]
pub fn split_semicolon_list(value: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    value
        .split(';')
        .map(|part| part.replace("%3B", ";"))
        .collect()
}

#[cfg(test)]
mod tests;
