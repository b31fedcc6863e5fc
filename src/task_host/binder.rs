// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pure parameter binder: `(schema, raw, scope) -> bound values | errors` (§4.4).

use std::collections::BTreeMap;

use crate::core::scope::{EvaluationScope, split_semicolon_list};
use crate::core::target_def::SourceLocation;
use crate::error::ProjectFileError;

use super::schema::{ParameterKind, TaskSchema};
use super::value::ParameterValue;

/// Result of binding: successfully-converted values plus a flag for any
/// supplied name with no matching declared parameter (§4.4 rule 4 — a
/// `false` return from `SetTaskParameters`, observable but not fatal).
#[derive(Debug, Default)]
pub struct BindOutcome {
    pub values: BTreeMap<String, ParameterValue>,
    pub unknown_parameters: Vec<String>,
}

/// Binds `raw` parameters to `schema` within `scope`.
///
/// # Errors
///
/// Returns a [`ProjectFileError`] for a missing required parameter, an
/// unsupported parameter type, or an `ITaskItem` scalar expression that
/// evaluates to more than one item (§4.4 rules 1-3).
pub fn bind_parameters(
    task_name: &str,
    schema: &TaskSchema,
    raw: &BTreeMap<String, (String, SourceLocation)>,
    scope: &EvaluationScope,
) -> Result<BindOutcome, ProjectFileError> {
    let mut outcome = BindOutcome::default();

    for (name, (expression, _location)) in raw {
        let Some(declared) = schema.find(name) else {
            outcome.unknown_parameters.push(name.clone());
            continue;
        };

        if let Some(value) = convert(task_name, name, declared.kind, expression, scope)? {
            outcome.values.insert(name.clone(), value);
        }
        // An empty evaluation leaves the parameter unset (rule 1), for every type.
    }

    for declared in &schema.parameters {
        if declared.required && !outcome.values.contains_key(&declared.name) {
            return Err(ProjectFileError::MissingRequiredParameter {
                task: task_name.to_string(),
                parameter: declared.name.clone(),
            });
        }
    }

    Ok(outcome)
}

fn convert(
    task_name: &str,
    parameter_name: &str,
    kind: ParameterKind,
    raw: &str,
    scope: &EvaluationScope,
) -> Result<Option<ParameterValue>, ProjectFileError> {
    if kind == ParameterKind::TaskItem {
        if let Some(items) = scope.as_sole_item_reference(raw) {
            return match items.len() {
                0 => Ok(None),
                1 => Ok(Some(ParameterValue::Item(items[0].clone()))),
                count => Err(ProjectFileError::MultipleItemsForScalar {
                    task: task_name.to_string(),
                    parameter: parameter_name.to_string(),
                    count,
                }),
            };
        }
    }

    let evaluated = scope.evaluate(raw);
    if evaluated.is_empty() {
        return Ok(None);
    }

    if kind.is_array() {
        let parts = split_semicolon_list(&evaluated);
        return Ok(Some(convert_array(kind, &parts)));
    }

    match kind {
        ParameterKind::Bool => parse_bool(&evaluated).map(ParameterValue::Bool).map(Some).ok_or_else(|| unsupported(task_name, parameter_name, "bool")),
        ParameterKind::Int => evaluated
            .parse::<i64>()
            .ok()
            .map(ParameterValue::Int)
            .map(Some)
            .ok_or_else(|| unsupported(task_name, parameter_name, "int")),
        ParameterKind::String => Ok(Some(ParameterValue::String(evaluated))),
        ParameterKind::TaskItem => Ok(Some(ParameterValue::Item(crate::core::item::TaskItem::from_spec(evaluated)))),
        ParameterKind::BoolArray | ParameterKind::IntArray | ParameterKind::StringArray | ParameterKind::TaskItemArray => {
            unreachable!("array kinds handled above")
        }
    }
}

fn convert_array(kind: ParameterKind, parts: &[String]) -> ParameterValue {
    match kind {
        ParameterKind::BoolArray => {
            ParameterValue::BoolArray(parts.iter().map(|p| parse_bool(p).unwrap_or(false)).collect())
        }
        ParameterKind::IntArray => {
            ParameterValue::IntArray(parts.iter().filter_map(|p| p.parse::<i64>().ok()).collect())
        }
        ParameterKind::StringArray => ParameterValue::StringArray(parts.to_vec()),
        ParameterKind::TaskItemArray => {
            ParameterValue::ItemArray(parts.iter().map(crate::core::item::TaskItem::from_spec).collect())
        }
        ParameterKind::Bool | ParameterKind::Int | ParameterKind::String | ParameterKind::TaskItem => {
            unreachable!("scalar kinds never reach convert_array")
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn unsupported(task: &str, parameter: &str, ty: &str) -> ProjectFileError {
    ProjectFileError::UnsupportedParameterType {
        task: task.to_string(),
        parameter: parameter.to_string(),
        ty: ty.to_string(),
    }
}

#[cfg(test)]
mod tests;
