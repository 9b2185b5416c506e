//! Scalar field diffing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Rendered in place of a missing or empty current value.
pub const EMPTY_PLACEHOLDER: &str = "(empty)";

/// One scalar field change.
///
/// Field names are part of the engine's stable output surface; downstream
/// notification and audit consumers pattern-match on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    pub field: String,
    pub from: String,
    pub to: String,
}

/// Compare current remote fields against the mapped canonical target.
///
/// Exact-value comparison per key present in `target`; keys the target does
/// not mention are left untouched. No fuzzy scalar diffing.
pub fn compute_field_diff(
    current: &BTreeMap<String, String>,
    target: &BTreeMap<String, String>,
) -> Vec<FieldChange> {
    let mut changes = Vec::new();
    for (field, to) in target {
        let current_value = current.get(field);
        if current_value != Some(to) {
            let from = match current_value {
                Some(value) if !value.is_empty() => value.clone(),
                _ => EMPTY_PLACEHOLDER.to_string(),
            };
            changes.push(FieldChange {
                field: field.clone(),
                from,
                to: to.clone(),
            });
        }
    }
    changes
}
