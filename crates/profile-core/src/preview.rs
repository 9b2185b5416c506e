//! Human-readable preview rendering.
//!
//! A thin presentation layer over the structured diff: `+` add, `~`
//! update, `-` delete, `=` already in place, `?` unmapped. Never parsed
//! back; the structured result is the source of truth.

use profile_diff::FieldChange;
use profile_platforms::SetPlan;

/// Render one scalar field change.
pub fn render_field_change(change: &FieldChange) -> String {
    format!(
        "~ {}: \"{}\" -> \"{}\"",
        change.field, change.from, change.to
    )
}

/// Render a set plan, adds first, in apply order.
pub fn render_plan(plan: &SetPlan) -> Vec<String> {
    let mut lines = Vec::new();
    for add in &plan.to_add {
        lines.push(format!("+ {}", add.label));
    }
    for update in &plan.to_update {
        lines.push(format!("~ {}", update.label));
    }
    for delete in &plan.to_delete {
        lines.push(format!("- {}", delete.label));
    }
    for name in &plan.unchanged {
        lines.push(format!("= {name} (already exists)"));
    }
    for name in &plan.unmapped {
        lines.push(format!("? {name} (no tag id)"));
    }
    lines
}
