//! Skill set reconciliation.
//!
//! Symmetric difference over *normalized* names — never fuzzy text
//! similarity. The canonical list is authoritative: remote skills it does
//! not mention are scheduled for deletion.

use profile_model::RemoteSkill;
use tracing::warn;

use crate::catalog::{SkillCatalog, TagId};

/// A canonical skill scheduled for remote creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillAddition {
    /// Normalized canonical name.
    pub name: String,
    /// The platform tag id the create call needs.
    pub tag_type_id: TagId,
    /// The name as it appeared in the canonical profile.
    pub original: String,
}

/// Result of reconciling the canonical skill list against a remote one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillDiff {
    pub to_add: Vec<SkillAddition>,
    pub to_delete: Vec<RemoteSkill>,
    /// Normalized names already present remotely.
    pub unchanged: Vec<String>,
    /// Canonical names with no tag id — cannot be created remotely.
    /// A data/configuration gap, not a runtime fault.
    pub unmapped: Vec<String>,
}

impl SkillDiff {
    /// Whether the diff would mutate the remote list.
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_delete.is_empty()
    }
}

/// Reconcile the canonical skill list against the remote one.
///
/// A canonical skill is `unchanged` if its normalized name exactly equals a
/// remote name, `to_add` if a tag id resolves, otherwise `unmapped`. Remote
/// skills absent from the normalized canonical set become `to_delete`.
/// Additions are deduplicated by tag id so two variants of the same
/// canonical skill produce one create call.
pub fn diff_skills(
    catalog: &SkillCatalog,
    canonical: &[String],
    remote: &[RemoteSkill],
) -> SkillDiff {
    let remote_names: Vec<&str> = remote.iter().map(|s| s.name.as_str()).collect();
    let normalized: Vec<String> = canonical.iter().map(|s| catalog.normalize(s)).collect();

    let mut diff = SkillDiff::default();

    for (name, normalized_name) in canonical.iter().zip(&normalized) {
        if remote_names.contains(&normalized_name.as_str()) {
            if !diff.unchanged.contains(normalized_name) {
                diff.unchanged.push(normalized_name.clone());
            }
        } else if let Some(tag_type_id) = catalog.lookup_tag_id(name) {
            if diff.to_add.iter().all(|a| a.tag_type_id != tag_type_id) {
                diff.to_add.push(SkillAddition {
                    name: normalized_name.clone(),
                    tag_type_id,
                    original: name.clone(),
                });
            }
        } else if !diff.unmapped.contains(name) {
            warn!(skill = %name, "no tag id resolves; skill cannot be created remotely");
            diff.unmapped.push(name.clone());
        }
    }

    for skill in remote {
        if !normalized.iter().any(|n| n == &skill.name) {
            diff.to_delete.push(skill.clone());
        }
    }

    diff
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn remote(pairs: &[(i64, &str)]) -> Vec<RemoteSkill> {
        pairs
            .iter()
            .map(|(id, name)| RemoteSkill {
                id: *id,
                name: name.to_string(),
            })
            .collect()
    }

    #[test]
    fn alias_match_is_unchanged_and_stale_remote_is_deleted() {
        let catalog = SkillCatalog::builtin();
        let canonical = vec!["AWS EC2".to_string(), "Docker".to_string()];
        let remote = remote(&[(1, "AWS"), (2, "Redis")]);

        let diff = diff_skills(&catalog, &canonical, &remote);

        assert_eq!(diff.unchanged, vec!["AWS"]);
        assert_eq!(diff.to_add.len(), 1);
        assert_eq!(diff.to_add[0].name, "Docker");
        assert_eq!(diff.to_add[0].tag_type_id, 2217);
        assert_eq!(diff.to_delete, vec![RemoteSkill {
            id: 2,
            name: "Redis".to_string(),
        }]);
        assert!(diff.unmapped.is_empty());
    }

    #[test]
    fn unmapped_skill_never_reaches_to_add() {
        let catalog = SkillCatalog::builtin();
        let canonical = vec!["Underwater Basket Weaving".to_string()];

        let diff = diff_skills(&catalog, &canonical, &[]);

        assert!(diff.to_add.is_empty());
        assert_eq!(diff.unmapped, vec!["Underwater Basket Weaving"]);
    }

    #[test]
    fn additions_dedupe_by_tag_id() {
        let catalog = SkillCatalog::builtin();
        let canonical = vec!["AWS EC2".to_string(), "AWS VPC".to_string()];

        let diff = diff_skills(&catalog, &canonical, &[]);

        assert_eq!(diff.to_add.len(), 1);
        assert_eq!(diff.to_add[0].tag_type_id, 1698);
    }

    #[test]
    fn identical_lists_yield_empty_diff() {
        let catalog = SkillCatalog::builtin();
        let canonical = vec!["Docker".to_string(), "Redis".to_string()];
        let remote = remote(&[(1, "Docker"), (2, "Redis")]);

        let diff = diff_skills(&catalog, &canonical, &remote);

        assert!(diff.is_empty());
        assert_eq!(diff.unchanged, vec!["Docker", "Redis"]);
    }

    #[test]
    fn diff_is_referentially_transparent() {
        let catalog = SkillCatalog::builtin();
        let canonical = vec!["AWS EC2".to_string(), "Docker".to_string()];
        let remote = remote(&[(1, "AWS"), (2, "Redis")]);

        let first = diff_skills(&catalog, &canonical, &remote);
        let second = diff_skills(&catalog, &canonical, &remote);
        assert_eq!(first, second);
    }
}
