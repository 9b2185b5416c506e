//! The skill tag catalog.
//!
//! A catalog pairs a closed tag map (canonical skill name → the platform's
//! internal numeric tag id) with a many-to-one alias table (variant name →
//! canonical name). Tag ids exist only for platforms with a structured
//! skills API; a name that resolves to no tag id cannot be created remotely
//! and surfaces as `unmapped` in diffs.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::Result;

/// A platform-internal numeric skill tag identifier.
pub type TagId = i64;

/// Closed mapping from canonical skill names to platform tag ids, plus the
/// alias table folding variant spellings onto canonical names.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillCatalog {
    #[serde(default)]
    tags: BTreeMap<String, TagId>,
    #[serde(default)]
    aliases: BTreeMap<String, String>,
}

impl SkillCatalog {
    /// The built-in catalog, mirroring the production tag extract from the
    /// structured platform's profile API.
    pub fn builtin() -> Self {
        let tags = [
            ("AWS", 1698),
            ("GCP", 3468),
            ("Docker", 2217),
            ("Kubernetes", 10268),
            ("Linux", 1459),
            ("인프라", 1676),
            ("DevOps", 1952),
            ("GitLab", 1413),
            ("Git", 1411),
            ("Jenkins", 2020),
            ("Python", 1554),
            ("Java", 1540),
            ("Shell", 1561),
            ("Bash", 2271),
            ("SQL", 1562),
            ("PostgreSQL", 2683),
            ("MySQL", 1464),
            ("Redis", 1470),
        ]
        .into_iter()
        .map(|(name, id)| (name.to_string(), id))
        .collect();

        let aliases = [
            ("AWS EC2", "AWS"),
            ("AWS VPC", "AWS"),
            ("AWS IAM", "AWS"),
            ("AWS S3", "AWS"),
            ("AWS EKS", "AWS"),
            ("VPC", "AWS"),
            ("IAM", "AWS"),
            ("S3", "AWS"),
            ("EKS", "AWS"),
            ("EC2", "AWS"),
            ("Cloudflare Workers", "Cloudflare"),
            ("GitLab CI/CD", "GitLab"),
            ("Container Registry", "Docker"),
            ("Docker Compose", "Docker"),
            ("API Integration", "Python"),
        ]
        .into_iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect();

        Self { tags, aliases }
    }

    /// Load a catalog from a TOML document with `[tags]` and `[aliases]`
    /// tables.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a catalog override file from disk.
    pub fn from_toml_file(path: &std::path::Path) -> Result<Self> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    /// Resolve a skill name to its canonical form.
    ///
    /// Resolution order: alias table, the `AWS `-prefix collapse,
    /// case-insensitive exact match against the tag catalog (returning the
    /// catalog's casing), then pass-through unchanged. Unresolved names are
    /// deliberately not dropped so they still surface in diffs.
    pub fn normalize(&self, name: &str) -> String {
        if let Some(canonical) = self.aliases.get(name) {
            return canonical.clone();
        }
        if name.starts_with("AWS ") {
            return "AWS".to_string();
        }
        if let Some(canonical) = self.scan_case_insensitive(name) {
            return canonical.to_string();
        }
        name.to_string()
    }

    /// Resolve a skill name to the platform tag id needed to create it.
    ///
    /// Tries the exact tag map, then the alias-resolved name, then a
    /// case-insensitive scan. `None` means the skill cannot be created
    /// remotely.
    pub fn lookup_tag_id(&self, name: &str) -> Option<TagId> {
        if let Some(id) = self.tags.get(name) {
            return Some(*id);
        }
        if let Some(canonical) = self.aliases.get(name)
            && let Some(id) = self.tags.get(canonical)
        {
            return Some(*id);
        }
        self.scan_case_insensitive(name)
            .and_then(|canonical| self.tags.get(canonical))
            .copied()
    }

    /// Reverse lookup: the canonical catalog name for a tag id.
    pub fn name_for(&self, id: TagId) -> Option<&str> {
        self.tags
            .iter()
            .find(|(_, tag)| **tag == id)
            .map(|(name, _)| name.as_str())
    }

    /// Flatten the canonical `category -> [skill]` grouping into a single
    /// deduplicated list. Category grouping is presentational and carries
    /// no meaning for diffing.
    pub fn flatten(skills_by_category: &BTreeMap<String, Vec<String>>) -> Vec<String> {
        let mut seen = Vec::new();
        for names in skills_by_category.values() {
            for name in names {
                if !seen.contains(name) {
                    seen.push(name.clone());
                }
            }
        }
        seen
    }

    fn scan_case_insensitive(&self, name: &str) -> Option<&str> {
        self.tags
            .keys()
            .find(|key| key.eq_ignore_ascii_case(name))
            .map(String::as_str)
    }
}
