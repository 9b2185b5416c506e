//! Remote profile snapshots.
//!
//! A snapshot is the remote state of one platform account, fetched once at
//! the start of that platform's processing and diffed against the canonical
//! profile. Capability varies per platform: browser-automated platforms
//! expose only coarse scalar fields, structured platforms additionally
//! expose identified lists of skills, careers, educations, and activities.
//!
//! Snapshots are ephemeral — produced and consumed within one run, never
//! cached across runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A skill row on a structured platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSkill {
    /// Remote row id, used for deletion.
    pub id: i64,
    pub name: String,
}

/// A career row on a structured platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteCareer {
    pub id: i64,
    /// The platform's company display name, e.g. "Acme Korea".
    pub company_name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: Option<String>,
}

/// An education row on a structured platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEducation {
    pub id: i64,
    pub school_name: String,
    #[serde(default)]
    pub major: String,
}

/// An activity row on a structured platform (certifications land here).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteActivity {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// The remote state of one platform account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSnapshot {
    /// Coarse scalar fields (name, headline, email, ...). The only state
    /// browser-automated platforms expose.
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    /// Container id later structured calls need. `None` on coarse
    /// platforms, or when the account has no resume yet.
    #[serde(default)]
    pub resume_id: Option<String>,
    #[serde(default)]
    pub skills: Vec<RemoteSkill>,
    #[serde(default)]
    pub careers: Vec<RemoteCareer>,
    #[serde(default)]
    pub educations: Vec<RemoteEducation>,
    #[serde(default)]
    pub activities: Vec<RemoteActivity>,
}

impl RemoteSnapshot {
    /// A snapshot carrying only coarse scalar fields.
    pub fn coarse(fields: BTreeMap<String, String>) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    /// Whether this snapshot carries structured lists later sections can
    /// reconcile against.
    pub fn has_structured_sections(&self) -> bool {
        self.resume_id.is_some()
    }
}
