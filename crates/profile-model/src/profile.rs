//! The canonical profile record.
//!
//! The canonical profile is the single source of truth every platform is
//! reconciled against. It is loaded once per run by an external loader and
//! treated as read-only from that point on; the engine never writes it back.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Contact details for the profile owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    /// Free-form; platforms that need E.164 normalize via
    /// [`crate::normalize_phone`].
    pub phone: String,
}

/// The current position, used for headline composition on coarse platforms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentPosition {
    pub company: String,
    pub position: String,
}

/// Narrative summary fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Human-readable total experience, e.g. "8 years".
    pub total_experience: String,
    pub profile_statement: String,
    /// Headline expertise keywords, distinct from the skill catalog.
    #[serde(default)]
    pub expertise: Vec<String>,
}

/// One employment entry.
///
/// `period` is a human-entered range string (e.g. `"2020.01 ~ 2021.02"` or
/// `"2024.03 ~ 현재"`); [`crate::parse_period`] turns it into wire dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerEntry {
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub project: String,
    pub period: String,
    #[serde(default)]
    pub description: String,
}

/// The single education record carried by the canonical profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationRecord {
    pub school: String,
    pub major: String,
    #[serde(default)]
    pub status: String,
    /// `YYYY.MM` format, same convention as career periods.
    #[serde(default)]
    pub start_date: String,
}

/// A certification; synced to structured platforms as an activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificationEntry {
    pub name: String,
    pub issuer: String,
    /// `YYYY.MM` format.
    pub date: String,
}

/// The canonical ("source of truth") professional profile.
///
/// Immutable for the duration of a run. Skill names are grouped by category
/// purely for presentation; diffing flattens and deduplicates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalProfile {
    pub personal: PersonalInfo,
    pub current: CurrentPosition,
    pub summary: Summary,
    #[serde(default)]
    pub skills: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub careers: Vec<CareerEntry>,
    pub education: EducationRecord,
    #[serde(default)]
    pub certifications: Vec<CertificationEntry>,
}

impl CanonicalProfile {
    /// Parse a canonical profile from its JSON representation.
    ///
    /// The location and loading of the JSON document is the concern of an
    /// external loader; this is the seam it hands the bytes through.
    pub fn from_json(json: &str) -> Result<Self> {
        let profile: Self = serde_json::from_str(json)?;
        if profile.personal.name.trim().is_empty() {
            return Err(Error::InvalidProfile(
                "personal.name must not be empty".to_string(),
            ));
        }
        Ok(profile)
    }
}
