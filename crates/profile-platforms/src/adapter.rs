//! The platform adapter contract.
//!
//! One adapter instance owns one platform account for the duration of a
//! run. Two families implement the contract: structured-API adapters
//! (granular CRUD against the platform's resume endpoints) and
//! browser-automation adapters (coarse field-level form updates only).
//!
//! Apply methods never propagate per-item failures — each remote call is
//! wrapped so a single failure increments a counter and the loop
//! continues. Only `fetch_profile` may fail the platform as a whole.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use profile_diff::FieldChange;
use profile_model::{CanonicalProfile, RemoteSnapshot};

use crate::error::{Error, Result};

/// A target job platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Wanted,
    JobKorea,
    Saramin,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Wanted => "wanted",
            Platform::JobKorea => "jobkorea",
            Platform::Saramin => "saramin",
        }
    }

    /// All platforms, in processing order.
    pub fn all() -> [Platform; 3] {
        [Platform::Wanted, Platform::JobKorea, Platform::Saramin]
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wanted" => Ok(Platform::Wanted),
            "jobkorea" => Ok(Platform::JobKorea),
            "saramin" => Ok(Platform::Saramin),
            _ => Err(format!("Unknown platform: {s}")),
        }
    }
}

/// A syncable profile section.
///
/// `Section::ordered()` is the fixed apply order within a platform: coarse
/// identity fields land before the structured sections that might
/// reference them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Profile,
    Skills,
    Careers,
    Education,
    Activities,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Profile => "profile",
            Section::Skills => "skills",
            Section::Careers => "careers",
            Section::Education => "education",
            Section::Activities => "activities",
        }
    }

    /// Fixed section processing order within one platform.
    pub fn ordered() -> [Section; 5] {
        [
            Section::Profile,
            Section::Skills,
            Section::Careers,
            Section::Education,
            Section::Activities,
        ]
    }

    /// Whether this is a set-reconciled section (everything but the coarse
    /// profile fields).
    pub fn is_set_section(&self) -> bool {
        !matches!(self, Section::Profile)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What an adapter can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Granular skill/career/education/activity CRUD. Browser-automation
    /// adapters lack it; their set sections are skipped as not supported.
    pub structured_sections: bool,
}

/// Outcome of fetching a platform's remote state.
///
/// `AuthRequired` is the expected no/invalid-session case — not an error.
/// Callers treat it as "skip this platform for this run".
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Snapshot(RemoteSnapshot),
    AuthRequired,
}

/// A planned addition in a set-reconciled section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanAdd {
    pub label: String,
    pub payload: Value,
}

/// A planned update of an existing remote entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanUpdate {
    pub remote_id: i64,
    pub label: String,
    pub payload: Value,
}

/// A planned deletion of a stale remote entry (skills only).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanDelete {
    pub remote_id: i64,
    pub label: String,
}

/// The change plan for one set-reconciled section, in the platform's own
/// vocabulary. Ephemeral — computed and applied within one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SetPlan {
    pub to_add: Vec<PlanAdd>,
    pub to_update: Vec<PlanUpdate>,
    pub to_delete: Vec<PlanDelete>,
    /// Labels of entities already in their target state.
    pub unchanged: Vec<String>,
    /// Canonical entities that cannot be translated into the platform's
    /// vocabulary. Excluded from apply; reported for manual follow-up.
    pub unmapped: Vec<String>,
}

impl SetPlan {
    /// Whether applying this plan would mutate anything.
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_update.is_empty() && self.to_delete.is_empty()
    }

    /// Number of items an apply would attempt.
    pub fn mutation_count(&self) -> usize {
        self.to_add.len() + self.to_update.len() + self.to_delete.len()
    }
}

/// Per-item accounting for one section's apply (or preview).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionOutcome {
    pub added: usize,
    pub updated: usize,
    pub deleted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

impl SectionOutcome {
    /// Record a per-item failure and keep going.
    pub fn record_failure(&mut self, label: &str, error: &Error) {
        self.failed += 1;
        self.errors.push(format!("{label}: {error}"));
    }
}

/// The per-platform adapter contract.
#[async_trait]
pub trait PlatformAdapter: Send {
    fn platform(&self) -> Platform;

    fn capabilities(&self) -> Capabilities;

    /// Fetch the remote state once for this run.
    ///
    /// Returns `FetchOutcome::AuthRequired` for the expected
    /// no/invalid-session case; `Err` only for whole-platform fatal faults.
    async fn fetch_profile(&mut self) -> Result<FetchOutcome>;

    /// Deterministic, pure mapping of canonical fields into this
    /// platform's coarse field vocabulary.
    fn map_profile_fields(&self, canonical: &CanonicalProfile) -> BTreeMap<String, String>;

    /// Compute the change plan for a set-reconciled section.
    ///
    /// Pure; identical `(canonical, snapshot)` pairs always yield an
    /// identical plan. Returns `None` when the adapter does not support
    /// granular CRUD for the section (reported as skipped, not attempted).
    fn plan_section(
        &self,
        section: Section,
        canonical: &CanonicalProfile,
        snapshot: &RemoteSnapshot,
    ) -> Option<SetPlan>;

    /// Apply scalar field changes, each attempted independently.
    async fn apply_field_changes(
        &mut self,
        snapshot: &RemoteSnapshot,
        changes: &[FieldChange],
    ) -> SectionOutcome;

    /// Apply a set plan: adds, then updates, then deletes, so the window
    /// where the remote list is both missing a new item and not yet
    /// cleaned of a stale one stays minimal.
    async fn apply_set_changes(
        &mut self,
        snapshot: &RemoteSnapshot,
        section: Section,
        plan: &SetPlan,
    ) -> SectionOutcome;
}

/// Run a remote call under the per-call timeout. A timeout is a per-item
/// failure, never a run-level abort.
pub(crate) async fn with_timeout<T>(
    limit: Duration,
    fut: impl std::future::Future<Output = Result<T>> + Send,
) -> Result<T> {
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(Error::Timeout {
            seconds: limit.as_secs(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_round_trips_through_str() {
        for platform in Platform::all() {
            assert_eq!(platform.as_str().parse::<Platform>().unwrap(), platform);
        }
        assert!("linkedin".parse::<Platform>().is_err());
    }

    #[test]
    fn profile_section_comes_first() {
        assert_eq!(Section::ordered()[0], Section::Profile);
        assert!(!Section::Profile.is_set_section());
        assert!(Section::Skills.is_set_section());
    }

    #[test]
    fn empty_plan_has_no_mutations() {
        let plan = SetPlan::default();
        assert!(plan.is_empty());
        assert_eq!(plan.mutation_count(), 0);
    }

    #[test]
    fn outcome_records_failures_without_aborting() {
        let mut outcome = SectionOutcome::default();
        outcome.record_failure("Docker", &Error::remote("503"));
        outcome.record_failure("Redis", &Error::Timeout { seconds: 30 });
        assert_eq!(outcome.failed, 2);
        assert!(outcome.errors[0].contains("Docker"));
    }
}
