//! Run result types.
//!
//! Field names and shapes here are the engine's stable output surface;
//! downstream notification and audit consumers pattern-match on them.
//! Results are ephemeral — produced for one run, never cached.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use profile_diff::FieldChange;
use profile_platforms::{Platform, SectionOutcome};

/// Terminal state of one platform's processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformStatus {
    /// Processing ran to completion (possibly with per-item failures).
    Done,
    /// No valid session; the platform was skipped untouched.
    SkippedAuth,
    /// A whole-platform fatal condition aborted processing.
    Failed,
}

impl PlatformStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformStatus::Done => "done",
            PlatformStatus::SkippedAuth => "skipped_auth",
            PlatformStatus::Failed => "failed",
        }
    }
}

/// How one section ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionStatus {
    /// Changes were applied (counts say how it went).
    Applied,
    /// Dry run: the diff was computed and reported, nothing mutated.
    Previewed,
    /// The adapter cannot perform this section; skipped, not an error.
    NotSupported,
}

/// Per-section accounting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionReport {
    pub status: SectionStatus,
    pub added: usize,
    pub updated: usize,
    pub deleted: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Entities already in their target state.
    pub unchanged: usize,
    /// Canonical entities that cannot be translated into the platform's
    /// vocabulary — excluded from apply, reported for manual follow-up.
    pub unmapped: Vec<String>,
    /// Human-readable preview lines; presentation over the structured
    /// data, never an independent source of truth.
    pub preview: Vec<String>,
    pub errors: Vec<String>,
}

impl SectionReport {
    pub fn previewed(preview: Vec<String>, unchanged: usize, unmapped: Vec<String>) -> Self {
        Self {
            status: SectionStatus::Previewed,
            added: 0,
            updated: 0,
            deleted: 0,
            skipped: 0,
            failed: 0,
            unchanged,
            unmapped,
            preview,
            errors: Vec::new(),
        }
    }

    pub fn applied(
        outcome: SectionOutcome,
        preview: Vec<String>,
        unchanged: usize,
        unmapped: Vec<String>,
    ) -> Self {
        Self {
            status: SectionStatus::Applied,
            added: outcome.added,
            updated: outcome.updated,
            deleted: outcome.deleted,
            skipped: outcome.skipped,
            failed: outcome.failed,
            unchanged,
            unmapped,
            preview,
            errors: outcome.errors,
        }
    }

    pub fn not_supported() -> Self {
        Self {
            status: SectionStatus::NotSupported,
            added: 0,
            updated: 0,
            deleted: 0,
            skipped: 0,
            failed: 0,
            unchanged: 0,
            unmapped: Vec::new(),
            preview: Vec::new(),
            errors: Vec::new(),
        }
    }
}

/// Result of one platform's processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformReport {
    pub platform: Platform,
    pub status: PlatformStatus,
    /// True when processing completed with zero failed items.
    pub success: bool,
    pub dry_run: bool,
    /// Scalar field changes found (and, outside dry run, attempted).
    pub changes: Vec<FieldChange>,
    /// Per-section accounting, keyed by section name.
    pub sections: BTreeMap<String, SectionReport>,
    pub errors: Vec<String>,
}

impl PlatformReport {
    pub fn skipped_auth(platform: Platform, dry_run: bool) -> Self {
        Self {
            platform,
            status: PlatformStatus::SkippedAuth,
            success: false,
            dry_run,
            changes: Vec::new(),
            sections: BTreeMap::new(),
            errors: vec!["authentication required; platform skipped".to_string()],
        }
    }

    pub fn failed(platform: Platform, dry_run: bool, error: String) -> Self {
        Self {
            platform,
            status: PlatformStatus::Failed,
            success: false,
            dry_run,
            changes: Vec::new(),
            sections: BTreeMap::new(),
            errors: vec![error],
        }
    }

    /// Total failed items across all sections.
    pub fn failed_items(&self) -> usize {
        self.sections.values().map(|s| s.failed).sum()
    }
}

/// Aggregated result of one sync run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncRunResult {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub dry_run: bool,
    pub platforms: Vec<PlatformReport>,
}

impl SyncRunResult {
    /// One summary line per platform, in the style of the run footer:
    /// `wanted       OK     3 changes (dry-run)`.
    pub fn summary_lines(&self) -> Vec<String> {
        self.platforms
            .iter()
            .map(|report| {
                let status = if report.success { "OK" } else { "FAIL" };
                let mode = if report.dry_run { " (dry-run)" } else { "" };
                format!(
                    "{:<12} {:<6} {} changes{}",
                    report.platform.as_str(),
                    status,
                    report.changes.len(),
                    mode
                )
            })
            .collect()
    }
}
