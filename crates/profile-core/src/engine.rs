//! SyncEngine implementation
//!
//! The SyncEngine drives the whole pipeline: for each enabled platform it
//! fetches a remote snapshot through the platform's adapter, computes
//! section diffs against the canonical profile, and either reports them
//! (dry run) or applies them item by item (apply), aggregating everything
//! into a [`SyncRunResult`].
//!
//! Platforms are processed one at a time, and sections within a platform
//! are sequential — later sections reuse the resume container id fetched
//! once per platform. Failure isolation is layered: an item failure never
//! aborts its section, a section failure never blocks later sections, and
//! a platform failure never touches other platforms. Only a missing or
//! expired session fails a platform as a whole, and that skips it rather
//! than the run.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;
use tracing::{debug, error, info};

use profile_diff::compute_field_diff;
use profile_model::{CanonicalProfile, RemoteSnapshot};
use profile_platforms::{FetchOutcome, Platform, PlatformAdapter, Section};

use crate::preview::{render_field_change, render_plan};
use crate::report::{PlatformReport, PlatformStatus, SectionReport, SyncRunResult};

/// Options for a sync run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Compute and report diffs without any remote mutation.
    pub dry_run: bool,
    /// Platforms in scope; `None` means every registered adapter.
    pub platforms: Option<Vec<Platform>>,
    /// Sections in scope; `None` means all of them.
    pub sections: Option<BTreeSet<Section>>,
    /// Re-fetch and re-diff after apply, reporting any residual diff.
    pub verify: bool,
}

impl Default for SyncOptions {
    /// Dry run is the default; mutation is opt-in.
    fn default() -> Self {
        Self {
            dry_run: true,
            platforms: None,
            sections: None,
            verify: false,
        }
    }
}

impl SyncOptions {
    /// Risk-free preview mode.
    pub fn preview() -> Self {
        Self::default()
    }

    /// Apply mode.
    pub fn apply() -> Self {
        Self {
            dry_run: false,
            ..Self::default()
        }
    }

    pub fn with_platforms(mut self, platforms: Vec<Platform>) -> Self {
        self.platforms = Some(platforms);
        self
    }

    pub fn with_sections(mut self, sections: BTreeSet<Section>) -> Self {
        self.sections = Some(sections);
        self
    }

    pub fn with_verify(mut self) -> Self {
        self.verify = true;
        self
    }

    fn section_in_scope(&self, section: Section) -> bool {
        self.sections
            .as_ref()
            .is_none_or(|scope| scope.contains(&section))
    }

    fn platform_in_scope(&self, platform: Platform) -> bool {
        self.platforms
            .as_ref()
            .is_none_or(|scope| scope.contains(&platform))
    }
}

/// Processing phase of one platform, for log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Fetching,
    Diffing,
    Previewing,
    Applying,
    Verifying,
}

impl Phase {
    fn as_str(self) -> &'static str {
        match self {
            Phase::Fetching => "fetching",
            Phase::Diffing => "diffing",
            Phase::Previewing => "previewing",
            Phase::Applying => "applying",
            Phase::Verifying => "verifying",
        }
    }
}

/// Engine synchronizing the canonical profile to every registered
/// platform.
pub struct SyncEngine {
    adapters: Vec<Box<dyn PlatformAdapter>>,
    options: SyncOptions,
}

impl SyncEngine {
    pub fn new(options: SyncOptions) -> Self {
        Self {
            adapters: Vec::new(),
            options,
        }
    }

    /// Register a platform adapter. Platforms are processed in
    /// registration order.
    pub fn register(&mut self, adapter: Box<dyn PlatformAdapter>) {
        self.adapters.push(adapter);
    }

    /// Run one full sweep: every in-scope platform, every in-scope
    /// section. A run always completes — it degrades to best-effort
    /// rather than aborting mid-sweep.
    pub async fn run(&mut self, profile: &CanonicalProfile) -> SyncRunResult {
        let started_at = Utc::now();
        let mut platforms = Vec::new();

        for adapter in &mut self.adapters {
            let platform = adapter.platform();
            if !self.options.platform_in_scope(platform) {
                debug!(%platform, "platform out of scope");
                continue;
            }
            info!(%platform, dry_run = self.options.dry_run, "processing platform");
            platforms.push(process_platform(adapter.as_mut(), profile, &self.options).await);
        }

        SyncRunResult {
            started_at,
            finished_at: Utc::now(),
            dry_run: self.options.dry_run,
            platforms,
        }
    }
}

async fn process_platform(
    adapter: &mut dyn PlatformAdapter,
    profile: &CanonicalProfile,
    options: &SyncOptions,
) -> PlatformReport {
    let platform = adapter.platform();
    debug!(
        %platform,
        structured = adapter.capabilities().structured_sections,
        phase = Phase::Fetching.as_str(),
        "state"
    );

    let snapshot = match adapter.fetch_profile().await {
        Ok(FetchOutcome::Snapshot(snapshot)) => {
            debug!(
                %platform,
                fields = snapshot.fields.len(),
                structured = snapshot.has_structured_sections(),
                "fetched remote snapshot"
            );
            snapshot
        }
        Ok(FetchOutcome::AuthRequired) => {
            info!(%platform, "no valid session; skipping platform");
            return PlatformReport::skipped_auth(platform, options.dry_run);
        }
        Err(e) => {
            error!(%platform, error = %e, "fetch failed; platform failed");
            return PlatformReport::failed(platform, options.dry_run, e.to_string());
        }
    };

    let mut report = PlatformReport {
        platform,
        status: PlatformStatus::Done,
        success: true,
        dry_run: options.dry_run,
        changes: Vec::new(),
        sections: BTreeMap::new(),
        errors: Vec::new(),
    };

    for section in Section::ordered() {
        if !options.section_in_scope(section) {
            debug!(%platform, %section, "section out of scope");
            continue;
        }
        debug!(%platform, %section, phase = Phase::Diffing.as_str(), "state");

        let section_report = if section == Section::Profile {
            process_profile_section(adapter, profile, &snapshot, options, &mut report.changes)
                .await
        } else {
            process_set_section(adapter, profile, &snapshot, options, section).await
        };
        report
            .sections
            .insert(section.as_str().to_string(), section_report);
    }

    if options.verify && !options.dry_run {
        debug!(%platform, phase = Phase::Verifying.as_str(), "state");
        verify_platform(adapter, profile, options, &mut report).await;
    }

    report.success = report.status == PlatformStatus::Done
        && report.failed_items() == 0
        && report.errors.is_empty();
    info!(
        %platform,
        status = report.status.as_str(),
        success = report.success,
        failed_items = report.failed_items(),
        "platform processed"
    );
    report
}

async fn process_profile_section(
    adapter: &mut dyn PlatformAdapter,
    profile: &CanonicalProfile,
    snapshot: &RemoteSnapshot,
    options: &SyncOptions,
    changes_out: &mut Vec<profile_diff::FieldChange>,
) -> SectionReport {
    let target = adapter.map_profile_fields(profile);
    let changes = compute_field_diff(&snapshot.fields, &target);
    let preview: Vec<String> = changes.iter().map(render_field_change).collect();
    let unchanged = target.len() - changes.len();

    changes_out.extend(changes.iter().cloned());

    if options.dry_run {
        debug!(
            platform = %adapter.platform(),
            phase = Phase::Previewing.as_str(),
            count = changes.len(),
            "profile field changes"
        );
        return SectionReport::previewed(preview, unchanged, Vec::new());
    }

    debug!(platform = %adapter.platform(), phase = Phase::Applying.as_str(), "state");
    let outcome = adapter.apply_field_changes(snapshot, &changes).await;
    SectionReport::applied(outcome, preview, unchanged, Vec::new())
}

async fn process_set_section(
    adapter: &mut dyn PlatformAdapter,
    profile: &CanonicalProfile,
    snapshot: &RemoteSnapshot,
    options: &SyncOptions,
    section: Section,
) -> SectionReport {
    let Some(plan) = adapter.plan_section(section, profile, snapshot) else {
        info!(platform = %adapter.platform(), %section, "not supported; skipped");
        return SectionReport::not_supported();
    };

    let preview = render_plan(&plan);
    let unchanged = plan.unchanged.len();
    let unmapped = plan.unmapped.clone();

    if options.dry_run {
        return SectionReport::previewed(preview, unchanged, unmapped);
    }

    let outcome = adapter.apply_set_changes(snapshot, section, &plan).await;
    SectionReport::applied(outcome, preview, unchanged, unmapped)
}

/// Re-fetch and re-diff after apply. Residual diffs are reported, never
/// auto-retried within the same run.
async fn verify_platform(
    adapter: &mut dyn PlatformAdapter,
    profile: &CanonicalProfile,
    options: &SyncOptions,
    report: &mut PlatformReport,
) {
    let snapshot = match adapter.fetch_profile().await {
        Ok(FetchOutcome::Snapshot(snapshot)) => snapshot,
        Ok(FetchOutcome::AuthRequired) => {
            report
                .errors
                .push("verify: session expired before verification".to_string());
            return;
        }
        Err(e) => {
            report.errors.push(format!("verify: re-fetch failed: {e}"));
            return;
        }
    };

    if options.section_in_scope(Section::Profile) {
        let residual =
            compute_field_diff(&snapshot.fields, &adapter.map_profile_fields(profile));
        if !residual.is_empty() {
            report
                .errors
                .push(format!("verify: {} profile fields still differ", residual.len()));
        }
    }

    for section in Section::ordered() {
        if !section.is_set_section() || !options.section_in_scope(section) {
            continue;
        }
        if let Some(plan) = adapter.plan_section(section, profile, &snapshot)
            && !plan.is_empty()
        {
            report.errors.push(format!(
                "verify: {} residual changes in {section}",
                plan.mutation_count()
            ));
        }
    }
}
