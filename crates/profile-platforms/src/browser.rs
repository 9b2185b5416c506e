//! Browser-automation adapter family.
//!
//! JobKorea and Saramin expose no usable resume API, so their profiles are
//! updated by driving the web UI through an injected [`BrowserSession`].
//! The family supports only coarse field-level form updates; set-reconciled
//! sections are reported as not supported and skipped, never attempted.
//!
//! One generic adapter covers the whole family: each platform contributes
//! a [`BrowserPlatform`] value (URLs, field → selector map, field mapping),
//! the same way schema-defined tools describe themselves to a generic
//! integration.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use profile_diff::FieldChange;
use profile_model::{CanonicalProfile, RemoteSnapshot};

use crate::adapter::{
    Capabilities, FetchOutcome, Platform, PlatformAdapter, Section, SectionOutcome, SetPlan,
    with_timeout,
};
use crate::client::BrowserSession;
use crate::error::Result;

const DEFAULT_PACING: Duration = Duration::from_millis(500);
const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(60);

/// URL substrings that mean the platform bounced us to a login page.
const LOGIN_MARKERS: [&str; 2] = ["login", "auth"];

/// Static description of one browser-automated platform.
#[derive(Debug, Clone)]
pub struct BrowserPlatform {
    pub platform: Platform,
    pub profile_url: &'static str,
    pub edit_url: &'static str,
    /// Field name → CSS selector on the edit form.
    pub selectors: BTreeMap<String, String>,
    /// Pure canonical → coarse-field mapping for this platform.
    pub map_fields: fn(&CanonicalProfile) -> BTreeMap<String, String>,
}

fn selector_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(field, selector)| (field.to_string(), selector.to_string()))
        .collect()
}

fn identity_fields(canonical: &CanonicalProfile) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    fields.insert("name".to_string(), canonical.personal.name.clone());
    fields.insert("email".to_string(), canonical.personal.email.clone());
    fields.insert("phone".to_string(), canonical.personal.phone.clone());
    fields.insert(
        "headline".to_string(),
        format!(
            "{} | {}",
            canonical.current.position, canonical.summary.total_experience
        ),
    );
    fields
}

impl BrowserPlatform {
    pub fn jobkorea() -> Self {
        Self {
            platform: Platform::JobKorea,
            profile_url: "https://www.jobkorea.co.kr/User/Mng/Resume/ResumeList",
            edit_url: "https://www.jobkorea.co.kr/User/Resume/RegResume",
            selectors: selector_map(&[
                ("name", "#userName"),
                ("email", "#userEmail"),
                ("phone", "#userPhone"),
                ("headline", "#selfIntroduce"),
            ]),
            map_fields: identity_fields,
        }
    }

    pub fn saramin() -> Self {
        Self {
            platform: Platform::Saramin,
            profile_url: "https://www.saramin.co.kr/zf_user/member/info",
            edit_url: "https://www.saramin.co.kr/zf_user/resume/write",
            selectors: selector_map(&[
                ("name", "#name"),
                ("email", "#email"),
                ("phone", "#phone"),
                ("headline", "#selfIntro"),
            ]),
            map_fields: identity_fields,
        }
    }
}

/// Generic adapter driving a platform's web UI through a browser session.
///
/// The session is owned exclusively for the duration of this platform's
/// processing and dropped with the adapter.
pub struct BrowserAdapter<S: BrowserSession> {
    config: BrowserPlatform,
    session: S,
    call_timeout: Duration,
    pacing: Duration,
}

impl<S: BrowserSession> BrowserAdapter<S> {
    pub fn new(config: BrowserPlatform, session: S) -> Self {
        Self {
            config,
            session,
            call_timeout: DEFAULT_CALL_TIMEOUT,
            pacing: DEFAULT_PACING,
        }
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    async fn pace(&self) {
        if !self.pacing.is_zero() {
            tokio::time::sleep(self.pacing).await;
        }
    }

    fn redirected_to_login(&self) -> bool {
        let url = self.session.current_url().to_lowercase();
        LOGIN_MARKERS.iter().any(|marker| url.contains(marker))
    }
}

#[async_trait]
impl<S: BrowserSession> PlatformAdapter for BrowserAdapter<S> {
    fn platform(&self) -> Platform {
        self.config.platform
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            structured_sections: false,
        }
    }

    async fn fetch_profile(&mut self) -> Result<FetchOutcome> {
        with_timeout(self.call_timeout, self.session.goto(self.config.profile_url)).await?;

        if self.redirected_to_login() {
            info!(platform = %self.config.platform, "redirected to login; session expired");
            return Ok(FetchOutcome::AuthRequired);
        }

        let fields =
            with_timeout(self.call_timeout, self.session.read_fields(&self.config.selectors))
                .await?;
        Ok(FetchOutcome::Snapshot(RemoteSnapshot::coarse(fields)))
    }

    fn map_profile_fields(&self, canonical: &CanonicalProfile) -> BTreeMap<String, String> {
        (self.config.map_fields)(canonical)
    }

    fn plan_section(
        &self,
        _section: Section,
        _canonical: &CanonicalProfile,
        _snapshot: &RemoteSnapshot,
    ) -> Option<SetPlan> {
        // Coarse form updates only; granular CRUD is not supported.
        None
    }

    async fn apply_field_changes(
        &mut self,
        _snapshot: &RemoteSnapshot,
        changes: &[FieldChange],
    ) -> SectionOutcome {
        let mut outcome = SectionOutcome::default();
        if changes.is_empty() {
            return outcome;
        }

        if let Err(e) =
            with_timeout(self.call_timeout, self.session.goto(self.config.edit_url)).await
        {
            // Without the edit form nothing can be filled; every change
            // counts as failed.
            for change in changes {
                outcome.record_failure(&change.field, &e);
            }
            return outcome;
        }

        for change in changes {
            let Some(selector) = self.config.selectors.get(&change.field) else {
                warn!(field = %change.field, "no selector for field");
                outcome.skipped += 1;
                continue;
            };

            match with_timeout(
                self.call_timeout,
                self.session.fill_field(selector, &change.to),
            )
            .await
            {
                Ok(true) => {
                    info!(field = %change.field, "filled form field");
                    outcome.updated += 1;
                }
                Ok(false) => {
                    warn!(field = %change.field, selector = %selector, "element not found");
                    outcome.skipped += 1;
                }
                Err(e) => outcome.record_failure(&change.field, &e),
            }
            self.pace().await;
        }

        match with_timeout(self.call_timeout, self.session.save()).await {
            Ok(true) => info!(platform = %self.config.platform, "changes saved"),
            Ok(false) => {
                warn!(platform = %self.config.platform, "save control not found");
                outcome
                    .errors
                    .push("save control not found; filled values may not persist".to_string());
            }
            Err(e) => outcome.record_failure("save", &e),
        }

        outcome
    }

    async fn apply_set_changes(
        &mut self,
        _snapshot: &RemoteSnapshot,
        section: Section,
        plan: &SetPlan,
    ) -> SectionOutcome {
        warn!(%section, "set-level CRUD not supported by browser adapter");
        SectionOutcome {
            skipped: plan.mutation_count(),
            ..SectionOutcome::default()
        }
    }
}
