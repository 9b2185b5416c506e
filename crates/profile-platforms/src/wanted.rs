//! Wanted — structured-API adapter.
//!
//! Wanted exposes resume-management endpoints with granular CRUD, so this
//! adapter supports every section. Remote calls go through an injected
//! [`ResumeApi`] client; the adapter translates canonical records into
//! Wanted's vocabulary (tag ids, job category ids, wire dates) and applies
//! plans item by item with pacing between mutating calls.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use profile_diff::{FieldChange, compute_set_diff, match_career, match_certification, match_education};
use profile_model::{CanonicalProfile, CareerEntry, RemoteSnapshot, normalize_phone, parse_period};
use profile_skills::{SkillCatalog, diff_skills};

use crate::adapter::{
    Capabilities, FetchOutcome, PlanAdd, PlanDelete, PlanUpdate, Platform, PlatformAdapter,
    Section, SectionOutcome, SetPlan, with_timeout,
};
use crate::client::ResumeApi;
use crate::error::{Error, Result};

/// Wanted job category ids by canonical role name.
const JOB_CATEGORIES: [(&str, i64); 17] = [
    ("보안운영 담당", 672),
    ("보안 엔지니어", 672),
    ("보안엔지니어", 672),
    ("정보보안", 672),
    ("인프라 엔지니어", 674),
    ("인프라 담당", 674),
    ("DevOps", 674),
    ("SRE", 674),
    ("SRE Engineer", 674),
    ("클라우드 엔지니어", 674),
    ("시스템 엔지니어", 665),
    ("네트워크 엔지니어", 665),
    ("IT지원/OA운영", 665),
    ("IT 운영", 665),
    ("Backend Developer", 872),
    ("백엔드 개발자", 872),
    ("서버 개발자", 872),
];

/// Fallback category for roles the mapping does not know.
const DEFAULT_JOB_CATEGORY: i64 = 674;

const DEFAULT_PACING: Duration = Duration::from_millis(500);
const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

fn job_category_id(role: &str) -> i64 {
    match JOB_CATEGORIES.iter().find(|(name, _)| *name == role) {
        Some((_, id)) => *id,
        None => {
            warn!(role, category = DEFAULT_JOB_CATEGORY, "unknown role, using default job category");
            DEFAULT_JOB_CATEGORY
        }
    }
}

/// Map a canonical career entry into Wanted's career payload.
fn career_payload(career: &CareerEntry) -> Value {
    let period = parse_period(&career.period);
    json!({
        "company": { "name": career.company, "type": "CUSTOM" },
        "job_role": career.role,
        "job_category_id": job_category_id(&career.role),
        "start_time": period.starts_at,
        "end_time": period.ends_at,
        "served": period.ends_at.is_none(),
        "employment_type": "FULLTIME",
        "projects": [{ "title": career.project, "description": career.description }],
    })
}

/// Structured-API adapter for wanted.co.kr.
pub struct WantedAdapter<A: ResumeApi> {
    api: A,
    catalog: SkillCatalog,
    pacing: Duration,
    call_timeout: Duration,
}

impl<A: ResumeApi> WantedAdapter<A> {
    pub fn new(api: A, catalog: SkillCatalog) -> Self {
        Self {
            api,
            catalog,
            pacing: DEFAULT_PACING,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Override the delay between successive mutating calls.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Override the per-call timeout.
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    async fn pace(&self) {
        if !self.pacing.is_zero() {
            tokio::time::sleep(self.pacing).await;
        }
    }

    fn plan_skills(&self, canonical: &CanonicalProfile, snapshot: &RemoteSnapshot) -> SetPlan {
        let flat = SkillCatalog::flatten(&canonical.skills);
        let diff = diff_skills(&self.catalog, &flat, &snapshot.skills);

        SetPlan {
            to_add: diff
                .to_add
                .into_iter()
                .map(|a| PlanAdd {
                    label: format!("{} (tagId: {})", a.name, a.tag_type_id),
                    payload: json!({ "tag_type_id": a.tag_type_id }),
                })
                .collect(),
            to_update: Vec::new(),
            to_delete: diff
                .to_delete
                .into_iter()
                .map(|s| PlanDelete {
                    remote_id: s.id,
                    label: s.name,
                })
                .collect(),
            unchanged: diff.unchanged,
            unmapped: diff.unmapped,
        }
    }

    fn plan_careers(&self, canonical: &CanonicalProfile, snapshot: &RemoteSnapshot) -> SetPlan {
        let diff = compute_set_diff(
            &canonical.careers,
            &snapshot.careers,
            |c, remote| match_career(c, remote).map(|r| r.id),
            |r| r.id,
            |c, r| {
                let period = parse_period(&c.period);
                r.role == c.role && r.start_time == period.starts_at && r.end_time == period.ends_at
            },
            career_payload,
            |c| format!("{}: {}", c.company, c.role),
        );
        set_diff_to_plan(diff)
    }

    fn plan_education(&self, canonical: &CanonicalProfile, snapshot: &RemoteSnapshot) -> SetPlan {
        let records = std::slice::from_ref(&canonical.education);
        let diff = compute_set_diff(
            records,
            &snapshot.educations,
            |e, remote| match_education(e, remote).map(|r| r.id),
            |r| r.id,
            |e, r| r.major == e.major,
            |e| {
                json!({
                    "school_name": e.school,
                    "major": e.major,
                    "start_time": parse_period(&e.start_date).starts_at,
                    "end_time": null,
                    "degree": "학사",
                })
            },
            |e| format!("{}: {}", e.school, e.major),
        );
        set_diff_to_plan(diff)
    }

    fn plan_activities(&self, canonical: &CanonicalProfile, snapshot: &RemoteSnapshot) -> SetPlan {
        let diff = compute_set_diff(
            &canonical.certifications,
            &snapshot.activities,
            |c, remote| match_certification(c, remote).map(|r| r.id),
            |r| r.id,
            // Title containment is the whole identity; existing
            // activities are never rewritten.
            |_, _| true,
            |c| {
                json!({
                    "title": c.name,
                    "description": format!("{} | {}", c.issuer, c.date),
                    "start_time": parse_period(&c.date).starts_at,
                    "activity_type": "CERTIFICATE",
                })
            },
            |c| format!("{} ({})", c.name, c.issuer),
        );
        set_diff_to_plan(diff)
    }

    async fn apply_one_field(
        &self,
        resume_id: Option<&str>,
        change: &FieldChange,
    ) -> Result<()> {
        match change.field.as_str() {
            "name" | "description" => {
                with_timeout(
                    self.call_timeout,
                    self.api.update_profile_field(&change.field, &change.to),
                )
                .await
            }
            _ => {
                let resume_id = resume_id.ok_or(Error::MissingContainer)?;
                with_timeout(
                    self.call_timeout,
                    self.api.update_resume_field(resume_id, &change.field, &change.to),
                )
                .await
            }
        }
    }

    async fn apply_add(&self, resume_id: &str, section: Section, add: &PlanAdd) -> Result<()> {
        match section {
            Section::Skills => {
                let tag_type_id = add
                    .payload
                    .get("tag_type_id")
                    .and_then(Value::as_i64)
                    .ok_or_else(|| Error::MalformedPayload(format!("no tag_type_id for {}", add.label)))?;
                with_timeout(self.call_timeout, self.api.add_skill(resume_id, tag_type_id)).await
            }
            Section::Careers => {
                with_timeout(self.call_timeout, self.api.add_career(resume_id, &add.payload)).await
            }
            Section::Education => {
                with_timeout(self.call_timeout, self.api.add_education(resume_id, &add.payload))
                    .await
            }
            Section::Activities => {
                with_timeout(self.call_timeout, self.api.add_activity(resume_id, &add.payload))
                    .await
            }
            Section::Profile => Err(Error::MalformedPayload(
                "profile is not a set section".to_string(),
            )),
        }
    }

    async fn apply_update(
        &self,
        resume_id: &str,
        section: Section,
        update: &PlanUpdate,
    ) -> Result<()> {
        match section {
            Section::Careers => {
                with_timeout(
                    self.call_timeout,
                    self.api.update_career(resume_id, update.remote_id, &update.payload),
                )
                .await
            }
            Section::Education => {
                with_timeout(
                    self.call_timeout,
                    self.api.update_education(resume_id, update.remote_id, &update.payload),
                )
                .await
            }
            _ => Err(Error::MalformedPayload(format!(
                "section {section} has no update operation"
            ))),
        }
    }
}

fn set_diff_to_plan(diff: profile_diff::SetDiff<Value>) -> SetPlan {
    SetPlan {
        to_add: diff
            .to_add
            .into_iter()
            .map(|a| PlanAdd {
                label: a.label,
                payload: a.data,
            })
            .collect(),
        to_update: diff
            .to_update
            .into_iter()
            .map(|u| PlanUpdate {
                remote_id: u.remote_id,
                label: u.label,
                payload: u.new_data,
            })
            .collect(),
        to_delete: Vec::new(),
        unchanged: diff.unchanged,
        unmapped: Vec::new(),
    }
}

#[async_trait]
impl<A: ResumeApi> PlatformAdapter for WantedAdapter<A> {
    fn platform(&self) -> Platform {
        Platform::Wanted
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            structured_sections: true,
        }
    }

    async fn fetch_profile(&mut self) -> Result<FetchOutcome> {
        let profile = match with_timeout(self.call_timeout, self.api.get_profile()).await {
            Ok(profile) => profile,
            Err(Error::Unauthorized) => return Ok(FetchOutcome::AuthRequired),
            Err(e) => return Err(e),
        };
        // An empty profile means the session cookie was silently rejected.
        if profile.name.is_empty() {
            return Ok(FetchOutcome::AuthRequired);
        }

        let mut snapshot = RemoteSnapshot {
            skills: profile.skills,
            ..RemoteSnapshot::default()
        };
        snapshot.fields.insert("name".to_string(), profile.name);
        snapshot
            .fields
            .insert("description".to_string(), profile.description);

        let resumes = match with_timeout(self.call_timeout, self.api.get_resume_list()).await {
            Ok(resumes) => resumes,
            Err(Error::Unauthorized) => return Ok(FetchOutcome::AuthRequired),
            Err(e) => return Err(e),
        };

        if let Some(resume_id) = resumes.into_iter().next() {
            let detail =
                match with_timeout(self.call_timeout, self.api.get_resume_detail(&resume_id)).await
                {
                    Ok(detail) => detail,
                    Err(Error::Unauthorized) => return Ok(FetchOutcome::AuthRequired),
                    Err(e) => return Err(e),
                };
            snapshot.fields.insert("about".to_string(), detail.about);
            snapshot.fields.insert("email".to_string(), detail.email);
            snapshot.fields.insert("mobile".to_string(), detail.mobile);
            snapshot.careers = detail.careers;
            snapshot.educations = detail.educations;
            snapshot.activities = detail.activities;
            snapshot.resume_id = Some(resume_id);
        } else {
            warn!("no resume container found; structured sections will be skipped");
        }

        Ok(FetchOutcome::Snapshot(snapshot))
    }

    fn map_profile_fields(&self, canonical: &CanonicalProfile) -> BTreeMap<String, String> {
        let mut fields = BTreeMap::new();
        fields.insert("name".to_string(), canonical.personal.name.clone());
        fields.insert(
            "description".to_string(),
            format!(
                "{} | {}",
                canonical.current.position, canonical.summary.total_experience
            ),
        );
        fields.insert(
            "about".to_string(),
            canonical.summary.profile_statement.clone(),
        );
        fields.insert("email".to_string(), canonical.personal.email.clone());
        fields.insert(
            "mobile".to_string(),
            normalize_phone(&canonical.personal.phone),
        );
        fields
    }

    fn plan_section(
        &self,
        section: Section,
        canonical: &CanonicalProfile,
        snapshot: &RemoteSnapshot,
    ) -> Option<SetPlan> {
        let plan = match section {
            Section::Skills => self.plan_skills(canonical, snapshot),
            Section::Careers => self.plan_careers(canonical, snapshot),
            Section::Education => self.plan_education(canonical, snapshot),
            Section::Activities => self.plan_activities(canonical, snapshot),
            Section::Profile => return None,
        };
        Some(plan)
    }

    async fn apply_field_changes(
        &mut self,
        snapshot: &RemoteSnapshot,
        changes: &[FieldChange],
    ) -> SectionOutcome {
        let mut outcome = SectionOutcome::default();
        let resume_id = snapshot.resume_id.as_deref();

        for change in changes {
            match self.apply_one_field(resume_id, change).await {
                Ok(()) => {
                    info!(field = %change.field, "updated profile field");
                    outcome.updated += 1;
                }
                Err(Error::MissingContainer) => {
                    warn!(field = %change.field, "no resume container; field skipped");
                    outcome.skipped += 1;
                }
                Err(e) => outcome.record_failure(&change.field, &e),
            }
            self.pace().await;
        }
        outcome
    }

    async fn apply_set_changes(
        &mut self,
        snapshot: &RemoteSnapshot,
        section: Section,
        plan: &SetPlan,
    ) -> SectionOutcome {
        let mut outcome = SectionOutcome::default();

        let Some(resume_id) = snapshot.resume_id.clone() else {
            warn!(%section, "no resume container; section skipped");
            outcome.skipped = plan.mutation_count();
            return outcome;
        };

        for add in &plan.to_add {
            match self.apply_add(&resume_id, section, add).await {
                Ok(()) => {
                    info!(%section, item = %add.label, "added");
                    outcome.added += 1;
                }
                Err(e) => outcome.record_failure(&add.label, &e),
            }
            self.pace().await;
        }

        for update in &plan.to_update {
            match self.apply_update(&resume_id, section, update).await {
                Ok(()) => {
                    info!(%section, item = %update.label, "updated");
                    outcome.updated += 1;
                }
                Err(e) => outcome.record_failure(&update.label, &e),
            }
            self.pace().await;
        }

        for delete in &plan.to_delete {
            debug_assert_eq!(section, Section::Skills);
            match with_timeout(
                self.call_timeout,
                self.api.delete_skill(&resume_id, delete.remote_id),
            )
            .await
            {
                Ok(()) => {
                    info!(%section, item = %delete.label, "deleted");
                    outcome.deleted += 1;
                }
                Err(e) => outcome.record_failure(&delete.label, &e),
            }
            self.pace().await;
        }

        debug!(%section, ?outcome, "set apply finished");
        outcome
    }
}
