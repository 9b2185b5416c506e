//! End-to-end engine tests against the structured-API platform.
//!
//! These exercise the complete flow: fetch -> diff -> preview/apply ->
//! verify, through a scriptable in-memory API client.

use std::collections::BTreeSet;
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::Value;

use profile_core::{PlatformStatus, SectionStatus, SyncEngine, SyncOptions};
use profile_model::{RemoteCareer, RemoteSkill};
use profile_platforms::{
    ApiProfile, ApiResumeDetail, BrowserAdapter, BrowserPlatform, Platform, Result as ApiResult,
    ResumeApi, Section, WantedAdapter,
};
use profile_skills::SkillCatalog;
use profile_test_utils::api::InMemoryResumeApi;
use profile_test_utils::fixtures::sample_profile;
use profile_test_utils::session::ScriptedSession;

/// Remote state that diverges from [`sample_profile`] in every section:
/// three stale scalar fields, one missing and one stale skill, one missing
/// career, no education, no activities.
fn seeded_api() -> InMemoryResumeApi {
    InMemoryResumeApi::new().with_remote(
        ApiProfile {
            name: "김민준".to_string(),
            description: String::new(),
            skills: vec![
                RemoteSkill {
                    id: 1,
                    name: "AWS".to_string(),
                },
                RemoteSkill {
                    id: 2,
                    name: "Jenkins".to_string(),
                },
            ],
        },
        ApiResumeDetail {
            about: String::new(),
            email: "minjun.kim@example.com".to_string(),
            mobile: "010-1234-5678".to_string(),
            careers: vec![RemoteCareer {
                id: 10,
                company_name: "클라우드브릿지".to_string(),
                role: "DevOps".to_string(),
                start_time: "2021-03-01".to_string(),
                end_time: None,
            }],
            educations: Vec::new(),
            activities: Vec::new(),
        },
    )
}

/// Delegates to an [`InMemoryResumeApi`] but stalls adds of one skill tag
/// far past any reasonable per-call limit.
struct StalledSkillApi {
    inner: InMemoryResumeApi,
    stalled_tag: i64,
}

#[async_trait]
impl ResumeApi for StalledSkillApi {
    async fn get_profile(&self) -> ApiResult<ApiProfile> {
        self.inner.get_profile().await
    }

    async fn get_resume_list(&self) -> ApiResult<Vec<String>> {
        self.inner.get_resume_list().await
    }

    async fn get_resume_detail(&self, resume_id: &str) -> ApiResult<ApiResumeDetail> {
        self.inner.get_resume_detail(resume_id).await
    }

    async fn update_profile_field(&self, field: &str, value: &str) -> ApiResult<()> {
        self.inner.update_profile_field(field, value).await
    }

    async fn update_resume_field(
        &self,
        resume_id: &str,
        field: &str,
        value: &str,
    ) -> ApiResult<()> {
        self.inner.update_resume_field(resume_id, field, value).await
    }

    async fn add_skill(&self, resume_id: &str, tag_type_id: i64) -> ApiResult<()> {
        if tag_type_id == self.stalled_tag {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        self.inner.add_skill(resume_id, tag_type_id).await
    }

    async fn delete_skill(&self, resume_id: &str, skill_id: i64) -> ApiResult<()> {
        self.inner.delete_skill(resume_id, skill_id).await
    }

    async fn add_career(&self, resume_id: &str, payload: &Value) -> ApiResult<()> {
        self.inner.add_career(resume_id, payload).await
    }

    async fn update_career(
        &self,
        resume_id: &str,
        career_id: i64,
        payload: &Value,
    ) -> ApiResult<()> {
        self.inner.update_career(resume_id, career_id, payload).await
    }

    async fn add_education(&self, resume_id: &str, payload: &Value) -> ApiResult<()> {
        self.inner.add_education(resume_id, payload).await
    }

    async fn update_education(
        &self,
        resume_id: &str,
        education_id: i64,
        payload: &Value,
    ) -> ApiResult<()> {
        self.inner
            .update_education(resume_id, education_id, payload)
            .await
    }

    async fn add_activity(&self, resume_id: &str, payload: &Value) -> ApiResult<()> {
        self.inner.add_activity(resume_id, payload).await
    }
}

fn wanted_engine(api: &InMemoryResumeApi, options: SyncOptions) -> SyncEngine {
    let adapter = WantedAdapter::new(api.clone(), SkillCatalog::builtin())
        .with_pacing(Duration::ZERO);
    let mut engine = SyncEngine::new(options);
    engine.register(Box::new(adapter));
    engine
}

#[tokio::test]
async fn dry_run_reports_without_mutating() {
    let api = seeded_api();
    let result = wanted_engine(&api, SyncOptions::preview())
        .run(&sample_profile())
        .await;

    assert!(result.dry_run);
    assert_eq!(result.platforms.len(), 1);

    let report = &result.platforms[0];
    assert_eq!(report.platform, Platform::Wanted);
    assert_eq!(report.status, PlatformStatus::Done);
    // description, about, mobile diverge; name and email already match.
    assert_eq!(report.changes.len(), 3);

    let skills = &report.sections["skills"];
    assert_eq!(skills.status, SectionStatus::Previewed);
    assert_eq!(
        skills.preview.iter().filter(|l| l.starts_with('+')).count(),
        2
    );
    assert_eq!(
        skills.preview.iter().filter(|l| l.starts_with('-')).count(),
        1
    );

    assert_eq!(report.sections["careers"].status, SectionStatus::Previewed);
    assert_eq!(api.mutations(), 0);
}

#[tokio::test]
async fn apply_converges_on_second_run() {
    let api = seeded_api();
    let profile = sample_profile();

    let result = wanted_engine(&api, SyncOptions::apply()).run(&profile).await;
    let report = &result.platforms[0];
    assert!(report.success);
    assert_eq!(report.sections["profile"].updated, 3);
    assert_eq!(report.sections["skills"].added, 2);
    assert_eq!(report.sections["skills"].deleted, 1);
    assert_eq!(report.sections["careers"].added, 1);
    assert_eq!(report.sections["education"].added, 1);
    assert_eq!(report.sections["activities"].added, 1);

    let mutations_after_first = api.mutations();
    assert_eq!(mutations_after_first, 9);

    // Second sweep against the mutated remote state finds nothing to do.
    let second = wanted_engine(&api, SyncOptions::apply()).run(&profile).await;
    let report = &second.platforms[0];
    assert!(report.success);
    assert!(report.changes.is_empty());
    for section in report.sections.values() {
        assert_eq!(
            section.added + section.updated + section.deleted + section.failed,
            0
        );
    }
    assert_eq!(api.mutations(), mutations_after_first);
}

#[tokio::test]
async fn item_failure_does_not_abort_section_or_platform() {
    let api = seeded_api();
    api.fail_on("add_skill:2217"); // Docker

    let result = wanted_engine(&api, SyncOptions::apply())
        .run(&sample_profile())
        .await;
    let report = &result.platforms[0];

    let skills = &report.sections["skills"];
    assert_eq!(skills.added, 1);
    assert_eq!(skills.deleted, 1);
    assert_eq!(skills.failed, 1);
    assert!(skills.errors[0].contains("injected failure"));

    // Later sections still ran.
    assert_eq!(report.sections["careers"].added, 1);
    assert_eq!(report.sections["activities"].added, 1);

    assert_eq!(report.status, PlatformStatus::Done);
    assert!(!report.success);
}

#[tokio::test]
async fn five_adds_with_middle_failure_reports_four_added() {
    let api = InMemoryResumeApi::new().with_remote(
        ApiProfile {
            name: "김민준".to_string(),
            ..ApiProfile::default()
        },
        ApiResumeDetail::default(),
    );
    api.fail_on("add_skill:1459"); // Linux, the third add

    let mut profile = sample_profile();
    profile.skills.clear();
    profile.skills.insert(
        "all".to_string(),
        ["GCP", "Docker", "Linux", "Python", "Redis"]
            .map(String::from)
            .to_vec(),
    );

    let options = SyncOptions::apply().with_sections(BTreeSet::from([Section::Skills]));
    let result = wanted_engine(&api, options).run(&profile).await;
    let skills = &result.platforms[0].sections["skills"];

    assert_eq!(skills.added, 4);
    assert_eq!(skills.failed, 1);
    assert_eq!(api.mutations(), 4);
}

#[tokio::test]
async fn stalled_call_times_out_without_aborting_section() {
    let api = seeded_api();
    let slow = StalledSkillApi {
        inner: api.clone(),
        stalled_tag: 2217, // Docker
    };

    let adapter = WantedAdapter::new(slow, SkillCatalog::builtin())
        .with_pacing(Duration::ZERO)
        .with_call_timeout(Duration::from_millis(50));
    let mut engine = SyncEngine::new(SyncOptions::apply());
    engine.register(Box::new(adapter));

    let result = engine.run(&sample_profile()).await;
    let report = &result.platforms[0];

    let skills = &report.sections["skills"];
    assert_eq!(skills.failed, 1);
    assert!(
        skills.errors[0].contains("timed out"),
        "errors: {:?}",
        skills.errors
    );
    // The sibling add and the delete still landed.
    assert_eq!(skills.added, 1);
    assert_eq!(skills.deleted, 1);

    // Later sections still ran, and the stalled call never landed.
    assert_eq!(report.sections["careers"].added, 1);
    assert_eq!(api.mutations(), 8);

    assert_eq!(report.status, PlatformStatus::Done);
    assert!(!report.success);
}

#[tokio::test]
async fn expired_session_skips_platform_without_mutation() {
    let api = InMemoryResumeApi::unauthorized();
    let result = wanted_engine(&api, SyncOptions::apply())
        .run(&sample_profile())
        .await;

    let report = &result.platforms[0];
    assert_eq!(report.status, PlatformStatus::SkippedAuth);
    assert!(report.sections.is_empty());
    assert_eq!(api.mutations(), 0);
}

#[tokio::test]
async fn session_expiring_mid_fetch_skips_platform() {
    let api = seeded_api();
    api.expire_on("get_resume_detail:resume-1");

    let result = wanted_engine(&api, SyncOptions::apply())
        .run(&sample_profile())
        .await;
    let report = &result.platforms[0];

    assert_eq!(report.status, PlatformStatus::SkippedAuth);
    assert!(report.sections.is_empty());
    assert_eq!(api.mutations(), 0);
}

#[tokio::test]
async fn fetch_fault_fails_platform() {
    let api = seeded_api();
    api.fail_on("get_profile");

    let result = wanted_engine(&api, SyncOptions::apply())
        .run(&sample_profile())
        .await;
    let report = &result.platforms[0];

    assert_eq!(report.status, PlatformStatus::Failed);
    assert!(!report.success);
    assert!(!report.errors.is_empty());
    assert_eq!(api.mutations(), 0);
}

#[tokio::test]
async fn missing_resume_container_skips_structured_sections() {
    let api = seeded_api().without_resume();
    let result = wanted_engine(&api, SyncOptions::apply())
        .run(&sample_profile())
        .await;
    let report = &result.platforms[0];

    // Only the account-level fields can land; resume-level fields and all
    // structured sections are skipped, not failed.
    let profile_section = &report.sections["profile"];
    assert_eq!(profile_section.updated, 1);
    assert_eq!(profile_section.skipped, 3);

    let skills = &report.sections["skills"];
    assert_eq!(skills.added, 0);
    assert_eq!(skills.skipped, 3);

    assert!(report.success);
    assert_eq!(api.mutations(), 1);
}

#[tokio::test]
async fn verify_reports_residual_diff_after_failed_item() {
    let api = seeded_api();
    api.fail_on("add_skill:2217");

    let result = wanted_engine(&api, SyncOptions::apply().with_verify())
        .run(&sample_profile())
        .await;
    let report = &result.platforms[0];

    assert!(
        report
            .errors
            .iter()
            .any(|e| e.contains("residual changes in skills")),
        "errors: {:?}",
        report.errors
    );
    assert!(!report.success);
}

#[tokio::test]
async fn verify_passes_after_clean_apply() {
    let api = seeded_api();
    let result = wanted_engine(&api, SyncOptions::apply().with_verify())
        .run(&sample_profile())
        .await;
    let report = &result.platforms[0];

    assert!(report.errors.is_empty(), "errors: {:?}", report.errors);
    assert!(report.success);
}

#[tokio::test]
async fn section_scope_limits_processing() {
    let api = seeded_api();
    let options = SyncOptions::preview().with_sections(BTreeSet::from([Section::Skills]));
    let result = wanted_engine(&api, options).run(&sample_profile()).await;
    let report = &result.platforms[0];

    assert_eq!(
        report.sections.keys().collect::<Vec<_>>(),
        vec!["skills"]
    );
    assert!(report.changes.is_empty());
}

#[tokio::test]
async fn platform_scope_filters_registered_adapters() {
    let api = seeded_api();
    let mut engine = SyncEngine::new(
        SyncOptions::preview().with_platforms(vec![Platform::Wanted]),
    );
    engine.register(Box::new(
        WantedAdapter::new(api.clone(), SkillCatalog::builtin()).with_pacing(Duration::ZERO),
    ));
    engine.register(Box::new(
        BrowserAdapter::new(BrowserPlatform::jobkorea(), ScriptedSession::new())
            .with_pacing(Duration::ZERO),
    ));

    let result = engine.run(&sample_profile()).await;
    assert_eq!(result.platforms.len(), 1);
    assert_eq!(result.platforms[0].platform, Platform::Wanted);
}

#[tokio::test]
async fn mixed_platforms_are_processed_in_registration_order() {
    let api = seeded_api();
    let session = ScriptedSession::with_dom(&[("#userName", "김민준")]);

    let mut engine = SyncEngine::new(SyncOptions::preview());
    engine.register(Box::new(
        WantedAdapter::new(api.clone(), SkillCatalog::builtin()).with_pacing(Duration::ZERO),
    ));
    engine.register(Box::new(
        BrowserAdapter::new(BrowserPlatform::jobkorea(), session).with_pacing(Duration::ZERO),
    ));

    let result = engine.run(&sample_profile()).await;
    assert_eq!(result.platforms.len(), 2);
    assert_eq!(result.platforms[0].platform, Platform::Wanted);
    assert_eq!(result.platforms[1].platform, Platform::JobKorea);
    assert_eq!(result.summary_lines().len(), 2);
}
