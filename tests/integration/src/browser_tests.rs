//! Engine tests against the browser-automated platform family.

use std::time::Duration;

use pretty_assertions::assert_eq;

use profile_core::{PlatformStatus, SectionStatus, SyncEngine, SyncOptions};
use profile_platforms::{BrowserAdapter, BrowserPlatform, Platform};
use profile_test_utils::fixtures::sample_profile;
use profile_test_utils::session::ScriptedSession;

/// A JobKorea edit form where the name and phone already match the
/// canonical profile but the email and headline are stale.
fn stale_form() -> ScriptedSession {
    ScriptedSession::with_dom(&[
        ("#userName", "김민준"),
        ("#userEmail", "old@example.com"),
        ("#userPhone", "010-1234-5678"),
        ("#selfIntroduce", "SRE | 5년차"),
    ])
}

fn jobkorea_engine(session: ScriptedSession, options: SyncOptions) -> SyncEngine {
    let adapter = BrowserAdapter::new(BrowserPlatform::jobkorea(), session)
        .with_pacing(Duration::ZERO);
    let mut engine = SyncEngine::new(options);
    engine.register(Box::new(adapter));
    engine
}

#[tokio::test]
async fn dry_run_previews_form_changes_without_filling() {
    let session = stale_form();
    let handle = session.handle();

    let result = jobkorea_engine(session, SyncOptions::preview())
        .run(&sample_profile())
        .await;
    let report = &result.platforms[0];

    assert_eq!(report.platform, Platform::JobKorea);
    assert_eq!(report.status, PlatformStatus::Done);
    // email and headline diverge; name and phone already match.
    assert_eq!(report.changes.len(), 2);
    assert_eq!(report.sections["profile"].status, SectionStatus::Previewed);

    // Every structured section is out of reach for a browser platform.
    for section in ["skills", "careers", "education", "activities"] {
        assert_eq!(
            report.sections[section].status,
            SectionStatus::NotSupported
        );
    }

    let state = handle.lock().unwrap();
    assert!(state.filled.is_empty());
    assert_eq!(state.saves, 0);
}

#[tokio::test]
async fn apply_fills_stale_fields_and_saves_once() {
    let session = stale_form();
    let handle = session.handle();

    let result = jobkorea_engine(session, SyncOptions::apply())
        .run(&sample_profile())
        .await;
    let report = &result.platforms[0];

    assert!(report.success);
    assert_eq!(report.sections["profile"].updated, 2);

    let state = handle.lock().unwrap();
    assert!(state.filled.contains(&(
        "#userEmail".to_string(),
        "minjun.kim@example.com".to_string()
    )));
    assert!(state.filled.contains(&(
        "#selfIntroduce".to_string(),
        "DevOps | 8년차".to_string()
    )));
    assert_eq!(state.filled.len(), 2);
    assert_eq!(state.saves, 1);
}

#[tokio::test]
async fn run_future_moves_across_task_boundaries() {
    // tokio::spawn accepts only Send futures, so this stops compiling if
    // an adapter future captures state that is not Sync.
    let session = stale_form();
    let handle = session.handle();
    let mut engine = jobkorea_engine(session, SyncOptions::apply());

    let result = tokio::spawn(async move { engine.run(&sample_profile()).await })
        .await
        .unwrap();

    assert_eq!(result.platforms[0].status, PlatformStatus::Done);
    assert_eq!(handle.lock().unwrap().saves, 1);
}

#[tokio::test]
async fn login_redirect_skips_platform() {
    let session = ScriptedSession::login_wall();
    let handle = session.handle();

    let result = jobkorea_engine(session, SyncOptions::apply())
        .run(&sample_profile())
        .await;
    let report = &result.platforms[0];

    assert_eq!(report.status, PlatformStatus::SkippedAuth);
    assert!(handle.lock().unwrap().filled.is_empty());
}

#[tokio::test]
async fn vanished_element_is_skipped_not_failed() {
    let session = stale_form();
    session.remove_element("#userEmail");

    let result = jobkorea_engine(session, SyncOptions::apply())
        .run(&sample_profile())
        .await;
    let report = &result.platforms[0];

    let section = &report.sections["profile"];
    assert_eq!(section.updated, 1);
    assert_eq!(section.skipped, 1);
    assert_eq!(section.failed, 0);
    assert!(report.success);
}

#[tokio::test]
async fn missing_save_control_is_reported() {
    let session = stale_form();
    session.fail_save();

    let result = jobkorea_engine(session, SyncOptions::apply())
        .run(&sample_profile())
        .await;
    let report = &result.platforms[0];

    let section = &report.sections["profile"];
    assert_eq!(section.updated, 2);
    assert!(
        section
            .errors
            .iter()
            .any(|e| e.contains("save control not found"))
    );
}
