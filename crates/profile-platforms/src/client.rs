//! Injected transport seams.
//!
//! Transports are external collaborators: HTTP plumbing, rate limiting,
//! and browser-session pooling live outside this engine. The adapters
//! consume these traits; production wires real clients in, tests wire
//! in-memory fakes. Session credentials are read-only inputs supplied at
//! client construction — the engine never rotates or persists them.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use profile_model::{RemoteActivity, RemoteCareer, RemoteEducation, RemoteSkill};

use crate::error::Result;

/// The coarse half of a structured platform's profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiProfile {
    pub name: String,
    /// The profile introduction / description text.
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skills: Vec<RemoteSkill>,
}

/// The structured resume container behind a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResumeDetail {
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub careers: Vec<RemoteCareer>,
    #[serde(default)]
    pub educations: Vec<RemoteEducation>,
    #[serde(default)]
    pub activities: Vec<RemoteActivity>,
}

/// Authenticated client for a structured platform's resume-management
/// endpoints.
///
/// Every method is one remote call. `Error::Unauthorized` is the expected
/// signal for a rejected or missing session.
#[async_trait]
pub trait ResumeApi: Send + Sync {
    /// Fetch the account profile (coarse fields + skill list).
    async fn get_profile(&self) -> Result<ApiProfile>;

    /// List resume container ids, newest first.
    async fn get_resume_list(&self) -> Result<Vec<String>>;

    /// Fetch the structured sections of one resume container.
    async fn get_resume_detail(&self, resume_id: &str) -> Result<ApiResumeDetail>;

    /// Update one coarse profile field (`name`, `description`).
    async fn update_profile_field(&self, field: &str, value: &str) -> Result<()>;

    /// Update one resume-level scalar field (`about`, `email`, `mobile`).
    async fn update_resume_field(&self, resume_id: &str, field: &str, value: &str) -> Result<()>;

    async fn add_skill(&self, resume_id: &str, tag_type_id: i64) -> Result<()>;

    async fn delete_skill(&self, resume_id: &str, skill_id: i64) -> Result<()>;

    async fn add_career(&self, resume_id: &str, payload: &Value) -> Result<()>;

    async fn update_career(&self, resume_id: &str, career_id: i64, payload: &Value) -> Result<()>;

    async fn add_education(&self, resume_id: &str, payload: &Value) -> Result<()>;

    async fn update_education(
        &self,
        resume_id: &str,
        education_id: i64,
        payload: &Value,
    ) -> Result<()>;

    async fn add_activity(&self, resume_id: &str, payload: &Value) -> Result<()>;
}

/// A live browser page against one platform's web UI.
///
/// Owned exclusively by one platform's adapter for the duration of that
/// platform's processing — never shared across sections or platforms.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Navigate and wait for the page to settle.
    async fn goto(&mut self, url: &str) -> Result<()>;

    /// The URL after redirects; login pages are detected from it.
    fn current_url(&self) -> String;

    /// Read the scalar fields addressed by a selector map. Selectors with
    /// no matching element are simply absent from the result.
    async fn read_fields(
        &mut self,
        selectors: &BTreeMap<String, String>,
    ) -> Result<BTreeMap<String, String>>;

    /// Fill one form element. `Ok(false)` means the element was not found.
    async fn fill_field(&mut self, selector: &str, value: &str) -> Result<bool>;

    /// Click the save control. `Ok(false)` means no save control was
    /// found, so the filled values may not persist.
    async fn save(&mut self) -> Result<bool>;
}
