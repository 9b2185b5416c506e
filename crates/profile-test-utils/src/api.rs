//! In-memory [`ResumeApi`] fake with scriptable failures.
//!
//! The fake holds its state behind an `Arc<Mutex<..>>` so a test can keep a
//! handle for post-run inspection after the adapter takes ownership of the
//! client. Mutating calls update the held state the way the real platform
//! would, so a second fetch-and-diff after a clean apply comes back empty.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::Value;

use profile_model::{RemoteActivity, RemoteCareer, RemoteEducation, RemoteSkill};
use profile_platforms::{ApiProfile, ApiResumeDetail, Error, Result, ResumeApi};
use profile_skills::SkillCatalog;

/// Everything the fake platform remembers.
#[derive(Debug, Clone)]
pub struct ApiState {
    /// Reject every call with `Error::Unauthorized`.
    pub unauthorized: bool,
    pub profile: ApiProfile,
    pub resume_ids: Vec<String>,
    pub detail: ApiResumeDetail,
    /// Call keys that fail with an injected remote error, e.g.
    /// `"add_skill:2217"` or `"update_profile_field:name"`.
    pub fail_ops: BTreeSet<String>,
    /// Call keys that fail with `Error::Unauthorized`, simulating a
    /// session that expires partway through a fetch.
    pub expire_ops: BTreeSet<String>,
    /// Every call key seen, in order.
    pub calls: Vec<String>,
    /// Count of successful mutating calls.
    pub mutations: usize,
    next_id: i64,
}

impl Default for ApiState {
    fn default() -> Self {
        Self {
            unauthorized: false,
            profile: ApiProfile::default(),
            resume_ids: vec!["resume-1".to_string()],
            detail: ApiResumeDetail::default(),
            fail_ops: BTreeSet::new(),
            expire_ops: BTreeSet::new(),
            calls: Vec::new(),
            mutations: 0,
            next_id: 1000,
        }
    }
}

impl ApiState {
    fn alloc_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    /// Record a call and fail it if scripted to.
    fn gate(&mut self, op: String) -> Result<()> {
        self.calls.push(op.clone());
        if self.unauthorized || self.expire_ops.contains(&op) {
            return Err(Error::Unauthorized);
        }
        if self.fail_ops.contains(&op) {
            return Err(Error::remote(format!("injected failure for {op}")));
        }
        Ok(())
    }
}

/// Scriptable in-memory structured-platform client.
#[derive(Clone, Default)]
pub struct InMemoryResumeApi {
    state: Arc<Mutex<ApiState>>,
}

impl InMemoryResumeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// A client whose session is rejected on every call.
    pub fn unauthorized() -> Self {
        let api = Self::new();
        api.lock().unauthorized = true;
        api
    }

    /// Seed the remote account state.
    pub fn with_remote(self, profile: ApiProfile, detail: ApiResumeDetail) -> Self {
        {
            let mut state = self.lock();
            state.profile = profile;
            state.detail = detail;
        }
        self
    }

    /// Drop the resume container, leaving only the coarse profile.
    pub fn without_resume(self) -> Self {
        self.lock().resume_ids.clear();
        self
    }

    /// Script one call key to fail with a remote error.
    pub fn fail_on(&self, op: &str) {
        self.lock().fail_ops.insert(op.to_string());
    }

    /// Script one call key to be rejected as unauthorized.
    pub fn expire_on(&self, op: &str) {
        self.lock().expire_ops.insert(op.to_string());
    }

    /// Handle for post-run inspection.
    pub fn handle(&self) -> Arc<Mutex<ApiState>> {
        Arc::clone(&self.state)
    }

    pub fn mutations(&self) -> usize {
        self.lock().mutations
    }

    fn lock(&self) -> MutexGuard<'_, ApiState> {
        self.state.lock().unwrap()
    }
}

#[async_trait]
impl ResumeApi for InMemoryResumeApi {
    async fn get_profile(&self) -> Result<ApiProfile> {
        let mut state = self.lock();
        state.gate("get_profile".to_string())?;
        Ok(state.profile.clone())
    }

    async fn get_resume_list(&self) -> Result<Vec<String>> {
        let mut state = self.lock();
        state.gate("get_resume_list".to_string())?;
        Ok(state.resume_ids.clone())
    }

    async fn get_resume_detail(&self, resume_id: &str) -> Result<ApiResumeDetail> {
        let mut state = self.lock();
        state.gate(format!("get_resume_detail:{resume_id}"))?;
        Ok(state.detail.clone())
    }

    async fn update_profile_field(&self, field: &str, value: &str) -> Result<()> {
        let mut state = self.lock();
        state.gate(format!("update_profile_field:{field}"))?;
        match field {
            "name" => state.profile.name = value.to_string(),
            "description" => state.profile.description = value.to_string(),
            other => return Err(Error::remote(format!("unknown profile field {other}"))),
        }
        state.mutations += 1;
        Ok(())
    }

    async fn update_resume_field(&self, _resume_id: &str, field: &str, value: &str) -> Result<()> {
        let mut state = self.lock();
        state.gate(format!("update_resume_field:{field}"))?;
        match field {
            "about" => state.detail.about = value.to_string(),
            "email" => state.detail.email = value.to_string(),
            "mobile" => state.detail.mobile = value.to_string(),
            other => return Err(Error::remote(format!("unknown resume field {other}"))),
        }
        state.mutations += 1;
        Ok(())
    }

    async fn add_skill(&self, _resume_id: &str, tag_type_id: i64) -> Result<()> {
        let mut state = self.lock();
        state.gate(format!("add_skill:{tag_type_id}"))?;
        let name = SkillCatalog::builtin()
            .name_for(tag_type_id)
            .unwrap_or("unknown")
            .to_string();
        let id = state.alloc_id();
        state.profile.skills.push(RemoteSkill { id, name });
        state.mutations += 1;
        Ok(())
    }

    async fn delete_skill(&self, _resume_id: &str, skill_id: i64) -> Result<()> {
        let mut state = self.lock();
        state.gate(format!("delete_skill:{skill_id}"))?;
        state.profile.skills.retain(|s| s.id != skill_id);
        state.mutations += 1;
        Ok(())
    }

    async fn add_career(&self, _resume_id: &str, payload: &Value) -> Result<()> {
        let mut state = self.lock();
        let company = payload["company"]["name"].as_str().unwrap_or("").to_string();
        state.gate(format!("add_career:{company}"))?;
        let id = state.alloc_id();
        state.detail.careers.push(RemoteCareer {
            id,
            company_name: company,
            role: payload["job_role"].as_str().unwrap_or("").to_string(),
            start_time: payload["start_time"].as_str().unwrap_or("").to_string(),
            end_time: payload["end_time"].as_str().map(str::to_string),
        });
        state.mutations += 1;
        Ok(())
    }

    async fn update_career(&self, _resume_id: &str, career_id: i64, payload: &Value) -> Result<()> {
        let mut state = self.lock();
        state.gate(format!("update_career:{career_id}"))?;
        let career = state
            .detail
            .careers
            .iter_mut()
            .find(|c| c.id == career_id)
            .ok_or_else(|| Error::remote(format!("no career {career_id}")))?;
        career.role = payload["job_role"].as_str().unwrap_or("").to_string();
        career.start_time = payload["start_time"].as_str().unwrap_or("").to_string();
        career.end_time = payload["end_time"].as_str().map(str::to_string);
        state.mutations += 1;
        Ok(())
    }

    async fn add_education(&self, _resume_id: &str, payload: &Value) -> Result<()> {
        let mut state = self.lock();
        let school = payload["school_name"].as_str().unwrap_or("").to_string();
        state.gate(format!("add_education:{school}"))?;
        let id = state.alloc_id();
        state.detail.educations.push(RemoteEducation {
            id,
            school_name: school,
            major: payload["major"].as_str().unwrap_or("").to_string(),
        });
        state.mutations += 1;
        Ok(())
    }

    async fn update_education(
        &self,
        _resume_id: &str,
        education_id: i64,
        payload: &Value,
    ) -> Result<()> {
        let mut state = self.lock();
        state.gate(format!("update_education:{education_id}"))?;
        let education = state
            .detail
            .educations
            .iter_mut()
            .find(|e| e.id == education_id)
            .ok_or_else(|| Error::remote(format!("no education {education_id}")))?;
        education.major = payload["major"].as_str().unwrap_or("").to_string();
        state.mutations += 1;
        Ok(())
    }

    async fn add_activity(&self, _resume_id: &str, payload: &Value) -> Result<()> {
        let mut state = self.lock();
        let title = payload["title"].as_str().unwrap_or("").to_string();
        state.gate(format!("add_activity:{title}"))?;
        let id = state.alloc_id();
        state.detail.activities.push(RemoteActivity {
            id,
            title,
            description: payload["description"].as_str().unwrap_or("").to_string(),
        });
        state.mutations += 1;
        Ok(())
    }
}
