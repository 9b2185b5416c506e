//! Scriptable in-memory [`BrowserSession`] fake.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use profile_platforms::{BrowserSession, Result};

/// The fake page state.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// CSS selector → current element value.
    pub dom: BTreeMap<String, String>,
    /// Selectors that resolve to no element.
    pub missing: BTreeSet<String>,
    /// Bounce every navigation to a login page.
    pub login_wall: bool,
    /// Whether clicking save finds a save control.
    pub save_succeeds: bool,
    pub current_url: String,
    /// Every fill made, in order, as `(selector, value)`.
    pub filled: Vec<(String, String)>,
    pub saves: usize,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            dom: BTreeMap::new(),
            missing: BTreeSet::new(),
            login_wall: false,
            save_succeeds: true,
            current_url: String::new(),
            filled: Vec::new(),
            saves: 0,
        }
    }
}

/// Scriptable browser page shared between a test and the adapter that owns
/// the session.
#[derive(Clone, Default)]
pub struct ScriptedSession {
    state: Arc<Mutex<SessionState>>,
}

impl ScriptedSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// A page pre-populated with element values.
    pub fn with_dom(pairs: &[(&str, &str)]) -> Self {
        let session = Self::new();
        {
            let mut state = session.lock();
            for (selector, value) in pairs {
                state.dom.insert(selector.to_string(), value.to_string());
            }
        }
        session
    }

    /// A session that gets bounced to the login page on every navigation.
    pub fn login_wall() -> Self {
        let session = Self::new();
        session.lock().login_wall = true;
        session
    }

    /// Script a selector to resolve to no element.
    pub fn remove_element(&self, selector: &str) {
        self.lock().missing.insert(selector.to_string());
    }

    /// Script the save control away.
    pub fn fail_save(&self) {
        self.lock().save_succeeds = false;
    }

    /// Handle for post-run inspection.
    pub fn handle(&self) -> Arc<Mutex<SessionState>> {
        Arc::clone(&self.state)
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap()
    }
}

#[async_trait]
impl BrowserSession for ScriptedSession {
    async fn goto(&mut self, url: &str) -> Result<()> {
        let mut state = self.lock();
        state.current_url = if state.login_wall {
            "https://www.example.com/login?next=resume".to_string()
        } else {
            url.to_string()
        };
        Ok(())
    }

    fn current_url(&self) -> String {
        self.lock().current_url.clone()
    }

    async fn read_fields(
        &mut self,
        selectors: &BTreeMap<String, String>,
    ) -> Result<BTreeMap<String, String>> {
        let state = self.lock();
        Ok(selectors
            .iter()
            .filter_map(|(field, selector)| {
                state
                    .dom
                    .get(selector)
                    .map(|value| (field.clone(), value.clone()))
            })
            .collect())
    }

    async fn fill_field(&mut self, selector: &str, value: &str) -> Result<bool> {
        let mut state = self.lock();
        if state.missing.contains(selector) {
            return Ok(false);
        }
        state.dom.insert(selector.to_string(), value.to_string());
        state.filled.push((selector.to_string(), value.to_string()));
        Ok(true)
    }

    async fn save(&mut self) -> Result<bool> {
        let mut state = self.lock();
        state.saves += 1;
        Ok(state.save_succeeds)
    }
}
