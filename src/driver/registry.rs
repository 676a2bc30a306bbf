use super::driver::ConversationDriver;
use anyhow::{bail, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Shared handle to one conversation; the mutex serializes its updates
pub type DriverHandle = Arc<Mutex<ConversationDriver>>;

/// Live conversations keyed by session id
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<String, DriverHandle>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a driver under its session id; fails if the id is taken
    pub async fn insert(&self, driver: ConversationDriver) -> Result<DriverHandle> {
        let session_id = driver.session().session_id().to_string();

        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session_id) {
            bail!("Session {} already exists", session_id);
        }

        let handle = Arc::new(Mutex::new(driver));
        sessions.insert(session_id, Arc::clone(&handle));
        Ok(handle)
    }

    pub async fn get(&self, session_id: &str) -> Option<DriverHandle> {
        self.sessions.read().await.get(session_id).cloned()
    }

    pub async fn contains(&self, session_id: &str) -> bool {
        self.sessions.read().await.contains_key(session_id)
    }

    pub async fn remove(&self, session_id: &str) -> Option<DriverHandle> {
        self.sessions.write().await.remove(session_id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
