//! Session management for logged-in users
//!
//! Sessions are process-local: an opaque uuid token maps to the username it
//! was issued for. Credential checks stay in the account service; this
//! module only tracks who is logged in.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

/// Session manager for handling user sessions in memory
#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    sessions: Arc<Mutex<HashMap<String, String>>>,
}

impl SessionManager {
    /// Create a new session manager
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Create a new session for a user, returning the opaque token
    pub async fn create_session(&self, username: &str) -> String {
        info!("Creating session for user: {}", username);

        let token = Uuid::new_v4().to_string();
        let mut sessions = self.sessions.lock().await;
        sessions.insert(token.clone(), username.to_string());
        token
    }

    /// Resolve the username a token was issued for
    pub async fn username_for(&self, token: &str) -> Option<String> {
        let sessions = self.sessions.lock().await;
        sessions.get(token).cloned()
    }

    /// Delete a session, ending the login
    pub async fn delete_session(&self, token: &str) -> bool {
        let mut sessions = self.sessions.lock().await;
        sessions.remove(token).is_some()
    }
}
