//! Shared-password login with in-memory sessions.
//!
//! There are no user accounts. A correct password issues a random session
//! token; tokens live only as long as the process.

use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::backend::domain::commands::auth::LoginResult;

#[derive(Clone)]
pub struct AuthService {
    password: String,
    sessions: Arc<RwLock<HashSet<String>>>,
}

impl AuthService {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            sessions: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    /// Check the password and open a session on an exact match.
    pub async fn login(&self, password: &str) -> LoginResult {
        if password.is_empty() || password != self.password {
            warn!("Login rejected: incorrect password");
            return LoginResult {
                session_token: None,
                message: "パスワードが違います".to_string(),
            };
        }

        let token = Uuid::new_v4().to_string();
        self.sessions.write().await.insert(token.clone());
        info!("Login accepted, {} active sessions", self.sessions.read().await.len());

        LoginResult {
            session_token: Some(token),
            message: "ログインしました".to_string(),
        }
    }

    pub async fn is_authenticated(&self, token: &str) -> bool {
        self.sessions.read().await.contains(token)
    }

    /// Forget a session. Unknown tokens are ignored.
    pub async fn logout(&self, token: &str) {
        if self.sessions.write().await.remove(token) {
            info!("Session closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_login_issues_session() {
        let auth = AuthService::new("secret");

        let result = auth.login("secret").await;

        assert!(result.is_success());
        let token = result.session_token.unwrap();
        assert!(auth.is_authenticated(&token).await);
    }

    #[tokio::test]
    async fn test_login_is_exact_match() {
        let auth = AuthService::new("secret");

        for attempt in ["Secret", "secret ", "", "wrong"] {
            let result = auth.login(attempt).await;
            assert!(!result.is_success(), "'{}' should be rejected", attempt);
            assert_eq!(result.message, "パスワードが違います");
        }
    }

    #[tokio::test]
    async fn test_logout_and_unknown_tokens() {
        let auth = AuthService::new("secret");
        let token = auth.login("secret").await.session_token.unwrap();

        assert!(!auth.is_authenticated("not-a-session").await);
        auth.logout(&token).await;
        assert!(!auth.is_authenticated(&token).await);
        auth.logout(&token).await;
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let auth = AuthService::new("secret");
        let first = auth.login("secret").await.session_token.unwrap();
        let second = auth.login("secret").await.session_token.unwrap();

        assert_ne!(first, second);
        auth.logout(&first).await;
        assert!(auth.is_authenticated(&second).await);
    }
}
