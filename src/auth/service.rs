use std::collections::HashMap;
use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use super::{generate_jwt, validate_jwt, Claims, JwtError};
use crate::config::SecurityConfig;
use crate::database::models::{Author, AuthorId};
use crate::database::{DataStore, StoreError};

/// Who a request is acting as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub author_id: AuthorId,
    /// Superuser sessions bypass ownership checks
    pub is_elevated: bool,
}

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("Session token error: {0}")]
    Token(#[from] JwtError),

    #[error("Credential hash error: {0}")]
    Hash(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Session and credential port. The HTTP layer only ever sees the opaque
/// session token returned by `bind_session`.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a session token to an identity. Unknown, expired or revoked
    /// tokens resolve to `None`, not an error.
    async fn current_identity(&self, token: Option<&str>) -> Result<Option<Identity>, AuthServiceError>;

    /// Check a username/credential pair
    async fn verify(&self, username: &str, credential: &str) -> Result<Option<Author>, AuthServiceError>;

    /// Open a session for `author` and return its token
    async fn bind_session(&self, author: &Author) -> Result<String, AuthServiceError>;

    async fn clear_session(&self, token: &str) -> Result<(), AuthServiceError>;
}

/// Hash a plaintext credential into an argon2 PHC string
pub fn hash_password(password: &str) -> Result<String, AuthServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthServiceError::Hash(e.to_string()))
}

/// Registry entry: owning author and the token's `exp`
type SessionEntry = (AuthorId, i64);

/// Signed-cookie sessions backed by a server-side registry. Expired entries
/// are swept whenever a new session is bound.
pub struct SessionAuthService {
    store: Arc<dyn DataStore>,
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
    secret: String,
    expiry_hours: u64,
}

impl SessionAuthService {
    pub fn new(store: Arc<dyn DataStore>, secret: impl Into<String>, expiry_hours: u64) -> Self {
        Self {
            store,
            sessions: RwLock::new(HashMap::new()),
            secret: secret.into(),
            expiry_hours,
        }
    }

    pub fn from_config(store: Arc<dyn DataStore>, security: &SecurityConfig) -> Self {
        Self::new(store, security.session_secret.clone(), security.session_expiry_hours)
    }

    pub async fn active_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl AuthService for SessionAuthService {
    async fn current_identity(&self, token: Option<&str>) -> Result<Option<Identity>, AuthServiceError> {
        let Some(token) = token else {
            return Ok(None);
        };

        let claims = match validate_jwt(token, &self.secret) {
            Ok(claims) => claims,
            Err(e) => {
                debug!("Ignoring session cookie: {}", e);
                return Ok(None);
            }
        };

        let author_id = AuthorId(claims.sub);
        let bound = self.sessions.read().await.get(&claims.sid).map(|(id, _)| *id);
        if bound != Some(author_id) {
            debug!("Session {} is not active", claims.sid);
            return Ok(None);
        }

        match self.store.get_author(author_id).await {
            Ok(author) => Ok(Some(Identity {
                author_id: author.id,
                is_elevated: author.is_superuser,
            })),
            Err(StoreError::NotFound(_)) => {
                self.sessions.write().await.remove(&claims.sid);
                debug!("Dropped session {} for missing author {}", claims.sid, author_id);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn verify(&self, username: &str, credential: &str) -> Result<Option<Author>, AuthServiceError> {
        let Some(author) = self.store.find_author_by_username(username).await? else {
            return Ok(None);
        };

        let parsed_hash =
            PasswordHash::new(&author.password_hash).map_err(|e| AuthServiceError::Hash(e.to_string()))?;

        let valid = Argon2::default().verify_password(credential.as_bytes(), &parsed_hash).is_ok();

        Ok(valid.then_some(author))
    }

    async fn bind_session(&self, author: &Author) -> Result<String, AuthServiceError> {
        let sid = Uuid::new_v4();
        let claims = Claims::new(author.id.0, sid, self.expiry_hours);
        let token = generate_jwt(&claims, &self.secret)?;

        let now = Utc::now().timestamp();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, (_, exp)| *exp > now);
        let swept = before - sessions.len();
        if swept > 0 {
            debug!("Swept {} expired sessions", swept);
        }
        sessions.insert(sid, (author.id, claims.exp));
        drop(sessions);

        info!("Opened session {} for author {}", sid, author.id);
        Ok(token)
    }

    async fn clear_session(&self, token: &str) -> Result<(), AuthServiceError> {
        let claims = validate_jwt(token, &self.secret)?;
        if self.sessions.write().await.remove(&claims.sid).is_some() {
            info!("Closed session {} for author {}", claims.sid, claims.sub);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;

    async fn service_with_author(superuser: bool) -> (SessionAuthService, Author) {
        let store = Arc::new(MemoryStore::new());
        let hash = hash_password("correct horse").unwrap();
        let author = store.insert_author("ada", "Ada Lovelace", &hash, superuser).await.unwrap();
        (SessionAuthService::new(store, "test-secret", 1), author)
    }

    #[tokio::test]
    async fn verifies_matching_credentials_only() {
        let (auth, author) = service_with_author(false).await;
        let verified = auth.verify("ada", "correct horse").await.unwrap();
        assert_eq!(verified.map(|a| a.id), Some(author.id));
        assert!(auth.verify("ada", "wrong").await.unwrap().is_none());
        assert!(auth.verify("nobody", "correct horse").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn bound_session_resolves_to_identity() {
        let (auth, author) = service_with_author(true).await;
        let token = auth.bind_session(&author).await.unwrap();

        let identity = auth.current_identity(Some(token.as_str())).await.unwrap();
        assert_eq!(
            identity,
            Some(Identity {
                author_id: author.id,
                is_elevated: true
            })
        );
    }

    #[tokio::test]
    async fn cleared_session_no_longer_resolves() {
        let (auth, author) = service_with_author(false).await;
        let token = auth.bind_session(&author).await.unwrap();
        auth.clear_session(&token).await.unwrap();

        assert_eq!(auth.active_sessions().await, 0);
        assert!(auth.current_identity(Some(token.as_str())).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn garbage_and_missing_tokens_are_anonymous() {
        let (auth, _) = service_with_author(false).await;
        assert!(auth.current_identity(None).await.unwrap().is_none());
        assert!(auth.current_identity(Some("not-a-token")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn expired_sessions_are_swept_on_bind() {
        let (auth, author) = service_with_author(false).await;
        let expired = Utc::now().timestamp() - 60;
        {
            let mut sessions = auth.sessions.write().await;
            for _ in 0..50 {
                sessions.insert(Uuid::new_v4(), (author.id, expired));
            }
        }
        assert_eq!(auth.active_sessions().await, 50);

        let token = auth.bind_session(&author).await.unwrap();
        assert_eq!(auth.active_sessions().await, 1);
        assert!(auth.current_identity(Some(token.as_str())).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn zero_hour_sessions_do_not_accumulate() {
        let store = Arc::new(MemoryStore::new());
        let author = store.insert_author("ada", "Ada", "unused", false).await.unwrap();
        let auth = SessionAuthService::new(store, "s", 0);
        for _ in 0..50 {
            auth.bind_session(&author).await.unwrap();
        }
        assert!(auth.active_sessions().await <= 1);
    }

    #[tokio::test]
    async fn live_sessions_survive_the_sweep() {
        let (auth, author) = service_with_author(false).await;
        let first = auth.bind_session(&author).await.unwrap();
        auth.bind_session(&author).await.unwrap();

        assert_eq!(auth.active_sessions().await, 2);
        assert!(auth.current_identity(Some(first.as_str())).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn empty_secret_fails_to_bind() {
        let store = Arc::new(MemoryStore::new());
        let author = store.insert_author("ada", "Ada", "unused", false).await.unwrap();
        let auth = SessionAuthService::new(store, "", 1);
        assert!(matches!(auth.bind_session(&author).await, Err(AuthServiceError::Token(JwtError::InvalidSecret))));
    }
}
