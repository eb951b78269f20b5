use std::sync::Arc;

use axum::http::Method;

use crate::auth::{hash_password, AuthService, SessionAuthService};
use crate::database::models::Author;
use crate::database::MemoryStore;
use crate::guard::RequestContext;
use crate::services::NewsService;

/// In-memory store, session auth and the news service wired together
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub auth: Arc<SessionAuthService>,
    pub service: NewsService,
}

impl TestContext {
    pub async fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let auth = Arc::new(SessionAuthService::new(store.clone(), "test-session-secret", 1));
        let service = NewsService::new(store.clone(), auth.clone());
        Self { store, auth, service }
    }

    pub async fn add_author(&self, username: &str, name: &str, password: &str, superuser: bool) -> Author {
        let hash = hash_password(password).expect("hash test password");
        self.store
            .insert_author(username, name, &hash, superuser)
            .await
            .expect("insert test author")
    }

    /// Log in through the service and return the context a follow-up request would carry
    pub async fn login(&self, username: &str, password: &str) -> RequestContext {
        let body = format!("username={}&password={}", username, password);
        let outcome = self
            .service
            .login(&RequestContext::anonymous(), &Method::POST, body.as_bytes())
            .await
            .expect("test login");
        let identity = self
            .auth
            .current_identity(Some(outcome.session_token.as_str()))
            .await
            .expect("resolve test session")
            .expect("test session is bound");
        RequestContext::authenticated(identity, outcome.session_token)
    }

    /// Re-resolve a previously issued session token, as the next request would
    pub async fn resolve(&self, ctx: &RequestContext) -> RequestContext {
        let token = ctx.session_token.as_deref();
        match self.auth.current_identity(token).await.expect("resolve session") {
            Some(identity) => RequestContext::authenticated(identity, token.unwrap_or_default()),
            None => RequestContext::anonymous(),
        }
    }
}
