//! Identity guard: pure allow/deny decisions over the request's session state.

use std::fmt::Display;

use tracing::{debug, warn};

use crate::auth::Identity;
use crate::database::models::AuthorId;
use crate::error::AuthError;

pub const ALREADY_LOGGED_IN: &str = "User is already logged in";

/// Per-request view of the session, built once at the transport boundary and
/// never mutated by handlers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub identity: Option<Identity>,
    /// Raw session token, kept so logout can clear the right session
    pub session_token: Option<String>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(identity: Identity, session_token: impl Into<String>) -> Self {
        Self {
            identity: Some(identity),
            session_token: Some(session_token.into()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn is_elevated(&self) -> bool {
        self.identity.map(|i| i.is_elevated).unwrap_or(false)
    }
}

/// Fails with `Unauthorized(message)` unless a session identity is bound
pub fn require_authenticated(ctx: &RequestContext, message: &str) -> Result<Identity, AuthError> {
    ctx.identity.ok_or_else(|| {
        debug!("Rejected anonymous request: {}", message);
        AuthError::unauthorized(message)
    })
}

/// Fails with `AlreadyAuthenticated` when a session identity is bound
pub fn require_unauthenticated(ctx: &RequestContext) -> Result<(), AuthError> {
    match ctx.identity {
        Some(identity) => {
            debug!("Author {} is already logged in", identity.author_id);
            Err(AuthError::already_authenticated(ALREADY_LOGGED_IN))
        }
        None => Ok(()),
    }
}

/// Allows the resource owner, or any elevated identity
pub fn require_owner_or_elevated(
    identity: &Identity,
    owner: AuthorId,
    resource: impl Display,
    denied_message: impl Into<String>,
) -> Result<(), AuthError> {
    if identity.author_id == owner || identity.is_elevated {
        return Ok(());
    }
    warn!(
        "Author {} denied access to {} owned by author {}",
        identity.author_id, resource, owner
    );
    Err(AuthError::forbidden(resource.to_string(), denied_message))
}
