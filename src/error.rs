// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse};
use thiserror::Error;

use crate::auth::service::AuthServiceError;
use crate::database::StoreError;

/// What a `NotFound` outcome refers to. The two cases surface with different
/// status codes at the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// A single story looked up by key (delete path)
    Story,
    /// A filtered story listing that matched nothing
    StoryQuery,
}

/// Identity and authorization failures raised by the guard and login flow
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    AlreadyAuthenticated(String),

    #[error("{message}")]
    Forbidden { resource: String, message: String },

    #[error("{0}")]
    InvalidCredentials(String),
}

impl AuthError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        AuthError::Unauthorized(message.into())
    }

    pub fn already_authenticated(message: impl Into<String>) -> Self {
        AuthError::AlreadyAuthenticated(message.into())
    }

    pub fn forbidden(resource: impl Into<String>, message: impl Into<String>) -> Self {
        AuthError::Forbidden {
            resource: resource.into(),
            message: message.into(),
        }
    }

    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        AuthError::InvalidCredentials(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            AuthError::Unauthorized(msg) => msg,
            AuthError::AlreadyAuthenticated(msg) => msg,
            AuthError::Forbidden { message, .. } => message,
            AuthError::InvalidCredentials(msg) => msg,
        }
    }
}

/// Terminal failure of a request. Every variant carries the client-facing message.
#[derive(Debug, Error)]
pub enum ApiError {
    // 400 Bad Request
    #[error("{message}")]
    Validation { field: String, message: String },

    // 400 Bad Request (body is not the expected encoding)
    #[error("{0}")]
    MalformedPayload(String),

    // 400 / 401 / 403 / 406 depending on the kind
    #[error(transparent)]
    Auth(#[from] AuthError),

    // 400 for a missing story, 404 for an empty listing
    #[error("{message}")]
    NotFound { resource: Resource, message: String },

    // 405 Method Not Allowed
    #[error("{0}")]
    MethodNotAllowed(String),

    // 500 Internal Server Error
    #[error("{0}")]
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Validation { .. } => 400,
            ApiError::MalformedPayload(_) => 400,
            ApiError::Auth(AuthError::Unauthorized(_)) => 401,
            ApiError::Auth(AuthError::AlreadyAuthenticated(_)) => 403,
            // Ownership denials have always been reported as bad requests
            ApiError::Auth(AuthError::Forbidden { .. }) => 400,
            ApiError::Auth(AuthError::InvalidCredentials(_)) => 406,
            ApiError::NotFound { resource: Resource::Story, .. } => 400,
            ApiError::NotFound { resource: Resource::StoryQuery, .. } => 404,
            ApiError::MethodNotAllowed(_) => 405,
            ApiError::InternalServerError(_) => 500,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation { message, .. } => message,
            ApiError::MalformedPayload(msg) => msg,
            ApiError::Auth(err) => err.message(),
            ApiError::NotFound { message, .. } => message,
            ApiError::MethodNotAllowed(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
        }
    }

    /// Get error code for client handling and logs
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "VALIDATION_ERROR",
            ApiError::MalformedPayload(_) => "MALFORMED_PAYLOAD",
            ApiError::Auth(AuthError::Unauthorized(_)) => "UNAUTHORIZED",
            ApiError::Auth(AuthError::AlreadyAuthenticated(_)) => "ALREADY_AUTHENTICATED",
            ApiError::Auth(AuthError::Forbidden { .. }) => "FORBIDDEN",
            ApiError::Auth(AuthError::InvalidCredentials(_)) => "INVALID_CREDENTIALS",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::MethodNotAllowed(_) => "METHOD_NOT_ALLOWED",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Field that failed validation, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            ApiError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

// Static constructor methods
impl ApiError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn malformed_payload(message: impl Into<String>) -> Self {
        ApiError::MalformedPayload(message.into())
    }

    pub fn not_found(resource: Resource, message: impl Into<String>) -> Self {
        ApiError::NotFound {
            resource,
            message: message.into(),
        }
    }

    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        ApiError::MethodNotAllowed(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

// Collaborator failures never reach the client verbatim
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        tracing::error!("Data store error: {}", err);
        ApiError::internal_server_error("An error occurred while processing your request")
    }
}

impl From<AuthServiceError> for ApiError {
    fn from(err: AuthServiceError) -> Self {
        tracing::error!("Auth service error: {}", err);
        ApiError::internal_server_error("An error occurred while processing your request")
    }
}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!("{} ({}): {}", status, self.error_code(), self.message());
        } else {
            tracing::debug!("{} ({}): {}", status, self.error_code(), self.message());
        }
        (status, self.message().to_string()).into_response()
    }
}
