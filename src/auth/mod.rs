pub mod service;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use service::{hash_password, AuthService, AuthServiceError, Identity, SessionAuthService};

const MAX_EXPIRY_HOURS: u64 = 24 * 365 * 100;

/// Claims carried by the session cookie. `sid` names the server-side session
/// entry, so a token outlives logout only as an inert string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub sid: Uuid,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(author_id: i64, sid: Uuid, expiry_hours: u64) -> Self {
        let now = Utc::now();
        // Capped at a century so the addition below cannot overflow
        let hours = expiry_hours.min(MAX_EXPIRY_HOURS) as i64;
        let exp = (now + Duration::hours(hours)).timestamp();

        Self {
            sub: author_id,
            sid,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug)]
pub enum JwtError {
    TokenGeneration(String),
    InvalidToken(String),
    InvalidSecret,
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::TokenGeneration(msg) => write!(f, "JWT generation error: {}", msg),
            JwtError::InvalidToken(msg) => write!(f, "Invalid JWT token: {}", msg),
            JwtError::InvalidSecret => write!(f, "Invalid JWT secret"),
        }
    }
}

impl std::error::Error for JwtError {}

pub fn generate_jwt(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, claims, &encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

/// Verify signature and expiry, returning the claims
pub fn validate_jwt(token: &str, secret: &str) -> Result<Claims, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data =
        decode::<Claims>(token, &decoding_key, &validation).map_err(|e| JwtError::InvalidToken(e.to_string()))?;

    Ok(token_data.claims)
}
