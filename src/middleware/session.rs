use axum::{
    extract::{Request, State},
    http::{header::COOKIE, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::SecurityConfig;
use crate::error::ApiError;
use crate::guard::RequestContext;
use crate::state::AppState;

/// Resolve the session cookie into a `RequestContext` extension. Runs once per
/// request; handlers read the context and never touch the cookie themselves.
pub async fn session_context_middleware(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let token = session_cookie(request.headers(), &state.security.cookie_name);

    let resolved = state.auth.current_identity(token.as_deref()).await;
    let ctx = match resolved {
        Ok(Some(identity)) => RequestContext::authenticated(identity, token.unwrap_or_default()),
        Ok(None) => RequestContext::anonymous(),
        Err(e) => return ApiError::from(e).into_response(),
    };

    request.extensions_mut().insert(ctx);
    next.run(request).await
}

/// Value of the named cookie, if present and non-empty
pub fn session_cookie(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value that stores a fresh session token
pub fn session_set_cookie(token: &str, security: &SecurityConfig) -> String {
    let max_age = security.session_expiry_hours.saturating_mul(3600);
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        security.cookie_name, token, max_age
    );
    if security.secure_cookie {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that expires the session cookie
pub fn session_clear_cookie(security: &SecurityConfig) -> String {
    let mut cookie = format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", security.cookie_name);
    if security.secure_cookie {
        cookie.push_str("; Secure");
    }
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use axum::http::HeaderValue;

    #[test]
    fn finds_named_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; sessionid=abc.def ; lang=en"));
        assert_eq!(session_cookie(&headers, "sessionid"), Some("abc.def".to_string()));
        assert_eq!(session_cookie(&headers, "missing"), None);
    }

    #[test]
    fn empty_cookie_counts_as_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("sessionid="));
        assert_eq!(session_cookie(&headers, "sessionid"), None);
    }

    #[test]
    fn set_and_clear_cookie_attributes() {
        let mut security = AppConfig::development().security;
        security.session_expiry_hours = 2;
        assert_eq!(
            session_set_cookie("tok", &security),
            "sessionid=tok; Path=/; HttpOnly; SameSite=Lax; Max-Age=7200"
        );

        security.secure_cookie = true;
        assert!(session_clear_cookie(&security).ends_with("Max-Age=0; Secure"));
    }
}
