// handlers/public/login.rs - POST /api/login/ handler

use axum::{body::Bytes, extract::State, http::Method, Extension};

use crate::guard::RequestContext;
use crate::middleware::{session_set_cookie, TextResponse, TextResult};
use crate::state::AppState;

/// Form-encoded `username` and `password`. On success the session cookie is
/// set and the author is greeted by display name.
pub async fn login(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    method: Method,
    body: Bytes,
) -> TextResult {
    let outcome = state.news.login(&ctx, &method, &body).await?;
    let cookie = session_set_cookie(&outcome.session_token, &state.security);
    Ok(TextResponse::ok(outcome.message).with_cookie(cookie))
}
