// handlers/protected/logout.rs - POST /api/logout/ handler

use axum::{extract::State, http::Method, Extension};

use crate::guard::RequestContext;
use crate::middleware::{session_clear_cookie, TextResponse, TextResult};
use crate::state::AppState;

pub async fn logout(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    method: Method,
) -> TextResult {
    let message = state.news.logout(&ctx, &method).await?;
    Ok(TextResponse::ok(message).with_cookie(session_clear_cookie(&state.security)))
}
