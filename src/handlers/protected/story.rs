// handlers/protected/story.rs - POST /api/poststory/ and POST /api/deletestory/

use axum::{body::Bytes, extract::State, http::Method, Extension};

use crate::guard::RequestContext;
use crate::middleware::{TextResponse, TextResult};
use crate::services::news_service::STORY_ADDED;
use crate::state::AppState;

/// JSON `{headline, category, region, details}`; the story is owned by the caller
pub async fn post_story(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    method: Method,
    body: Bytes,
) -> TextResult {
    state.news.publish_story(&ctx, &method, &body).await?;
    Ok(TextResponse::created(STORY_ADDED))
}

/// JSON `{story_key}`. Success answers 201, matching what existing clients expect.
pub async fn delete_story(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    method: Method,
    body: Bytes,
) -> TextResult {
    let message = state.news.delete_story(&ctx, &method, &body).await?;
    Ok(TextResponse::created(message))
}
