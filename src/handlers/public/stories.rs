// handlers/public/stories.rs - GET /api/getstories/ handler

use axum::{body::Bytes, extract::State, http::Method};

use crate::api::StoriesResponse;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

pub async fn list_stories(State(state): State<AppState>, method: Method, body: Bytes) -> ApiResult<StoriesResponse> {
    let stories = state.news.list_stories(&method, &body).await?;
    Ok(ApiResponse::success(stories))
}
