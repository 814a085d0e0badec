use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::{db::UnitOfWork, error::AppResult, use_cases::UseCase, AppState};

// GET /api/tags
pub async fn list_tags<U: UnitOfWork>(
    State(state): State<AppState<U>>,
) -> AppResult<impl IntoResponse> {
    let tags = state.use_cases.list_tags.execute(()).await?;
    Ok(Json(json!({ "tags": tags })))
}
