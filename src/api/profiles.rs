use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::{
    db::UnitOfWork,
    error::{AppError, AppResult},
    use_cases::{
        profiles::{FollowInput, GetProfileInput, UnfollowInput},
        UseCase,
    },
    AppState,
};

use super::{optional_auth, required_auth, AuthHeader, ProfileBody};

// GET /api/profiles/:username
pub async fn get_profile<U: UnitOfWork>(
    State(state): State<AppState<U>>,
    Path(username): Path<String>,
    header: AuthHeader,
) -> AppResult<impl IntoResponse> {
    let profile = state
        .use_cases
        .get_profile
        .execute(GetProfileInput {
            auth: optional_auth(header),
            username,
        })
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(json!({ "profile": ProfileBody::from(profile) })))
}

// POST /api/profiles/:username/follow
pub async fn follow<U: UnitOfWork>(
    State(state): State<AppState<U>>,
    Path(username): Path<String>,
    header: AuthHeader,
) -> AppResult<impl IntoResponse> {
    let auth = required_auth(header)?;
    let profile = state
        .use_cases
        .follow
        .execute(FollowInput { auth, username })
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(json!({ "profile": ProfileBody::from(profile) })))
}

// DELETE /api/profiles/:username/follow
pub async fn unfollow<U: UnitOfWork>(
    State(state): State<AppState<U>>,
    Path(username): Path<String>,
    header: AuthHeader,
) -> AppResult<impl IntoResponse> {
    let auth = required_auth(header)?;
    let profile = state
        .use_cases
        .unfollow
        .execute(UnfollowInput { auth, username })
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(json!({ "profile": ProfileBody::from(profile) })))
}
