use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::{
    db::{Patch, UnitOfWork},
    error::AppResult,
    use_cases::{
        users::{GetCurrentUserInput, SignInInput, SignUpInput, UpdateCurrentUserInput},
        UseCase,
    },
    AppState,
};

use super::{required_auth, AuthHeader, UserBody};

#[derive(Deserialize)]
pub struct Registration {
    user: RegistrationData,
}

#[derive(Deserialize, Validate)]
struct RegistrationData {
    #[validate(non_control_character, length(min = 1, max = 64))]
    username: String,
    #[validate(email)]
    email: String,
    #[validate(length(min = 8, max = 64))]
    password: String,
}

#[derive(Deserialize)]
pub struct Login {
    user: LoginData,
}

#[derive(Deserialize, Validate)]
struct LoginData {
    #[validate(email)]
    email: String,
    #[validate(length(min = 1))]
    password: String,
}

#[derive(Deserialize)]
pub struct UpdateUser {
    user: UpdateUserData,
}

#[derive(Deserialize, Validate)]
struct UpdateUserData {
    #[validate(email)]
    email: Option<String>,
    #[validate(non_control_character, length(min = 1, max = 64))]
    username: Option<String>,
    #[validate(length(min = 8, max = 64))]
    password: Option<String>,
    bio: Option<String>,
    #[serde(default)]
    image: Patch<Option<String>>,
}

// POST /api/users
pub async fn sign_up<U: UnitOfWork>(
    State(state): State<AppState<U>>,
    Json(Registration { user }): Json<Registration>,
) -> AppResult<impl IntoResponse> {
    user.validate()?;

    let signed_up = state
        .use_cases
        .sign_up
        .execute(SignUpInput {
            username: user.username,
            email: user.email,
            password: user.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "user": UserBody::from(signed_up) })),
    ))
}

// POST /api/users/login
pub async fn sign_in<U: UnitOfWork>(
    State(state): State<AppState<U>>,
    Json(Login { user }): Json<Login>,
) -> AppResult<impl IntoResponse> {
    user.validate()?;

    let signed_in = state
        .use_cases
        .sign_in
        .execute(SignInInput {
            email: user.email,
            password: user.password,
        })
        .await?;

    Ok(Json(json!({ "user": UserBody::from(signed_in) })))
}

// GET /api/user
pub async fn get_current_user<U: UnitOfWork>(
    State(state): State<AppState<U>>,
    header: AuthHeader,
) -> AppResult<impl IntoResponse> {
    let auth = required_auth(header)?;
    let current = state
        .use_cases
        .get_current_user
        .execute(GetCurrentUserInput { auth })
        .await?;

    Ok(Json(json!({ "user": UserBody::from(current) })))
}

// PUT /api/user
pub async fn update_current_user<U: UnitOfWork>(
    State(state): State<AppState<U>>,
    header: AuthHeader,
    Json(UpdateUser { user }): Json<UpdateUser>,
) -> AppResult<impl IntoResponse> {
    let auth = required_auth(header)?;
    user.validate()?;

    let updated = state
        .use_cases
        .update_current_user
        .execute(UpdateCurrentUserInput {
            auth,
            username: user.username.into(),
            email: user.email.into(),
            password: user.password.into(),
            bio: user.bio.into(),
            image: user.image,
        })
        .await?;

    Ok(Json(json!({ "user": UserBody::from(updated) })))
}
