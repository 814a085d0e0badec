use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("username is already taken")]
    UsernameAlreadyExists,

    #[error("email is already taken")]
    EmailAlreadyExists,

    #[error("email or password is invalid")]
    InvalidCredentials,

    #[error("user is not authenticated")]
    UserIsNotAuthenticated,

    #[error("permission denied")]
    PermissionDenied,

    #[error("article does not exist")]
    ArticleDoesNotExist,

    /// Rendered for `None` results of the use cases; never raised by them.
    #[error("Not Found")]
    NotFound,

    #[error("Any error: {0:?}")]
    Anyhow(#[from] anyhow::Error),

    #[error("SQL failed: {0:?}")]
    Sqlx(#[from] sqlx::Error),

    #[error("JWT error: {0:?}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Invalid request: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::UsernameAlreadyExists | AppError::EmailAlreadyExists => {
                StatusCode::BAD_REQUEST
            }
            AppError::InvalidCredentials | AppError::UserIsNotAuthenticated => {
                StatusCode::UNAUTHORIZED
            }
            AppError::PermissionDenied => StatusCode::FORBIDDEN,
            AppError::ArticleDoesNotExist | AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AppError::Sqlx(_) | AppError::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Tell axum how to convert `AppError` into a response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            log::error!("request failed: {:?}", self);
            status.canonical_reason().unwrap_or("Internal Server Error").to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "errors": { "body": [message] },
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_statuses() {
        assert_eq!(AppError::UsernameAlreadyExists.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::EmailAlreadyExists.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::UserIsNotAuthenticated.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::PermissionDenied.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::ArticleDoesNotExist.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::NotFound.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_errors_hide_details() {
        let response = AppError::Anyhow(anyhow::anyhow!("secret detail")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
