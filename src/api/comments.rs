use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::{
    db::{CommentId, UnitOfWork},
    error::{AppError, AppResult},
    use_cases::{
        comments::{AddCommentToArticleInput, DeleteCommentInput, GetCommentsFromArticleInput},
        UseCase,
    },
    AppState,
};

use super::{optional_auth, required_auth, AuthHeader, CommentBody};

#[derive(Deserialize)]
pub struct AddComment {
    comment: AddCommentData,
}

#[derive(Deserialize, Validate)]
struct AddCommentData {
    #[validate(length(min = 1, message = "body can't be blank"))]
    body: String,
}

// GET /api/articles/:slug/comments
pub async fn get_comments<U: UnitOfWork>(
    State(state): State<AppState<U>>,
    Path(slug): Path<String>,
    header: AuthHeader,
) -> AppResult<impl IntoResponse> {
    let comments = state
        .use_cases
        .get_comments
        .execute(GetCommentsFromArticleInput {
            auth: optional_auth(header),
            article_slug: slug,
        })
        .await?;

    let comments: Vec<CommentBody> = comments.into_iter().map(CommentBody::from).collect();
    Ok(Json(json!({ "comments": comments })))
}

// POST /api/articles/:slug/comments
pub async fn add_comment<U: UnitOfWork>(
    State(state): State<AppState<U>>,
    Path(slug): Path<String>,
    header: AuthHeader,
    Json(AddComment { comment }): Json<AddComment>,
) -> AppResult<impl IntoResponse> {
    let auth = required_auth(header)?;
    comment.validate()?;

    let added = state
        .use_cases
        .add_comment
        .execute(AddCommentToArticleInput {
            auth,
            article_slug: slug,
            body: comment.body,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "comment": CommentBody::from(added) })),
    ))
}

// DELETE /api/articles/:slug/comments/:id
pub async fn delete_comment<U: UnitOfWork>(
    State(state): State<AppState<U>>,
    Path((slug, comment_id)): Path<(String, CommentId)>,
    header: AuthHeader,
) -> AppResult<impl IntoResponse> {
    let auth = required_auth(header)?;
    state
        .use_cases
        .delete_comment
        .execute(DeleteCommentInput {
            auth,
            article_slug: slug,
            comment_id,
        })
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(StatusCode::NO_CONTENT)
}
