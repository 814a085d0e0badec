use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::FromRow;

use crate::error::AppResult;

use super::{ArticleId, User, UserId};

pub type CommentId = i64;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Comment {
    pub id: CommentId,
    pub author_id: UserId,
    pub article_id: ArticleId,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct CreateCommentInput {
    pub author_id: UserId,
    pub article_id: ArticleId,
    pub body: String,
}

#[derive(Debug, Clone, Default)]
pub struct CommentFilter {
    pub article_id: Option<ArticleId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentWithExtra {
    pub comment: Comment,
    pub author: User,
    pub is_author_followed: bool,
}

#[async_trait]
pub trait CommentRepository: Send {
    async fn create(&mut self, input: CreateCommentInput) -> AppResult<Comment>;

    /// Comments ordered by id.
    async fn get_many(&mut self, filter: &CommentFilter) -> AppResult<Vec<Comment>>;

    async fn get_by_id(&mut self, id: CommentId) -> AppResult<Option<Comment>>;

    async fn delete(&mut self, id: CommentId) -> AppResult<Option<CommentId>>;
}
