use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::FromRow;

use crate::error::AppResult;

use super::{Patch, User, UserId};

pub type ArticleId = i64;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Article {
    pub id: ArticleId,
    pub author_id: UserId,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct CreateArticleInput {
    pub author_id: UserId,
    pub title: String,
    pub description: String,
    pub body: String,
}

/// A title change also regenerates the slug.
#[derive(Debug, Clone, Default)]
pub struct UpdateArticleInput {
    pub title: Patch<String>,
    pub description: Patch<String>,
    pub body: Patch<String>,
}

/// Set conditions are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    pub tag: Option<String>,
    pub author: Option<String>,
    pub favorite_of: Option<String>,
    pub feed_of: Option<UserId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleWithExtra {
    pub article: Article,
    pub author: User,
    pub tags: Vec<String>,
    pub is_author_followed: bool,
    pub is_article_favorite: bool,
    pub favorite_of_user_count: i64,
}

#[async_trait]
pub trait ArticleRepository: Send {
    async fn create(&mut self, input: CreateArticleInput) -> AppResult<Article>;

    /// Articles in creation order.
    async fn get_many(
        &mut self,
        filter: &ArticleFilter,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Article>>;

    async fn count(&mut self, filter: &ArticleFilter) -> AppResult<i64>;

    async fn get_by_slug(&mut self, slug: &str) -> AppResult<Option<Article>>;

    async fn update(&mut self, id: ArticleId, input: UpdateArticleInput)
        -> AppResult<Option<Article>>;

    /// Removes the article together with its tag links, favorites and comments.
    async fn delete(&mut self, id: ArticleId) -> AppResult<Option<ArticleId>>;
}
