use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::AppResult;

use super::{ArticleId, UserId};

#[async_trait]
pub trait FavoriteRepository: Send {
    /// Adds `article_id` to the favorites of `user_id`.
    ///
    /// Returns the total number of users who have the article in their
    /// favorites. Adding an already favorite article changes nothing.
    async fn add(&mut self, user_id: UserId, article_id: ArticleId) -> AppResult<i64>;

    /// Removes `article_id` from the favorites of `user_id`.
    ///
    /// Returns the total number of users who have the article in their
    /// favorites.
    async fn remove(&mut self, user_id: UserId, article_id: ArticleId) -> AppResult<i64>;

    async fn is_favorite(&mut self, article_id: ArticleId, of: UserId) -> AppResult<bool>;

    async fn are_favorite(
        &mut self,
        article_ids: &[ArticleId],
        of: UserId,
    ) -> AppResult<HashMap<ArticleId, bool>>;

    async fn count(&mut self, article_id: ArticleId) -> AppResult<i64>;

    async fn count_many(&mut self, article_ids: &[ArticleId])
        -> AppResult<HashMap<ArticleId, i64>>;
}
