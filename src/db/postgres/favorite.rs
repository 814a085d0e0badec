use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use crate::{
    db::{ArticleId, FavoriteRepository, UserId},
    error::AppResult,
};

use super::{now, PgUnitOfWorkContext};

#[async_trait]
impl FavoriteRepository for PgUnitOfWorkContext {
    async fn add(&mut self, user_id: UserId, article_id: ArticleId) -> AppResult<i64> {
        sqlx::query(
            "
            INSERT INTO favorite_article (article_id, user_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT DO NOTHING
            ",
        )
        .bind(article_id)
        .bind(user_id)
        .bind(now())
        .execute(&mut *self.tx)
        .await?;

        self.count(article_id).await
    }

    async fn remove(&mut self, user_id: UserId, article_id: ArticleId) -> AppResult<i64> {
        sqlx::query("DELETE FROM favorite_article WHERE article_id = $1 AND user_id = $2")
            .bind(article_id)
            .bind(user_id)
            .execute(&mut *self.tx)
            .await?;

        self.count(article_id).await
    }

    async fn is_favorite(&mut self, article_id: ArticleId, of: UserId) -> AppResult<bool> {
        let favorite = sqlx::query_scalar::<_, ArticleId>(
            "SELECT article_id FROM favorite_article WHERE article_id = $1 AND user_id = $2",
        )
        .bind(article_id)
        .bind(of)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(favorite.is_some())
    }

    async fn are_favorite(
        &mut self,
        article_ids: &[ArticleId],
        of: UserId,
    ) -> AppResult<HashMap<ArticleId, bool>> {
        if article_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let favorite: HashSet<ArticleId> = sqlx::query_scalar::<_, ArticleId>(
            "SELECT article_id FROM favorite_article WHERE user_id = $1 AND article_id = ANY($2)",
        )
        .bind(of)
        .bind(article_ids)
        .fetch_all(&mut *self.tx)
        .await?
        .into_iter()
        .collect();

        Ok(article_ids
            .iter()
            .map(|id| (*id, favorite.contains(id)))
            .collect())
    }

    async fn count(&mut self, article_id: ArticleId) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(user_id) FROM favorite_article WHERE article_id = $1",
        )
        .bind(article_id)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(count)
    }

    async fn count_many(
        &mut self,
        article_ids: &[ArticleId],
    ) -> AppResult<HashMap<ArticleId, i64>> {
        if article_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, (ArticleId, i64)>(
            "
            SELECT article_id, COUNT(user_id)
            FROM favorite_article
            WHERE article_id = ANY($1)
            GROUP BY article_id
            ",
        )
        .bind(article_ids)
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(rows.into_iter().collect())
    }
}
