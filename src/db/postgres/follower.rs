use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use crate::{
    db::{FollowerRepository, UserId},
    error::AppResult,
};

use super::{now, PgUnitOfWorkContext};

#[async_trait]
impl FollowerRepository for PgUnitOfWorkContext {
    async fn follow(&mut self, follower_id: UserId, followed_id: UserId) -> AppResult<()> {
        sqlx::query(
            "
            INSERT INTO follower (follower_id, followed_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT DO NOTHING
            ",
        )
        .bind(follower_id)
        .bind(followed_id)
        .bind(now())
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }

    async fn unfollow(&mut self, follower_id: UserId, followed_id: UserId) -> AppResult<()> {
        sqlx::query("DELETE FROM follower WHERE follower_id = $1 AND followed_id = $2")
            .bind(follower_id)
            .bind(followed_id)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn is_followed(&mut self, id: UserId, by: UserId) -> AppResult<bool> {
        let followed = sqlx::query_scalar::<_, UserId>(
            "SELECT followed_id FROM follower WHERE follower_id = $1 AND followed_id = $2",
        )
        .bind(by)
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(followed.is_some())
    }

    async fn are_followed(
        &mut self,
        ids: &[UserId],
        by: UserId,
    ) -> AppResult<HashMap<UserId, bool>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let followed: HashSet<UserId> = sqlx::query_scalar::<_, UserId>(
            "SELECT followed_id FROM follower WHERE follower_id = $1 AND followed_id = ANY($2)",
        )
        .bind(by)
        .bind(ids)
        .fetch_all(&mut *self.tx)
        .await?
        .into_iter()
        .collect();

        Ok(ids.iter().map(|id| (*id, followed.contains(id))).collect())
    }
}
