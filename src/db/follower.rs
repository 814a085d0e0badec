use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::AppResult;

use super::UserId;

#[async_trait]
pub trait FollowerRepository: Send {
    /// Does nothing if `follower_id` already follows `followed_id`.
    async fn follow(&mut self, follower_id: UserId, followed_id: UserId) -> AppResult<()>;

    /// Does nothing if `follower_id` does not follow `followed_id`.
    async fn unfollow(&mut self, follower_id: UserId, followed_id: UserId) -> AppResult<()>;

    async fn is_followed(&mut self, id: UserId, by: UserId) -> AppResult<bool>;

    async fn are_followed(&mut self, ids: &[UserId], by: UserId)
        -> AppResult<HashMap<UserId, bool>>;
}
