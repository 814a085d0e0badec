use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::FromRow;

use crate::error::AppResult;

use super::Patch;

pub type UserId = i64;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub bio: String,
    #[sqlx(rename = "image_url")]
    pub image: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateUserInput {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateUserInput {
    pub username: Patch<String>,
    pub email: Patch<String>,
    pub password_hash: Patch<String>,
    pub bio: Patch<String>,
    pub image: Patch<Option<String>>,
}

/// A user as seen by another (possibly anonymous) user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub user: User,
    pub is_followed: bool,
}

#[async_trait]
pub trait UserRepository: Send {
    /// Fails with `UsernameAlreadyExists` or `EmailAlreadyExists` on conflict.
    async fn create(&mut self, input: CreateUserInput) -> AppResult<User>;

    async fn get_by_email(&mut self, email: &str) -> AppResult<Option<User>>;

    async fn get_by_username(&mut self, username: &str) -> AppResult<Option<User>>;

    async fn get_by_id(&mut self, id: UserId) -> AppResult<Option<User>>;

    async fn get_by_ids(&mut self, ids: &[UserId]) -> AppResult<HashMap<UserId, User>>;

    /// Fails with `UsernameAlreadyExists` or `EmailAlreadyExists` on conflict.
    async fn update(&mut self, id: UserId, input: UpdateUserInput) -> AppResult<Option<User>>;
}
