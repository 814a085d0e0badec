//! Fakes for the external services and fixtures for the in-memory storage.

use async_trait::async_trait;

use crate::{
    db::{
        memory::MemoryUnitOfWork, Article, CreateArticleInput, CreateUserInput, UnitOfWork,
        UnitOfWorkContext, User, UserId,
    },
    error::AppResult,
    utils::{
        hasher::PasswordHasher,
        jwt::{AuthToken, AuthTokenGenerator},
    },
};

const TOKEN_PREFIX: &str = "token-";
const HASH_PREFIX: &str = "hashed-";

/// Issues `token-<user id>` and accepts nothing else.
#[derive(Clone, Copy, Debug, Default)]
pub struct FakeAuthTokenGenerator;

impl FakeAuthTokenGenerator {
    pub fn token_for(user_id: UserId) -> AuthToken {
        format!("{TOKEN_PREFIX}{user_id}")
    }
}

#[async_trait]
impl AuthTokenGenerator for FakeAuthTokenGenerator {
    async fn generate_token(&self, user: &User) -> AppResult<AuthToken> {
        Ok(Self::token_for(user.id))
    }

    async fn get_user_id(&self, token: &str) -> Option<UserId> {
        token.strip_prefix(TOKEN_PREFIX)?.parse().ok()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FakePasswordHasher;

#[async_trait]
impl PasswordHasher for FakePasswordHasher {
    async fn hash_password(&self, password: &str) -> AppResult<String> {
        Ok(format!("{HASH_PREFIX}{password}"))
    }

    async fn verify(&self, password: &str, hash: &str) -> bool {
        hash.strip_prefix(HASH_PREFIX) == Some(password)
    }
}

pub async fn create_user(uow: &MemoryUnitOfWork, username: &str) -> User {
    let mut ctx = uow.begin().await.unwrap();
    let user = ctx
        .users()
        .create(CreateUserInput {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: format!("{HASH_PREFIX}{username}-password"),
        })
        .await
        .unwrap();
    ctx.commit().await.unwrap();
    user
}

pub async fn create_article(
    uow: &MemoryUnitOfWork,
    author_id: UserId,
    title: &str,
    tags: &[&str],
) -> Article {
    let tags: Vec<String> = tags.iter().map(|tag| tag.to_string()).collect();
    let mut ctx = uow.begin().await.unwrap();
    let article = ctx
        .articles()
        .create(CreateArticleInput {
            author_id,
            title: title.to_string(),
            description: format!("{title} description"),
            body: format!("{title} body"),
        })
        .await
        .unwrap();
    ctx.tags().create(article.id, &tags).await.unwrap();
    ctx.commit().await.unwrap();
    article
}

pub fn token_for(user: &User) -> AuthToken {
    FakeAuthTokenGenerator::token_for(user.id)
}
