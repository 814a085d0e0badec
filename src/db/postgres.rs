mod article;
mod comment;
mod favorite;
mod follower;
mod tag;
mod user;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use sqlx::{migrate::MigrateError, postgres::PgPoolOptions, PgPool, Postgres, Transaction};

use crate::{config::Config, error::AppResult};

use super::{
    ArticleRepository, CommentRepository, FavoriteRepository, FollowerRepository, TagRepository,
    UnitOfWork, UnitOfWorkContext, UserRepository,
};

#[derive(Clone)]
pub struct PgUnitOfWork {
    pool: PgPool,
}

impl PgUnitOfWork {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &Config) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await?;
        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> Result<(), MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    type Context = PgUnitOfWorkContext;

    async fn begin(&self) -> AppResult<Self::Context> {
        let tx = self.pool.begin().await?;
        Ok(PgUnitOfWorkContext { tx })
    }
}

/// Every repository of this context runs its statements on `tx`.
pub struct PgUnitOfWorkContext {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl UnitOfWorkContext for PgUnitOfWorkContext {
    fn users(&mut self) -> &mut dyn UserRepository {
        self
    }

    fn followers(&mut self) -> &mut dyn FollowerRepository {
        self
    }

    fn articles(&mut self) -> &mut dyn ArticleRepository {
        self
    }

    fn tags(&mut self) -> &mut dyn TagRepository {
        self
    }

    fn favorites(&mut self) -> &mut dyn FavoriteRepository {
        self
    }

    fn comments(&mut self) -> &mut dyn CommentRepository {
        self
    }

    async fn commit(self) -> AppResult<()> {
        self.tx.commit().await?;
        Ok(())
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use sqlx::PgPool;

    use super::{PgUnitOfWork, PgUnitOfWorkContext};
    use crate::db::{
        Article, CreateArticleInput, CreateUserInput, UnitOfWork, UnitOfWorkContext, User, UserId,
    };

    pub async fn begin(pool: &PgPool) -> PgUnitOfWorkContext {
        PgUnitOfWork::new(pool.clone()).begin().await.unwrap()
    }

    pub async fn create_user(ctx: &mut PgUnitOfWorkContext, username: &str) -> User {
        ctx.users()
            .create(CreateUserInput {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password_hash: format!("hash-of-{username}"),
            })
            .await
            .unwrap()
    }

    pub async fn create_article(
        ctx: &mut PgUnitOfWorkContext,
        author_id: UserId,
        title: &str,
        tags: &[&str],
    ) -> Article {
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
        let tags: Vec<String> = tags.iter().map(|tag| tag.to_string()).collect();
        ctx.tags().create(article.id, &tags).await.unwrap();
        article
    }
}
