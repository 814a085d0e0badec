use async_trait::async_trait;

use crate::{
    db::{ArticleId, UnitOfWork, UnitOfWorkContext},
    error::{AppError, AppResult},
    use_cases::{
        authenticated_input, common::get_article, AuthenticatedInput, RequiredAuth, UseCase,
    },
};

#[derive(Debug, Clone)]
pub struct DeleteArticleInput {
    pub auth: RequiredAuth,
    pub slug: String,
}

authenticated_input!(DeleteArticleInput => RequiredAuth);

pub struct DeleteArticleUseCase<U> {
    unit_of_work: U,
}

impl<U: UnitOfWork> DeleteArticleUseCase<U> {
    pub fn new(unit_of_work: U) -> Self {
        Self { unit_of_work }
    }
}

#[async_trait]
impl<U: UnitOfWork> UseCase for DeleteArticleUseCase<U> {
    type Input = DeleteArticleInput;
    type Output = Option<ArticleId>;

    /// Fails with `PermissionDenied` unless the caller wrote the article.
    async fn execute(&self, input: Self::Input) -> AppResult<Self::Output> {
        let user_id = input.ensure_authenticated()?;
        let Some(article) = get_article(&self.unit_of_work, &input.slug).await? else {
            log::info!("could not delete article, article not found, slug={}", input.slug);
            return Ok(None);
        };
        if article.author_id != user_id {
            log::info!(
                "user is not allowed to delete the article, user_id={user_id} article_id={}",
                article.id
            );
            return Err(AppError::PermissionDenied);
        }

        let mut ctx = self.unit_of_work.begin().await?;
        let deleted = ctx.articles().delete(article.id).await?;
        ctx.commit().await?;

        log::info!("article has been deleted, article_id={}", article.id);
        Ok(deleted)
    }
}
