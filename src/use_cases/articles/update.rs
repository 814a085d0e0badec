use async_trait::async_trait;

use crate::{
    db::{self, ArticleWithExtra, Patch, UnitOfWork, UnitOfWorkContext},
    error::{AppError, AppResult},
    use_cases::{
        authenticated_input, common::get_article, AuthenticatedInput, RequiredAuth, UseCase,
    },
};

use super::common::with_extra;

#[derive(Debug, Clone)]
pub struct UpdateArticleInput {
    pub auth: RequiredAuth,
    pub slug: String,
    pub title: Patch<String>,
    pub description: Patch<String>,
    pub body: Patch<String>,
}

authenticated_input!(UpdateArticleInput => RequiredAuth);

pub struct UpdateArticleUseCase<U> {
    unit_of_work: U,
}

impl<U: UnitOfWork> UpdateArticleUseCase<U> {
    pub fn new(unit_of_work: U) -> Self {
        Self { unit_of_work }
    }
}

#[async_trait]
impl<U: UnitOfWork> UseCase for UpdateArticleUseCase<U> {
    type Input = UpdateArticleInput;
    type Output = Option<ArticleWithExtra>;

    /// Fails with `PermissionDenied` unless the caller wrote the article.
    async fn execute(&self, input: Self::Input) -> AppResult<Self::Output> {
        let user_id = input.ensure_authenticated()?;
        let Some(article) = get_article(&self.unit_of_work, &input.slug).await? else {
            log::info!("could not update article, article not found, slug={}", input.slug);
            return Ok(None);
        };
        if article.author_id != user_id {
            log::info!(
                "user is not allowed to update the article, user_id={user_id} article_id={}",
                article.id
            );
            return Err(AppError::PermissionDenied);
        }

        let mut ctx = self.unit_of_work.begin().await?;
        let updated = ctx
            .articles()
            .update(
                article.id,
                db::UpdateArticleInput {
                    title: input.title,
                    description: input.description,
                    body: input.body,
                },
            )
            .await?;
        ctx.commit().await?;

        let Some(updated) = updated else {
            log::info!("article disappeared before update, article_id={}", article.id);
            return Ok(None);
        };
        log::info!("article has been updated, article_id={}", updated.id);

        let updated = with_extra(&self.unit_of_work, updated, Some(user_id)).await?;
        Ok(Some(updated))
    }
}
