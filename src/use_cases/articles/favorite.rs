use async_trait::async_trait;

use crate::{
    db::{ArticleWithExtra, UnitOfWork, UnitOfWorkContext},
    error::AppResult,
    use_cases::{
        authenticated_input, common::get_article, AuthenticatedInput, RequiredAuth, UseCase,
    },
};

use super::common::with_favorite_status;

#[derive(Debug, Clone)]
pub struct FavoriteArticleInput {
    pub auth: RequiredAuth,
    pub slug: String,
}

authenticated_input!(FavoriteArticleInput => RequiredAuth);

pub struct FavoriteArticleUseCase<U> {
    unit_of_work: U,
}

impl<U: UnitOfWork> FavoriteArticleUseCase<U> {
    pub fn new(unit_of_work: U) -> Self {
        Self { unit_of_work }
    }
}

#[async_trait]
impl<U: UnitOfWork> UseCase for FavoriteArticleUseCase<U> {
    type Input = FavoriteArticleInput;
    type Output = Option<ArticleWithExtra>;

    async fn execute(&self, input: Self::Input) -> AppResult<Self::Output> {
        let user_id = input.ensure_authenticated()?;
        let Some(article) = get_article(&self.unit_of_work, &input.slug).await? else {
            log::info!(
                "could not add article to favorites, article not found, slug={}",
                input.slug
            );
            return Ok(None);
        };

        let mut ctx = self.unit_of_work.begin().await?;
        let count = ctx.favorites().add(user_id, article.id).await?;
        ctx.commit().await?;
        log::info!(
            "article has been added to favorites, user_id={user_id} article_id={}",
            article.id
        );

        let article =
            with_favorite_status(&self.unit_of_work, article, user_id, true, count).await?;
        Ok(Some(article))
    }
}
