use async_trait::async_trait;

use crate::{
    db::{ArticleWithExtra, UnitOfWork},
    error::AppResult,
    use_cases::{
        authenticated_input, common::get_article, AuthenticatedInput, OptionalAuth, UseCase,
    },
};

use super::common::with_extra;

#[derive(Debug, Clone)]
pub struct GetArticleInput {
    pub auth: OptionalAuth,
    pub slug: String,
}

authenticated_input!(GetArticleInput => OptionalAuth);

pub struct GetArticleUseCase<U> {
    unit_of_work: U,
}

impl<U: UnitOfWork> GetArticleUseCase<U> {
    pub fn new(unit_of_work: U) -> Self {
        Self { unit_of_work }
    }
}

#[async_trait]
impl<U: UnitOfWork> UseCase for GetArticleUseCase<U> {
    type Input = GetArticleInput;
    type Output = Option<ArticleWithExtra>;

    async fn execute(&self, input: Self::Input) -> AppResult<Self::Output> {
        let Some(article) = get_article(&self.unit_of_work, &input.slug).await? else {
            return Ok(None);
        };
        let article = with_extra(&self.unit_of_work, article, input.user_id()).await?;
        Ok(Some(article))
    }
}
