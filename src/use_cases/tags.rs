use async_trait::async_trait;

use crate::{
    db::{UnitOfWork, UnitOfWorkContext},
    error::AppResult,
};

use super::UseCase;

pub struct ListTagsUseCase<U> {
    unit_of_work: U,
}

impl<U: UnitOfWork> ListTagsUseCase<U> {
    pub fn new(unit_of_work: U) -> Self {
        Self { unit_of_work }
    }
}

#[async_trait]
impl<U: UnitOfWork> UseCase for ListTagsUseCase<U> {
    type Input = ();
    type Output = Vec<String>;

    /// All tags in the order they were first used.
    async fn execute(&self, _input: Self::Input) -> AppResult<Self::Output> {
        let mut ctx = self.unit_of_work.begin().await?;
        let tags = ctx.tags().get_all().await?;
        log::info!("got tags, count={}", tags.len());
        Ok(tags)
    }
}
