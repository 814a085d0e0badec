use async_trait::async_trait;

use crate::{
    db::{Profile, UnitOfWork, UnitOfWorkContext},
    error::AppResult,
    use_cases::{
        authenticated_input, common::is_user_followed, AuthenticatedInput, OptionalAuth, UseCase,
    },
};

#[derive(Debug, Clone)]
pub struct GetProfileInput {
    pub auth: OptionalAuth,
    pub username: String,
}

authenticated_input!(GetProfileInput => OptionalAuth);

pub struct GetProfileUseCase<U> {
    unit_of_work: U,
}

impl<U: UnitOfWork> GetProfileUseCase<U> {
    pub fn new(unit_of_work: U) -> Self {
        Self { unit_of_work }
    }
}

#[async_trait]
impl<U: UnitOfWork> UseCase for GetProfileUseCase<U> {
    type Input = GetProfileInput;
    type Output = Option<Profile>;

    async fn execute(&self, input: Self::Input) -> AppResult<Self::Output> {
        let mut ctx = self.unit_of_work.begin().await?;
        let user = ctx.users().get_by_username(&input.username).await?;
        drop(ctx);

        let Some(user) = user else {
            log::info!("profile not found, username={}", input.username);
            return Ok(None);
        };
        let is_followed = is_user_followed(&self.unit_of_work, user.id, input.user_id()).await?;
        Ok(Some(Profile { user, is_followed }))
    }
}
