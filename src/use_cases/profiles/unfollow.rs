use async_trait::async_trait;

use crate::{
    db::{Profile, UnitOfWork, UnitOfWorkContext},
    error::AppResult,
    use_cases::{authenticated_input, AuthenticatedInput, RequiredAuth, UseCase},
};

#[derive(Debug, Clone)]
pub struct UnfollowInput {
    pub auth: RequiredAuth,
    pub username: String,
}

authenticated_input!(UnfollowInput => RequiredAuth);

pub struct UnfollowUseCase<U> {
    unit_of_work: U,
}

impl<U: UnitOfWork> UnfollowUseCase<U> {
    pub fn new(unit_of_work: U) -> Self {
        Self { unit_of_work }
    }
}

#[async_trait]
impl<U: UnitOfWork> UseCase for UnfollowUseCase<U> {
    type Input = UnfollowInput;
    type Output = Option<Profile>;

    async fn execute(&self, input: Self::Input) -> AppResult<Self::Output> {
        let user_id = input.ensure_authenticated()?;

        let mut ctx = self.unit_of_work.begin().await?;
        let Some(user) = ctx.users().get_by_username(&input.username).await? else {
            log::info!("could not unfollow user, user not found, username={}", input.username);
            return Ok(None);
        };
        ctx.followers().unfollow(user_id, user.id).await?;
        ctx.commit().await?;

        log::info!("user has been unfollowed, follower_id={user_id} followed_id={}", user.id);
        Ok(Some(Profile {
            user,
            is_followed: false,
        }))
    }
}
