use async_trait::async_trait;

use crate::{
    db::{Profile, UnitOfWork, UnitOfWorkContext},
    error::AppResult,
    use_cases::{authenticated_input, AuthenticatedInput, RequiredAuth, UseCase},
};

#[derive(Debug, Clone)]
pub struct FollowInput {
    pub auth: RequiredAuth,
    pub username: String,
}

authenticated_input!(FollowInput => RequiredAuth);

pub struct FollowUseCase<U> {
    unit_of_work: U,
}

impl<U: UnitOfWork> FollowUseCase<U> {
    pub fn new(unit_of_work: U) -> Self {
        Self { unit_of_work }
    }
}

#[async_trait]
impl<U: UnitOfWork> UseCase for FollowUseCase<U> {
    type Input = FollowInput;
    type Output = Option<Profile>;

    async fn execute(&self, input: Self::Input) -> AppResult<Self::Output> {
        let user_id = input.ensure_authenticated()?;

        let mut ctx = self.unit_of_work.begin().await?;
        let Some(user) = ctx.users().get_by_username(&input.username).await? else {
            log::info!("could not follow user, user not found, username={}", input.username);
            return Ok(None);
        };
        ctx.followers().follow(user_id, user.id).await?;
        ctx.commit().await?;

        log::info!("user has been followed, follower_id={user_id} followed_id={}", user.id);
        Ok(Some(Profile {
            user,
            is_followed: true,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::memory::MemoryUnitOfWork, error::AppError, testing::create_user,
        use_cases::profiles::is_followed,
    };

    fn input(auth: RequiredAuth, username: &str) -> FollowInput {
        FollowInput {
            auth,
            username: username.to_string(),
        }
    }

    #[tokio::test]
    async fn follow_is_idempotent() {
        let uow = MemoryUnitOfWork::new();
        let alice = create_user(&uow, "alice").await;
        let bob = create_user(&uow, "bob").await;
        let use_case = FollowUseCase::new(uow.clone());

        for _ in 0..2 {
            let auth = RequiredAuth::new("token").with_user(alice.id);
            let profile = use_case.execute(input(auth, "bob")).await.unwrap().unwrap();
            assert_eq!(profile.user, bob);
            assert!(profile.is_followed);
        }

        assert!(is_followed(&uow, bob.id, alice.id).await);
        assert!(!is_followed(&uow, alice.id, bob.id).await);
    }

    #[tokio::test]
    async fn unknown_username_is_not_found() {
        let uow = MemoryUnitOfWork::new();
        let alice = create_user(&uow, "alice").await;
        let use_case = FollowUseCase::new(uow);

        let auth = RequiredAuth::new("token").with_user(alice.id);
        assert_eq!(use_case.execute(input(auth, "nobody")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn anonymous_caller_is_rejected() {
        let uow = MemoryUnitOfWork::new();
        create_user(&uow, "bob").await;
        let use_case = FollowUseCase::new(uow);

        let err = use_case
            .execute(input(RequiredAuth::new("token"), "bob"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UserIsNotAuthenticated));
    }
}
