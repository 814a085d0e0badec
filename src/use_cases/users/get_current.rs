use async_trait::async_trait;

use crate::{
    db::UnitOfWork,
    error::{AppError, AppResult},
    use_cases::{
        authenticated_input, common::get_user, AuthenticatedInput, RequiredAuth, UseCase,
    },
};

use super::UserWithToken;

#[derive(Debug, Clone)]
pub struct GetCurrentUserInput {
    pub auth: RequiredAuth,
}

authenticated_input!(GetCurrentUserInput => RequiredAuth);

pub struct GetCurrentUserUseCase<U> {
    unit_of_work: U,
}

impl<U: UnitOfWork> GetCurrentUserUseCase<U> {
    pub fn new(unit_of_work: U) -> Self {
        Self { unit_of_work }
    }
}

#[async_trait]
impl<U: UnitOfWork> UseCase for GetCurrentUserUseCase<U> {
    type Input = GetCurrentUserInput;
    type Output = UserWithToken;

    async fn execute(&self, input: Self::Input) -> AppResult<Self::Output> {
        let user_id = input.ensure_authenticated()?;
        let Some(user) = get_user(&self.unit_of_work, user_id).await? else {
            log::warn!("authenticated user not found, user_id={user_id}");
            return Err(AppError::UserIsNotAuthenticated);
        };
        Ok(UserWithToken {
            user,
            token: input.auth.token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::memory::MemoryUnitOfWork, testing::create_user};

    #[tokio::test]
    async fn current_user_keeps_token() {
        let uow = MemoryUnitOfWork::new();
        let alice = create_user(&uow, "alice").await;

        let current = GetCurrentUserUseCase::new(uow)
            .execute(GetCurrentUserInput {
                auth: RequiredAuth::new("token").with_user(alice.id),
            })
            .await
            .unwrap();
        assert_eq!(current.user, alice);
        assert_eq!(current.token, "token");
    }

    #[tokio::test]
    async fn vanished_user_is_not_authenticated() {
        let err = GetCurrentUserUseCase::new(MemoryUnitOfWork::new())
            .execute(GetCurrentUserInput {
                auth: RequiredAuth::new("token").with_user(1),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UserIsNotAuthenticated));
    }
}
