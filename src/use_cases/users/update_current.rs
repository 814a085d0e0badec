use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    db::{Patch, UnitOfWork, UnitOfWorkContext, UpdateUserInput},
    error::{AppError, AppResult},
    use_cases::{authenticated_input, AuthenticatedInput, RequiredAuth, UseCase},
    utils::hasher::PasswordHasher,
};

use super::UserWithToken;

#[derive(Debug, Clone)]
pub struct UpdateCurrentUserInput {
    pub auth: RequiredAuth,
    pub username: Patch<String>,
    pub email: Patch<String>,
    pub password: Patch<String>,
    pub bio: Patch<String>,
    pub image: Patch<Option<String>>,
}

authenticated_input!(UpdateCurrentUserInput => RequiredAuth);

impl UpdateCurrentUserInput {
    pub fn new(auth: RequiredAuth) -> Self {
        Self {
            auth,
            username: Patch::Unchanged,
            email: Patch::Unchanged,
            password: Patch::Unchanged,
            bio: Patch::Unchanged,
            image: Patch::Unchanged,
        }
    }
}

pub struct UpdateCurrentUserUseCase<U> {
    unit_of_work: U,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl<U: UnitOfWork> UpdateCurrentUserUseCase<U> {
    pub fn new(unit_of_work: U, password_hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            unit_of_work,
            password_hasher,
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> UseCase for UpdateCurrentUserUseCase<U> {
    type Input = UpdateCurrentUserInput;
    type Output = UserWithToken;

    /// Fails with `UsernameAlreadyExists` or `EmailAlreadyExists` if the new
    /// value belongs to someone else.
    async fn execute(&self, input: Self::Input) -> AppResult<Self::Output> {
        let user_id = input.ensure_authenticated()?;

        let password_hash = match input.password {
            Patch::Set(password) => {
                Patch::Set(self.password_hasher.hash_password(&password).await?)
            }
            Patch::Unchanged => Patch::Unchanged,
        };

        let mut ctx = self.unit_of_work.begin().await?;
        let updated = ctx
            .users()
            .update(
                user_id,
                UpdateUserInput {
                    username: input.username,
                    email: input.email,
                    password_hash,
                    bio: input.bio,
                    image: input.image,
                },
            )
            .await?;
        let Some(user) = updated else {
            log::warn!("authenticated user not found, user_id={user_id}");
            return Err(AppError::UserIsNotAuthenticated);
        };
        ctx.commit().await?;

        log::info!("user has been updated, user_id={user_id}");
        Ok(UserWithToken {
            user,
            token: input.auth.token,
        })
    }
}
