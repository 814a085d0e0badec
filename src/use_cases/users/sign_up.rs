use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    db::{CreateUserInput, UnitOfWork, UnitOfWorkContext},
    error::AppResult,
    use_cases::UseCase,
    utils::{hasher::PasswordHasher, jwt::AuthTokenGenerator},
};

use super::UserWithToken;

#[derive(Debug, Clone)]
pub struct SignUpInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub struct SignUpUseCase<U> {
    unit_of_work: U,
    password_hasher: Arc<dyn PasswordHasher>,
    auth_token_generator: Arc<dyn AuthTokenGenerator>,
}

impl<U: UnitOfWork> SignUpUseCase<U> {
    pub fn new(
        unit_of_work: U,
        password_hasher: Arc<dyn PasswordHasher>,
        auth_token_generator: Arc<dyn AuthTokenGenerator>,
    ) -> Self {
        Self {
            unit_of_work,
            password_hasher,
            auth_token_generator,
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> UseCase for SignUpUseCase<U> {
    type Input = SignUpInput;
    type Output = UserWithToken;

    /// Fails with `UsernameAlreadyExists` or `EmailAlreadyExists` if either
    /// is taken.
    async fn execute(&self, input: Self::Input) -> AppResult<Self::Output> {
        let password_hash = self.password_hasher.hash_password(&input.password).await?;

        let mut ctx = self.unit_of_work.begin().await?;
        let user = ctx
            .users()
            .create(CreateUserInput {
                username: input.username,
                email: input.email,
                password_hash,
            })
            .await?;
        ctx.commit().await?;
        log::info!("user has been signed up, user_id={}", user.id);

        let token = self.auth_token_generator.generate_token(&user).await?;
        Ok(UserWithToken { user, token })
    }
}
