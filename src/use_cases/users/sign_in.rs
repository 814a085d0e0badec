use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    db::{UnitOfWork, UnitOfWorkContext},
    error::{AppError, AppResult},
    use_cases::UseCase,
    utils::{hasher::PasswordHasher, jwt::AuthTokenGenerator},
};

use super::UserWithToken;

#[derive(Debug, Clone)]
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

pub struct SignInUseCase<U> {
    unit_of_work: U,
    password_hasher: Arc<dyn PasswordHasher>,
    auth_token_generator: Arc<dyn AuthTokenGenerator>,
}

impl<U: UnitOfWork> SignInUseCase<U> {
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
impl<U: UnitOfWork> UseCase for SignInUseCase<U> {
    type Input = SignInInput;
    type Output = UserWithToken;

    /// Fails with `InvalidCredentials` for an unknown email and for a wrong
    /// password alike.
    async fn execute(&self, input: Self::Input) -> AppResult<Self::Output> {
        let mut ctx = self.unit_of_work.begin().await?;
        let user = ctx.users().get_by_email(&input.email).await?;
        drop(ctx);

        let Some(user) = user else {
            log::info!("user not found, email={}", input.email);
            return Err(AppError::InvalidCredentials);
        };
        if !self
            .password_hasher
            .verify(&input.password, &user.password_hash)
            .await
        {
            log::info!("invalid password, user_id={}", user.id);
            return Err(AppError::InvalidCredentials);
        }

        let token = self.auth_token_generator.generate_token(&user).await?;
        log::info!("user has been signed in, user_id={}", user.id);
        Ok(UserWithToken { user, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::memory::MemoryUnitOfWork,
        testing::{create_user, token_for, FakeAuthTokenGenerator, FakePasswordHasher},
    };

    fn use_case(uow: MemoryUnitOfWork) -> SignInUseCase<MemoryUnitOfWork> {
        SignInUseCase::new(uow, Arc::new(FakePasswordHasher), Arc::new(FakeAuthTokenGenerator))
    }

    fn input(email: &str, password: &str) -> SignInInput {
        SignInInput {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn valid_credentials_give_token() {
        let uow = MemoryUnitOfWork::new();
        let alice = create_user(&uow, "alice").await;

        let signed_in = use_case(uow)
            .execute(input("alice@example.com", "alice-password"))
            .await
            .unwrap();
        assert_eq!(signed_in.token, token_for(&alice));
        assert_eq!(signed_in.user, alice);
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_look_the_same() {
        let uow = MemoryUnitOfWork::new();
        create_user(&uow, "alice").await;
        let use_case = use_case(uow);

        let err = use_case
            .execute(input("bob@example.com", "alice-password"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));

        let err = use_case
            .execute(input("alice@example.com", "wrong"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }
}
