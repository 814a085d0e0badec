use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    db::UserId,
    error::{AppError, AppResult},
    utils::jwt::{AuthToken, AuthTokenGenerator},
};

use super::UseCase;

/// Auth part of an input for operations that need a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredAuth {
    pub token: AuthToken,
    pub user_id: Option<UserId>,
}

impl RequiredAuth {
    pub fn new(token: impl Into<AuthToken>) -> Self {
        Self {
            token: token.into(),
            user_id: None,
        }
    }

    pub fn with_user(mut self, id: UserId) -> Self {
        self.user_id = Some(id);
        self
    }
}

/// Auth part of an input for operations open to anonymous callers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionalAuth {
    pub token: Option<AuthToken>,
    pub user_id: Option<UserId>,
}

impl OptionalAuth {
    pub fn new(token: Option<AuthToken>) -> Self {
        Self {
            token,
            user_id: None,
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, id: UserId) -> Self {
        self.user_id = Some(id);
        self
    }
}

pub trait Auth: Send {
    fn token(&self) -> Option<&str>;

    fn user_id(&self) -> Option<UserId>;

    fn set_user_id(&mut self, id: UserId);
}

impl Auth for RequiredAuth {
    fn token(&self) -> Option<&str> {
        Some(&self.token)
    }

    fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    fn set_user_id(&mut self, id: UserId) {
        self.user_id = Some(id);
    }
}

impl Auth for OptionalAuth {
    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    fn set_user_id(&mut self, id: UserId) {
        self.user_id = Some(id);
    }
}

/// An input whose caller can be resolved from an auth token.
pub trait AuthenticatedInput: Send + Sized {
    type Auth: Auth;

    fn auth(&self) -> &Self::Auth;

    fn auth_mut(&mut self) -> &mut Self::Auth;

    fn user_id(&self) -> Option<UserId> {
        self.auth().user_id()
    }

    fn with_user_id(mut self, id: UserId) -> Self {
        self.auth_mut().set_user_id(id);
        self
    }

    fn ensure_authenticated(&self) -> AppResult<UserId> {
        self.user_id().ok_or(AppError::UserIsNotAuthenticated)
    }
}

/// Implements [`AuthenticatedInput`] for structs with an `auth` field.
macro_rules! authenticated_input {
    ($($input:ty => $auth:ty),+ $(,)?) => {
        $(
            impl $crate::use_cases::AuthenticatedInput for $input {
                type Auth = $auth;

                fn auth(&self) -> &Self::Auth {
                    &self.auth
                }

                fn auth_mut(&mut self) -> &mut Self::Auth {
                    &mut self.auth
                }
            }
        )+
    };
}

pub(crate) use authenticated_input;

/// Resolves the caller from the input's token before running `use_case`.
///
/// A missing or unresolvable token is not an error here: the input is passed
/// on without a user id and the wrapped use case decides what that means.
pub struct WithAuthentication<G: ?Sized, C> {
    auth_token_generator: Arc<G>,
    use_case: C,
}

impl<G: ?Sized, C> WithAuthentication<G, C> {
    pub fn new(auth_token_generator: Arc<G>, use_case: C) -> Self {
        Self {
            auth_token_generator,
            use_case,
        }
    }
}

#[async_trait]
impl<G, C> UseCase for WithAuthentication<G, C>
where
    G: AuthTokenGenerator + ?Sized,
    C: UseCase,
    C::Input: AuthenticatedInput,
{
    type Input = C::Input;
    type Output = C::Output;

    async fn execute(&self, input: Self::Input) -> AppResult<Self::Output> {
        let token = input.auth().token().map(str::to_owned);
        let user_id = match token {
            Some(token) => self.auth_token_generator.get_user_id(&token).await,
            None => None,
        };

        let input = match user_id {
            Some(user_id) => {
                log::info!("user authenticated, user_id={user_id}");
                input.with_user_id(user_id)
            }
            None => {
                log::info!("auth token is not provided or invalid");
                input
            }
        };

        self.use_case.execute(input).await
    }
}
