use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    db::UnitOfWork,
    error::AppResult,
    utils::{hasher::PasswordHasher, jwt::AuthTokenGenerator},
};

use self::{articles::*, comments::*, profiles::*, tags::*, users::*};

pub mod articles;
mod auth;
pub mod comments;
mod common;
pub mod profiles;
pub mod tags;
pub mod users;

pub use auth::*;

/// One user-visible operation.
#[async_trait]
pub trait UseCase: Send + Sync {
    type Input: Send + 'static;
    type Output: Send;

    async fn execute(&self, input: Self::Input) -> AppResult<Self::Output>;
}

pub type Authenticated<C> = WithAuthentication<dyn AuthTokenGenerator, C>;

/// Every use case of the application, wired to one storage backend.
pub struct UseCases<U: UnitOfWork> {
    pub sign_up: SignUpUseCase<U>,
    pub sign_in: SignInUseCase<U>,
    pub get_current_user: Authenticated<GetCurrentUserUseCase<U>>,
    pub update_current_user: Authenticated<UpdateCurrentUserUseCase<U>>,

    pub get_profile: Authenticated<GetProfileUseCase<U>>,
    pub follow: Authenticated<FollowUseCase<U>>,
    pub unfollow: Authenticated<UnfollowUseCase<U>>,

    pub create_article: Authenticated<CreateArticleUseCase<U>>,
    pub get_article: Authenticated<GetArticleUseCase<U>>,
    pub list_articles: Authenticated<ListArticlesUseCase<U>>,
    pub feed_articles: Authenticated<FeedArticlesUseCase<U>>,
    pub update_article: Authenticated<UpdateArticleUseCase<U>>,
    pub delete_article: Authenticated<DeleteArticleUseCase<U>>,
    pub favorite_article: Authenticated<FavoriteArticleUseCase<U>>,
    pub unfavorite_article: Authenticated<UnfavoriteArticleUseCase<U>>,

    pub add_comment: Authenticated<AddCommentToArticleUseCase<U>>,
    pub get_comments: Authenticated<GetCommentsFromArticleUseCase<U>>,
    pub delete_comment: Authenticated<DeleteCommentUseCase<U>>,

    pub list_tags: ListTagsUseCase<U>,
}

impl<U: UnitOfWork> UseCases<U> {
    pub fn new(
        uow: U,
        password_hasher: Arc<dyn PasswordHasher>,
        auth_token_generator: Arc<dyn AuthTokenGenerator>,
    ) -> Self {
        let generator = &auth_token_generator;

        Self {
            sign_up: SignUpUseCase::new(uow.clone(), password_hasher.clone(), generator.clone()),
            sign_in: SignInUseCase::new(uow.clone(), password_hasher.clone(), generator.clone()),
            get_current_user: authenticated(generator, GetCurrentUserUseCase::new(uow.clone())),
            update_current_user: authenticated(
                generator,
                UpdateCurrentUserUseCase::new(uow.clone(), password_hasher),
            ),

            get_profile: authenticated(generator, GetProfileUseCase::new(uow.clone())),
            follow: authenticated(generator, FollowUseCase::new(uow.clone())),
            unfollow: authenticated(generator, UnfollowUseCase::new(uow.clone())),

            create_article: authenticated(generator, CreateArticleUseCase::new(uow.clone())),
            get_article: authenticated(generator, GetArticleUseCase::new(uow.clone())),
            list_articles: authenticated(generator, ListArticlesUseCase::new(uow.clone())),
            feed_articles: authenticated(generator, FeedArticlesUseCase::new(uow.clone())),
            update_article: authenticated(generator, UpdateArticleUseCase::new(uow.clone())),
            delete_article: authenticated(generator, DeleteArticleUseCase::new(uow.clone())),
            favorite_article: authenticated(generator, FavoriteArticleUseCase::new(uow.clone())),
            unfavorite_article: authenticated(
                generator,
                UnfavoriteArticleUseCase::new(uow.clone()),
            ),

            add_comment: authenticated(generator, AddCommentToArticleUseCase::new(uow.clone())),
            get_comments: authenticated(
                generator,
                GetCommentsFromArticleUseCase::new(uow.clone()),
            ),
            delete_comment: authenticated(generator, DeleteCommentUseCase::new(uow.clone())),

            list_tags: ListTagsUseCase::new(uow),
        }
    }
}

fn authenticated<C>(generator: &Arc<dyn AuthTokenGenerator>, use_case: C) -> Authenticated<C> {
    WithAuthentication::new(generator.clone(), use_case)
}
