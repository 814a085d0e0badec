use async_trait::async_trait;

use crate::{
    db::{ArticleFilter, UnitOfWork},
    error::AppResult,
    use_cases::{authenticated_input, AuthenticatedInput, RequiredAuth, UseCase},
};

use super::{common::list_with_extra, ArticleList, ArticlePage};

#[derive(Debug, Clone)]
pub struct FeedArticlesInput {
    pub auth: RequiredAuth,
    pub page: ArticlePage,
}

authenticated_input!(FeedArticlesInput => RequiredAuth);

pub struct FeedArticlesUseCase<U> {
    unit_of_work: U,
}

impl<U: UnitOfWork> FeedArticlesUseCase<U> {
    pub fn new(unit_of_work: U) -> Self {
        Self { unit_of_work }
    }
}

#[async_trait]
impl<U: UnitOfWork> UseCase for FeedArticlesUseCase<U> {
    type Input = FeedArticlesInput;
    type Output = ArticleList;

    /// Articles by the authors the caller follows.
    async fn execute(&self, input: Self::Input) -> AppResult<Self::Output> {
        let user_id = input.ensure_authenticated()?;
        let filter = ArticleFilter {
            feed_of: Some(user_id),
            ..Default::default()
        };
        list_with_extra(&self.unit_of_work, &filter, input.page, Some(user_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::{memory::MemoryUnitOfWork, UnitOfWorkContext},
        error::AppError,
        testing::{create_article, create_user},
    };

    #[tokio::test]
    async fn feed_contains_followed_authors_only() {
        let uow = MemoryUnitOfWork::new();
        let alice = create_user(&uow, "alice").await;
        let bob = create_user(&uow, "bob").await;
        let carol = create_user(&uow, "carol").await;
        create_article(&uow, bob.id, "By Bob", &[]).await;
        create_article(&uow, carol.id, "By Carol", &[]).await;
        create_article(&uow, alice.id, "By Alice", &[]).await;

        let mut ctx = uow.begin().await.unwrap();
        ctx.followers().follow(alice.id, bob.id).await.unwrap();
        ctx.commit().await.unwrap();

        let use_case = FeedArticlesUseCase::new(uow);
        let feed = use_case
            .execute(FeedArticlesInput {
                auth: RequiredAuth::new("token").with_user(alice.id),
                page: ArticlePage::default(),
            })
            .await
            .unwrap();

        assert_eq!(feed.count, 1);
        assert_eq!(feed.articles.len(), 1);
        assert_eq!(feed.articles[0].article.title, "By Bob");
        assert!(feed.articles[0].is_author_followed);
    }

    #[tokio::test]
    async fn feed_requires_authentication() {
        let use_case = FeedArticlesUseCase::new(MemoryUnitOfWork::new());
        let err = use_case
            .execute(FeedArticlesInput {
                auth: RequiredAuth::new("token"),
                page: ArticlePage::default(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UserIsNotAuthenticated));
    }
}
