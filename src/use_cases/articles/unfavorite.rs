use async_trait::async_trait;

use crate::{
    db::{ArticleWithExtra, UnitOfWork, UnitOfWorkContext},
    error::AppResult,
    use_cases::{
        authenticated_input, common::get_article, AuthenticatedInput, RequiredAuth, UseCase,
    },
};

use super::common::with_favorite_status;

#[derive(Debug, Clone)]
pub struct UnfavoriteArticleInput {
    pub auth: RequiredAuth,
    pub slug: String,
}

authenticated_input!(UnfavoriteArticleInput => RequiredAuth);

pub struct UnfavoriteArticleUseCase<U> {
    unit_of_work: U,
}

impl<U: UnitOfWork> UnfavoriteArticleUseCase<U> {
    pub fn new(unit_of_work: U) -> Self {
        Self { unit_of_work }
    }
}

#[async_trait]
impl<U: UnitOfWork> UseCase for UnfavoriteArticleUseCase<U> {
    type Input = UnfavoriteArticleInput;
    type Output = Option<ArticleWithExtra>;

    async fn execute(&self, input: Self::Input) -> AppResult<Self::Output> {
        let user_id = input.ensure_authenticated()?;
        let Some(article) = get_article(&self.unit_of_work, &input.slug).await? else {
            log::info!(
                "could not remove article from favorites, article not found, slug={}",
                input.slug
            );
            return Ok(None);
        };

        let mut ctx = self.unit_of_work.begin().await?;
        let count = ctx.favorites().remove(user_id, article.id).await?;
        ctx.commit().await?;
        log::info!(
            "article has been removed from favorites, user_id={user_id} article_id={}",
            article.id
        );

        let article =
            with_favorite_status(&self.unit_of_work, article, user_id, false, count).await?;
        Ok(Some(article))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::memory::MemoryUnitOfWork,
        testing::{create_article, create_user},
    };

    fn input(user_id: i64, slug: &str) -> UnfavoriteArticleInput {
        UnfavoriteArticleInput {
            auth: RequiredAuth::new("token").with_user(user_id),
            slug: slug.to_string(),
        }
    }

    #[tokio::test]
    async fn unfavorite_is_idempotent() {
        let uow = MemoryUnitOfWork::new();
        let alice = create_user(&uow, "alice").await;
        let bob = create_user(&uow, "bob").await;
        let article = create_article(&uow, alice.id, "Title", &[]).await;

        let mut ctx = uow.begin().await.unwrap();
        ctx.favorites().add(alice.id, article.id).await.unwrap();
        ctx.favorites().add(bob.id, article.id).await.unwrap();
        ctx.commit().await.unwrap();

        let use_case = UnfavoriteArticleUseCase::new(uow);
        for _ in 0..2 {
            let article = use_case.execute(input(bob.id, &article.slug)).await.unwrap().unwrap();
            assert!(!article.is_article_favorite);
            assert_eq!(article.favorite_of_user_count, 1);
        }
    }

    #[tokio::test]
    async fn unfavorite_without_favorite_keeps_zero_count() {
        let uow = MemoryUnitOfWork::new();
        let alice = create_user(&uow, "alice").await;
        let article = create_article(&uow, alice.id, "Title", &[]).await;

        let use_case = UnfavoriteArticleUseCase::new(uow);
        let article = use_case.execute(input(alice.id, &article.slug)).await.unwrap().unwrap();
        assert!(!article.is_article_favorite);
        assert_eq!(article.favorite_of_user_count, 0);
    }

    #[tokio::test]
    async fn unknown_article_is_not_found() {
        let uow = MemoryUnitOfWork::new();
        let alice = create_user(&uow, "alice").await;
        let use_case = UnfavoriteArticleUseCase::new(uow);

        let article = use_case.execute(input(alice.id, "missing")).await.unwrap();
        assert_eq!(article, None);
    }
}
