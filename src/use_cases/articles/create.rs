use async_trait::async_trait;

use crate::{
    db::{self, dedup_tags, ArticleWithExtra, UnitOfWork, UnitOfWorkContext},
    error::{AppError, AppResult},
    use_cases::{
        authenticated_input, common::get_user, AuthenticatedInput, RequiredAuth, UseCase,
    },
};

#[derive(Debug, Clone)]
pub struct CreateArticleInput {
    pub auth: RequiredAuth,
    pub title: String,
    pub description: String,
    pub body: String,
    pub tags: Vec<String>,
}

authenticated_input!(CreateArticleInput => RequiredAuth);

pub struct CreateArticleUseCase<U> {
    unit_of_work: U,
}

impl<U: UnitOfWork> CreateArticleUseCase<U> {
    pub fn new(unit_of_work: U) -> Self {
        Self { unit_of_work }
    }
}

#[async_trait]
impl<U: UnitOfWork> UseCase for CreateArticleUseCase<U> {
    type Input = CreateArticleInput;
    type Output = ArticleWithExtra;

    /// Fails with `UserIsNotAuthenticated` if the caller is unknown.
    async fn execute(&self, input: Self::Input) -> AppResult<Self::Output> {
        let user_id = input.ensure_authenticated()?;
        let Some(author) = get_user(&self.unit_of_work, user_id).await? else {
            log::info!("could not find user by id, user_id={user_id}");
            return Err(AppError::UserIsNotAuthenticated);
        };

        let tags = dedup_tags(input.tags);

        let mut ctx = self.unit_of_work.begin().await?;
        let article = ctx
            .articles()
            .create(db::CreateArticleInput {
                author_id: author.id,
                title: input.title,
                description: input.description,
                body: input.body,
            })
            .await?;
        ctx.tags().create(article.id, &tags).await?;
        ctx.commit().await?;

        log::info!(
            "article has been created, id={} slug={} tags={tags:?}",
            article.id,
            article.slug
        );

        Ok(ArticleWithExtra {
            article,
            author,
            tags,
            is_author_followed: false,
            is_article_favorite: false,
            favorite_of_user_count: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::memory::MemoryUnitOfWork,
        testing::{create_user, token_for},
    };

    fn input(auth: RequiredAuth, tags: &[&str]) -> CreateArticleInput {
        CreateArticleInput {
            auth,
            title: "How to train your dragon".to_string(),
            description: "Ever wonder how?".to_string(),
            body: "You have to believe".to_string(),
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn article_is_created_with_deduplicated_tags() {
        let uow = MemoryUnitOfWork::new();
        let alice = create_user(&uow, "alice").await;
        let use_case = CreateArticleUseCase::new(uow.clone());

        let auth = RequiredAuth::new(token_for(&alice)).with_user(alice.id);
        let created = use_case
            .execute(input(auth, &["dragons", "training", "dragons"]))
            .await
            .unwrap();

        assert_eq!(created.author, alice);
        assert_eq!(created.tags, vec!["dragons", "training"]);
        assert!(created.article.slug.starts_with("how-to-train-your-dragon-"));
        assert_eq!(created.favorite_of_user_count, 0);

        let mut ctx = uow.begin().await.unwrap();
        let stored = ctx.articles().get_by_slug(&created.article.slug).await.unwrap();
        assert_eq!(stored, Some(created.article.clone()));
        let tags = ctx.tags().get_for_article(created.article.id).await.unwrap();
        assert_eq!(tags, vec!["dragons", "training"]);
    }

    #[tokio::test]
    async fn anonymous_caller_is_rejected() {
        let uow = MemoryUnitOfWork::new();
        let use_case = CreateArticleUseCase::new(uow);

        let err = use_case
            .execute(input(RequiredAuth::new("token"), &[]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UserIsNotAuthenticated));
    }

    #[tokio::test]
    async fn unknown_caller_is_rejected() {
        let uow = MemoryUnitOfWork::new();
        let use_case = CreateArticleUseCase::new(uow);

        let auth = RequiredAuth::new("token").with_user(42);
        let err = use_case.execute(input(auth, &[])).await.unwrap_err();
        assert!(matches!(err, AppError::UserIsNotAuthenticated));
    }
}
