use async_trait::async_trait;

use crate::{
    db::{CommentId, UnitOfWork, UnitOfWorkContext},
    error::{AppError, AppResult},
    use_cases::{
        authenticated_input, common::get_article, AuthenticatedInput, RequiredAuth, UseCase,
    },
};

#[derive(Debug, Clone)]
pub struct DeleteCommentInput {
    pub auth: RequiredAuth,
    pub article_slug: String,
    pub comment_id: CommentId,
}

authenticated_input!(DeleteCommentInput => RequiredAuth);

pub struct DeleteCommentUseCase<U> {
    unit_of_work: U,
}

impl<U: UnitOfWork> DeleteCommentUseCase<U> {
    pub fn new(unit_of_work: U) -> Self {
        Self { unit_of_work }
    }
}

#[async_trait]
impl<U: UnitOfWork> UseCase for DeleteCommentUseCase<U> {
    type Input = DeleteCommentInput;
    type Output = Option<CommentId>;

    /// Fails with `PermissionDenied` unless the caller wrote the comment.
    async fn execute(&self, input: Self::Input) -> AppResult<Self::Output> {
        let user_id = input.ensure_authenticated()?;
        let Some(article) = get_article(&self.unit_of_work, &input.article_slug).await? else {
            log::info!(
                "could not delete comment, article not found, slug={}",
                input.article_slug
            );
            return Ok(None);
        };

        let mut ctx = self.unit_of_work.begin().await?;
        let comment = ctx
            .comments()
            .get_by_id(input.comment_id)
            .await?
            .filter(|comment| comment.article_id == article.id);
        let Some(comment) = comment else {
            log::info!(
                "could not delete comment, comment not found, comment_id={}",
                input.comment_id
            );
            return Ok(None);
        };
        if comment.author_id != user_id {
            log::info!(
                "user is not allowed to delete the comment, user_id={user_id} comment_id={}",
                comment.id
            );
            return Err(AppError::PermissionDenied);
        }

        let deleted = ctx.comments().delete(comment.id).await?;
        ctx.commit().await?;

        log::info!("comment has been deleted, comment_id={}", comment.id);
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::{memory::MemoryUnitOfWork, Comment, CreateCommentInput},
        testing::{create_article, create_user},
    };

    async fn setup() -> (MemoryUnitOfWork, String, Comment, i64, i64) {
        let uow = MemoryUnitOfWork::new();
        let alice = create_user(&uow, "alice").await;
        let bob = create_user(&uow, "bob").await;
        let article = create_article(&uow, alice.id, "Title", &[]).await;

        let mut ctx = uow.begin().await.unwrap();
        let comment = ctx
            .comments()
            .create(CreateCommentInput {
                author_id: bob.id,
                article_id: article.id,
                body: "Nice!".to_string(),
            })
            .await
            .unwrap();
        ctx.commit().await.unwrap();

        (uow, article.slug, comment, alice.id, bob.id)
    }

    fn input(user_id: i64, slug: &str, comment_id: CommentId) -> DeleteCommentInput {
        DeleteCommentInput {
            auth: RequiredAuth::new("token").with_user(user_id),
            article_slug: slug.to_string(),
            comment_id,
        }
    }

    #[tokio::test]
    async fn author_can_delete_comment() {
        let (uow, slug, comment, _, bob_id) = setup().await;
        let use_case = DeleteCommentUseCase::new(uow.clone());

        let deleted = use_case.execute(input(bob_id, &slug, comment.id)).await.unwrap();
        assert_eq!(deleted, Some(comment.id));

        let deleted = use_case.execute(input(bob_id, &slug, comment.id)).await.unwrap();
        assert_eq!(deleted, None);
    }

    #[tokio::test]
    async fn article_author_cannot_delete_others_comment() {
        let (uow, slug, comment, alice_id, _) = setup().await;
        let use_case = DeleteCommentUseCase::new(uow.clone());

        let err = use_case
            .execute(input(alice_id, &slug, comment.id))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied));

        let mut ctx = uow.begin().await.unwrap();
        assert_eq!(ctx.comments().get_by_id(comment.id).await.unwrap(), Some(comment));
    }

    #[tokio::test]
    async fn unknown_article_is_not_found() {
        let (uow, _, comment, _, bob_id) = setup().await;
        let use_case = DeleteCommentUseCase::new(uow);

        let deleted = use_case
            .execute(input(bob_id, "missing", comment.id))
            .await
            .unwrap();
        assert_eq!(deleted, None);
    }
}
