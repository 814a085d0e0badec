use async_trait::async_trait;

use crate::{
    db::{CommentWithExtra, CreateCommentInput, UnitOfWork, UnitOfWorkContext},
    error::{AppError, AppResult},
    use_cases::{
        authenticated_input,
        common::{get_article, get_user, is_user_followed},
        AuthenticatedInput, RequiredAuth, UseCase,
    },
};

#[derive(Debug, Clone)]
pub struct AddCommentToArticleInput {
    pub auth: RequiredAuth,
    pub article_slug: String,
    pub body: String,
}

authenticated_input!(AddCommentToArticleInput => RequiredAuth);

pub struct AddCommentToArticleUseCase<U> {
    unit_of_work: U,
}

impl<U: UnitOfWork> AddCommentToArticleUseCase<U> {
    pub fn new(unit_of_work: U) -> Self {
        Self { unit_of_work }
    }
}

#[async_trait]
impl<U: UnitOfWork> UseCase for AddCommentToArticleUseCase<U> {
    type Input = AddCommentToArticleInput;
    type Output = CommentWithExtra;

    /// Fails with `ArticleDoesNotExist` if there is no article to comment.
    async fn execute(&self, input: Self::Input) -> AppResult<Self::Output> {
        let user_id = input.ensure_authenticated()?;
        let Some(author) = get_user(&self.unit_of_work, user_id).await? else {
            log::warn!("authenticated user not found, user_id={user_id}");
            return Err(AppError::UserIsNotAuthenticated);
        };
        let Some(article) = get_article(&self.unit_of_work, &input.article_slug).await? else {
            log::info!(
                "could not add comment, article not found, slug={} user_id={user_id}",
                input.article_slug
            );
            return Err(AppError::ArticleDoesNotExist);
        };

        let mut ctx = self.unit_of_work.begin().await?;
        let comment = ctx
            .comments()
            .create(CreateCommentInput {
                author_id: user_id,
                article_id: article.id,
                body: input.body,
            })
            .await?;
        ctx.commit().await?;

        log::info!(
            "comment has been created, comment_id={} article_id={} user_id={user_id}",
            comment.id,
            article.id
        );
        let is_author_followed =
            is_user_followed(&self.unit_of_work, user_id, Some(user_id)).await?;
        Ok(CommentWithExtra {
            comment,
            author,
            is_author_followed,
        })
    }
}
