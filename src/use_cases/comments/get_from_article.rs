use async_trait::async_trait;

use crate::{
    db::{CommentFilter, CommentWithExtra, UnitOfWork, UnitOfWorkContext},
    error::AppResult,
    use_cases::{
        authenticated_input,
        common::{are_users_followed, distinct, get_article, get_users},
        AuthenticatedInput, OptionalAuth, UseCase,
    },
};

#[derive(Debug, Clone)]
pub struct GetCommentsFromArticleInput {
    pub auth: OptionalAuth,
    pub article_slug: String,
}

authenticated_input!(GetCommentsFromArticleInput => OptionalAuth);

pub struct GetCommentsFromArticleUseCase<U> {
    unit_of_work: U,
}

impl<U: UnitOfWork> GetCommentsFromArticleUseCase<U> {
    pub fn new(unit_of_work: U) -> Self {
        Self { unit_of_work }
    }
}

#[async_trait]
impl<U: UnitOfWork> UseCase for GetCommentsFromArticleUseCase<U> {
    type Input = GetCommentsFromArticleInput;
    type Output = Vec<CommentWithExtra>;

    /// Comments of an unknown article are an empty list.
    async fn execute(&self, input: Self::Input) -> AppResult<Self::Output> {
        let Some(article) = get_article(&self.unit_of_work, &input.article_slug).await? else {
            return Ok(Vec::new());
        };

        let mut ctx = self.unit_of_work.begin().await?;
        let comments = ctx
            .comments()
            .get_many(&CommentFilter {
                article_id: Some(article.id),
            })
            .await?;
        drop(ctx);

        let author_ids = distinct(comments.iter().map(|comment| comment.author_id));

        let (authors, followed) = tokio::try_join!(
            get_users(&self.unit_of_work, &author_ids),
            are_users_followed(&self.unit_of_work, &author_ids, input.user_id()),
        )?;

        let comments: Vec<CommentWithExtra> = comments
            .into_iter()
            .filter_map(|comment| {
                let Some(author) = authors.get(&comment.author_id) else {
                    log::error!(
                        "author of a comment not found, comment_id={} author_id={}",
                        comment.id,
                        comment.author_id
                    );
                    return None;
                };
                Some(CommentWithExtra {
                    is_author_followed: followed.get(&comment.author_id).copied().unwrap_or(false),
                    author: author.clone(),
                    comment,
                })
            })
            .collect();

        log::info!(
            "got comments from the article, article_id={} count={}",
            article.id,
            comments.len()
        );
        Ok(comments)
    }
}
