use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};

use crate::{
    db::{Comment, CommentFilter, CommentId, CommentRepository, CreateCommentInput},
    error::AppResult,
};

use super::{now, PgUnitOfWorkContext};

#[async_trait]
impl CommentRepository for PgUnitOfWorkContext {
    async fn create(&mut self, input: CreateCommentInput) -> AppResult<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            "
            INSERT INTO comment (author_id, article_id, body, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            ",
        )
        .bind(input.author_id)
        .bind(input.article_id)
        .bind(input.body)
        .bind(now())
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(comment)
    }

    async fn get_many(&mut self, filter: &CommentFilter) -> AppResult<Vec<Comment>> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM comment");
        if let Some(article_id) = filter.article_id {
            qb.push(" WHERE article_id = ").push_bind(article_id);
        }
        qb.push(" ORDER BY id");

        let comments = qb
            .build_query_as::<Comment>()
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(comments)
    }

    async fn get_by_id(&mut self, id: CommentId) -> AppResult<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>("SELECT * FROM comment WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(comment)
    }

    async fn delete(&mut self, id: CommentId) -> AppResult<Option<CommentId>> {
        let deleted =
            sqlx::query_scalar::<_, CommentId>("DELETE FROM comment WHERE id = $1 RETURNING id")
                .bind(id)
                .fetch_optional(&mut *self.tx)
                .await?;
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use super::*;
    use crate::db::{
        postgres::fixtures::{begin, create_article, create_user},
        UnitOfWorkContext,
    };

    #[sqlx::test]
    #[ignore = "needs a PostgreSQL database at DATABASE_URL"]
    async fn comments_are_filtered_by_article(pool: PgPool) {
        let mut ctx = begin(&pool).await;
        let alice = create_user(&mut ctx, "alice").await;
        let first = create_article(&mut ctx, alice.id, "First", &[]).await;
        let second = create_article(&mut ctx, alice.id, "Second", &[]).await;

        for (article_id, body) in [(first.id, "one"), (second.id, "two"), (first.id, "three")] {
            ctx.comments()
                .create(CreateCommentInput {
                    author_id: alice.id,
                    article_id,
                    body: body.to_string(),
                })
                .await
                .unwrap();
        }

        let comments = ctx
            .comments()
            .get_many(&CommentFilter {
                article_id: Some(first.id),
            })
            .await
            .unwrap();
        let bodies: Vec<&str> = comments.iter().map(|c| c.body.as_str()).collect();
        assert_eq!(bodies, vec!["one", "three"]);

        let all = ctx.comments().get_many(&CommentFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[sqlx::test]
    #[ignore = "needs a PostgreSQL database at DATABASE_URL"]
    async fn deleting_twice_reports_missing_comment(pool: PgPool) {
        let mut ctx = begin(&pool).await;
        let alice = create_user(&mut ctx, "alice").await;
        let article = create_article(&mut ctx, alice.id, "First", &[]).await;
        let comment = ctx
            .comments()
            .create(CreateCommentInput {
                author_id: alice.id,
                article_id: article.id,
                body: "hello".to_string(),
            })
            .await
            .unwrap();

        let found = ctx.comments().get_by_id(comment.id).await.unwrap();
        assert_eq!(found, Some(comment.clone()));

        assert_eq!(ctx.comments().delete(comment.id).await.unwrap(), Some(comment.id));
        assert_eq!(ctx.comments().delete(comment.id).await.unwrap(), None);
        assert!(ctx.comments().get_by_id(comment.id).await.unwrap().is_none());
    }
}
