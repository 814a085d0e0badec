use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};

use crate::{
    db::{
        Article, ArticleFilter, ArticleId, ArticleRepository, CreateArticleInput, Patch,
        UpdateArticleInput,
    },
    error::AppResult,
    utils::slug::generate_slug,
};

use super::{now, PgUnitOfWorkContext};

#[async_trait]
impl ArticleRepository for PgUnitOfWorkContext {
    async fn create(&mut self, input: CreateArticleInput) -> AppResult<Article> {
        let article = sqlx::query_as::<_, Article>(
            r#"
            INSERT INTO article (author_id, slug, title, description, body, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(input.author_id)
        .bind(generate_slug(&input.title))
        .bind(input.title)
        .bind(input.description)
        .bind(input.body)
        .bind(now())
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(article)
    }

    async fn get_many(
        &mut self,
        filter: &ArticleFilter,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Article>> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT article.* FROM article");
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY article.created_at, article.id");
        qb.push(" LIMIT ").push_bind(limit);
        qb.push(" OFFSET ").push_bind(offset);

        let articles = qb
            .build_query_as::<Article>()
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(articles)
    }

    async fn count(&mut self, filter: &ArticleFilter) -> AppResult<i64> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(article.id) FROM article");
        push_filter(&mut qb, filter);

        let count = qb
            .build_query_scalar::<i64>()
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(count)
    }

    async fn get_by_slug(&mut self, slug: &str) -> AppResult<Option<Article>> {
        let article = sqlx::query_as::<_, Article>("SELECT * FROM article WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(article)
    }

    async fn update(
        &mut self,
        id: ArticleId,
        input: UpdateArticleInput,
    ) -> AppResult<Option<Article>> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE article SET updated_at = ");
        qb.push_bind(now());

        if let Patch::Set(title) = input.title {
            qb.push(", slug = ").push_bind(generate_slug(&title));
            qb.push(", title = ").push_bind(title);
        }
        if let Patch::Set(description) = input.description {
            qb.push(", description = ").push_bind(description);
        }
        if let Patch::Set(body) = input.body {
            qb.push(", body = ").push_bind(body);
        }

        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" RETURNING *");

        let article = qb
            .build_query_as::<Article>()
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(article)
    }

    async fn delete(&mut self, id: ArticleId) -> AppResult<Option<ArticleId>> {
        for stmt in [
            "DELETE FROM article_tag WHERE article_id = $1",
            "DELETE FROM favorite_article WHERE article_id = $1",
            "DELETE FROM comment WHERE article_id = $1",
        ] {
            sqlx::query(stmt).bind(id).execute(&mut *self.tx).await?;
        }

        let deleted = sqlx::query_scalar::<_, ArticleId>(
            "DELETE FROM article WHERE id = $1 RETURNING id",
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(deleted)
    }
}

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &ArticleFilter) {
    if filter.tag.is_some() {
        qb.push(
            " JOIN article_tag ON article_tag.article_id = article.id \
              JOIN tag ON tag.id = article_tag.tag_id",
        );
    }
    if filter.author.is_some() {
        qb.push(r#" JOIN "user" AS author ON author.id = article.author_id"#);
    }
    if filter.favorite_of.is_some() {
        qb.push(
            r#" JOIN favorite_article ON favorite_article.article_id = article.id
                JOIN "user" AS favoriter ON favoriter.id = favorite_article.user_id"#,
        );
    }
    if filter.feed_of.is_some() {
        qb.push(" JOIN follower ON follower.followed_id = article.author_id");
    }

    qb.push(" WHERE TRUE");

    if let Some(tag) = &filter.tag {
        qb.push(" AND tag.tag = ").push_bind(tag.clone());
    }
    if let Some(author) = &filter.author {
        qb.push(" AND author.username = ").push_bind(author.clone());
    }
    if let Some(favorite_of) = &filter.favorite_of {
        qb.push(" AND favoriter.username = ").push_bind(favorite_of.clone());
    }
    if let Some(feed_of) = filter.feed_of {
        qb.push(" AND follower.follower_id = ").push_bind(feed_of);
    }
}
