use std::collections::HashMap;

use async_trait::async_trait;

use crate::{
    db::{ArticleId, TagRepository},
    error::AppResult,
};

use super::{now, PgUnitOfWorkContext};

#[async_trait]
impl TagRepository for PgUnitOfWorkContext {
    async fn create(&mut self, article_id: ArticleId, tags: &[String]) -> AppResult<()> {
        if tags.is_empty() {
            return Ok(());
        }
        let created_at = now();

        sqlx::query(
            "
            INSERT INTO tag (tag, created_at)
            SELECT UNNEST($1::TEXT[]), $2
            ON CONFLICT DO NOTHING
            ",
        )
        .bind(tags)
        .bind(created_at)
        .execute(&mut *self.tx)
        .await?;

        sqlx::query(
            "
            INSERT INTO article_tag (article_id, tag_id, created_at)
            SELECT $1, tag.id, $3 FROM tag WHERE tag.tag = ANY($2)
            ON CONFLICT DO NOTHING
            ",
        )
        .bind(article_id)
        .bind(tags)
        .bind(created_at)
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn get_all(&mut self) -> AppResult<Vec<String>> {
        let tags = sqlx::query_scalar::<_, String>("SELECT tag FROM tag ORDER BY id")
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(tags)
    }

    async fn get_for_article(&mut self, article_id: ArticleId) -> AppResult<Vec<String>> {
        let tags = sqlx::query_scalar::<_, String>(
            "
            SELECT tag.tag
            FROM tag
            INNER JOIN article_tag ON article_tag.tag_id = tag.id
            WHERE article_tag.article_id = $1
            ORDER BY tag.tag
            ",
        )
        .bind(article_id)
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(tags)
    }

    async fn get_for_articles(
        &mut self,
        article_ids: &[ArticleId],
    ) -> AppResult<HashMap<ArticleId, Vec<String>>> {
        if article_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, (ArticleId, String)>(
            "
            SELECT article_tag.article_id, tag.tag
            FROM tag
            INNER JOIN article_tag ON article_tag.tag_id = tag.id
            WHERE article_tag.article_id = ANY($1)
            ORDER BY tag.tag
            ",
        )
        .bind(article_ids)
        .fetch_all(&mut *self.tx)
        .await?;

        let mut tags: HashMap<ArticleId, Vec<String>> = HashMap::new();
        for (article_id, tag) in rows {
            tags.entry(article_id).or_default().push(tag);
        }
        Ok(tags)
    }
}
