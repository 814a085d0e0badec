use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::AppResult;

use super::ArticleId;

#[async_trait]
pub trait TagRepository: Send {
    /// Creates missing tags and links all of them to the article.
    async fn create(&mut self, article_id: ArticleId, tags: &[String]) -> AppResult<()>;

    async fn get_all(&mut self) -> AppResult<Vec<String>>;

    /// Tags of the article in alphabetical order.
    async fn get_for_article(&mut self, article_id: ArticleId) -> AppResult<Vec<String>>;

    async fn get_for_articles(
        &mut self,
        article_ids: &[ArticleId],
    ) -> AppResult<HashMap<ArticleId, Vec<String>>>;
}

/// Drops repeated tags, keeping the first occurrence of each.
pub fn dedup_tags(tags: Vec<String>) -> Vec<String> {
    let mut result: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        if !result.contains(&tag) {
            result.push(tag);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_keeps_first_occurrence_order() {
        let tags = vec!["b".to_string(), "a".to_string(), "b".to_string()];
        assert_eq!(dedup_tags(tags), vec!["b".to_string(), "a".to_string()]);
    }
}
