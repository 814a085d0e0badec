use async_trait::async_trait;

use crate::{
    db::{ArticleFilter, UnitOfWork},
    error::AppResult,
    use_cases::{authenticated_input, AuthenticatedInput, OptionalAuth, UseCase},
};

use super::{common::list_with_extra, ArticleList, ArticlePage};

#[derive(Debug, Clone, Default)]
pub struct ListArticlesInput {
    pub auth: OptionalAuth,
    pub tag: Option<String>,
    pub author: Option<String>,
    pub favorite_of: Option<String>,
    pub page: ArticlePage,
}

authenticated_input!(ListArticlesInput => OptionalAuth);

impl ListArticlesInput {
    fn to_filter(&self) -> ArticleFilter {
        ArticleFilter {
            tag: self.tag.clone(),
            author: self.author.clone(),
            favorite_of: self.favorite_of.clone(),
            feed_of: None,
        }
    }
}

pub struct ListArticlesUseCase<U> {
    unit_of_work: U,
}

impl<U: UnitOfWork> ListArticlesUseCase<U> {
    pub fn new(unit_of_work: U) -> Self {
        Self { unit_of_work }
    }
}

#[async_trait]
impl<U: UnitOfWork> UseCase for ListArticlesUseCase<U> {
    type Input = ListArticlesInput;
    type Output = ArticleList;

    async fn execute(&self, input: Self::Input) -> AppResult<Self::Output> {
        let filter = input.to_filter();
        list_with_extra(&self.unit_of_work, &filter, input.page, input.user_id()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::{memory::MemoryUnitOfWork, Article, UnitOfWorkContext},
        testing::{create_article, create_user},
    };

    fn titles(list: &ArticleList) -> Vec<&str> {
        list.articles
            .iter()
            .map(|article| article.article.title.as_str())
            .collect()
    }

    #[tokio::test]
    async fn pages_follow_creation_order() {
        let uow = MemoryUnitOfWork::new();
        let alice = create_user(&uow, "alice").await;
        for n in 1..=5 {
            create_article(&uow, alice.id, &format!("Article {n}"), &[]).await;
        }

        let use_case = ListArticlesUseCase::new(uow);
        let list = use_case
            .execute(ListArticlesInput {
                page: ArticlePage::new(2, 2).unwrap(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(titles(&list), vec!["Article 3", "Article 4"]);
        assert_eq!(list.count, 5);
    }

    #[tokio::test]
    async fn filters_are_applied() {
        let uow = MemoryUnitOfWork::new();
        let alice = create_user(&uow, "alice").await;
        let bob = create_user(&uow, "bob").await;
        let dragons = create_article(&uow, alice.id, "Dragons", &["fantasy"]).await;
        create_article(&uow, alice.id, "Taxes", &["finance"]).await;
        create_article(&uow, bob.id, "Elves", &["fantasy"]).await;

        let mut ctx = uow.begin().await.unwrap();
        ctx.favorites().add(bob.id, dragons.id).await.unwrap();
        ctx.commit().await.unwrap();

        let use_case = ListArticlesUseCase::new(uow);

        let list = use_case
            .execute(ListArticlesInput {
                tag: Some("fantasy".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(titles(&list), vec!["Dragons", "Elves"]);

        let list = use_case
            .execute(ListArticlesInput {
                tag: Some("fantasy".to_string()),
                author: Some("alice".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(titles(&list), vec!["Dragons"]);

        let list = use_case
            .execute(ListArticlesInput {
                auth: OptionalAuth::anonymous().with_user(bob.id),
                favorite_of: Some("bob".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(titles(&list), vec!["Dragons"]);
        assert!(list.articles[0].is_article_favorite);
        assert_eq!(list.articles[0].favorite_of_user_count, 1);
        assert_eq!(list.count, 1);
    }

    #[tokio::test]
    async fn articles_without_author_are_skipped() {
        let uow = MemoryUnitOfWork::new();
        let alice = create_user(&uow, "alice").await;
        create_article(&uow, alice.id, "Kept", &[]).await;
        let orphan: Article = create_article(&uow, alice.id + 100, "Orphan", &[]).await;

        let use_case = ListArticlesUseCase::new(uow);
        let list = use_case.execute(ListArticlesInput::default()).await.unwrap();

        assert_eq!(titles(&list), vec!["Kept"]);
        assert_eq!(list.count, 2);
        assert!(list.articles.iter().all(|a| a.article.id != orphan.id));
    }
}
