use std::collections::HashMap;

use crate::{
    db::{
        Article, ArticleFilter, ArticleId, ArticleWithExtra, UnitOfWork, UnitOfWorkContext, User,
        UserId,
    },
    error::AppResult,
    use_cases::{
        common::{are_users_followed, distinct, get_user, get_users, is_user_followed},
        ArticleList, ArticlePage,
    },
};

async fn get_author<U: UnitOfWork>(uow: &U, author_id: UserId) -> AppResult<User> {
    let Some(author) = get_user(uow, author_id).await? else {
        log::error!("author of an article not found, author_id={author_id}");
        panic!("article author {author_id} must exist");
    };
    Ok(author)
}

async fn get_tags_for_article<U: UnitOfWork>(
    uow: &U,
    article_id: ArticleId,
) -> AppResult<Vec<String>> {
    let mut ctx = uow.begin().await?;
    let tags = ctx.tags().get_for_article(article_id).await?;
    log::info!("got article tags, article_id={article_id} tags={tags:?}");
    Ok(tags)
}

async fn get_tags_for_articles<U: UnitOfWork>(
    uow: &U,
    article_ids: &[ArticleId],
) -> AppResult<HashMap<ArticleId, Vec<String>>> {
    let mut ctx = uow.begin().await?;
    let tags = ctx.tags().get_for_articles(article_ids).await?;
    log::info!("got articles tags, article_ids={article_ids:?}");
    Ok(tags)
}

async fn is_favorite<U: UnitOfWork>(
    uow: &U,
    article_id: ArticleId,
    of: Option<UserId>,
) -> AppResult<bool> {
    let Some(of) = of else {
        log::info!("user is not authenticated, article is not in the favorites");
        return Ok(false);
    };

    let mut ctx = uow.begin().await?;
    let is_favorite = ctx.favorites().is_favorite(article_id, of).await?;
    log::info!(
        "got article favorite status, user_id={of} article_id={article_id} favorite={is_favorite}"
    );
    Ok(is_favorite)
}

async fn are_favorite<U: UnitOfWork>(
    uow: &U,
    article_ids: &[ArticleId],
    of: Option<UserId>,
) -> AppResult<HashMap<ArticleId, bool>> {
    let Some(of) = of else {
        log::info!("user is not authenticated, articles are not in the favorites");
        return Ok(HashMap::new());
    };

    let mut ctx = uow.begin().await?;
    let are_favorite = ctx.favorites().are_favorite(article_ids, of).await?;
    log::info!("got articles favorite status, user_id={of} article_ids={article_ids:?}");
    Ok(are_favorite)
}

async fn get_favorite_count<U: UnitOfWork>(uow: &U, article_id: ArticleId) -> AppResult<i64> {
    let mut ctx = uow.begin().await?;
    let count = ctx.favorites().count(article_id).await?;
    log::info!("got favorite count for article, article_id={article_id} count={count}");
    Ok(count)
}

async fn get_favorite_counts<U: UnitOfWork>(
    uow: &U,
    article_ids: &[ArticleId],
) -> AppResult<HashMap<ArticleId, i64>> {
    let mut ctx = uow.begin().await?;
    let counts = ctx.favorites().count_many(article_ids).await?;
    log::info!("got favorite count for articles, article_ids={article_ids:?}");
    Ok(counts)
}

async fn get_articles<U: UnitOfWork>(
    uow: &U,
    filter: &ArticleFilter,
    page: ArticlePage,
) -> AppResult<Vec<Article>> {
    let mut ctx = uow.begin().await?;
    let articles = ctx
        .articles()
        .get_many(filter, page.limit(), page.offset())
        .await?;
    log::info!("got articles, filter={filter:?} count={}", articles.len());
    Ok(articles)
}

async fn get_article_count<U: UnitOfWork>(uow: &U, filter: &ArticleFilter) -> AppResult<i64> {
    let mut ctx = uow.begin().await?;
    let count = ctx.articles().count(filter).await?;
    log::info!("got article count, filter={filter:?} count={count}");
    Ok(count)
}

/// Attaches author, tags, favorite and follow status to a single article.
pub(super) async fn with_extra<U: UnitOfWork>(
    uow: &U,
    article: Article,
    user_id: Option<UserId>,
) -> AppResult<ArticleWithExtra> {
    let (author, tags, is_author_followed, is_article_favorite, favorite_of_user_count) =
        tokio::try_join!(
            get_author(uow, article.author_id),
            get_tags_for_article(uow, article.id),
            is_user_followed(uow, article.author_id, user_id),
            is_favorite(uow, article.id, user_id),
            get_favorite_count(uow, article.id),
        )?;

    Ok(ArticleWithExtra {
        article,
        author,
        tags,
        is_author_followed,
        is_article_favorite,
        favorite_of_user_count,
    })
}

/// Like [`with_extra`] for a caller whose favorite status was just changed.
pub(super) async fn with_favorite_status<U: UnitOfWork>(
    uow: &U,
    article: Article,
    user_id: UserId,
    is_article_favorite: bool,
    favorite_of_user_count: i64,
) -> AppResult<ArticleWithExtra> {
    let (author, tags, is_author_followed) = tokio::try_join!(
        get_author(uow, article.author_id),
        get_tags_for_article(uow, article.id),
        is_user_followed(uow, article.author_id, Some(user_id)),
    )?;

    Ok(ArticleWithExtra {
        article,
        author,
        tags,
        is_author_followed,
        is_article_favorite,
        favorite_of_user_count,
    })
}

/// Batch version of [`with_extra`].
///
/// Articles whose author cannot be found are left out of the result.
async fn many_with_extra<U: UnitOfWork>(
    uow: &U,
    articles: Vec<Article>,
    user_id: Option<UserId>,
) -> AppResult<Vec<ArticleWithExtra>> {
    let article_ids: Vec<ArticleId> = articles.iter().map(|article| article.id).collect();
    let author_ids = distinct(articles.iter().map(|article| article.author_id));

    let (authors, mut tags, followed, favorite, counts) = tokio::try_join!(
        get_users(uow, &author_ids),
        get_tags_for_articles(uow, &article_ids),
        are_users_followed(uow, &author_ids, user_id),
        are_favorite(uow, &article_ids, user_id),
        get_favorite_counts(uow, &article_ids),
    )?;

    let result = articles
        .into_iter()
        .filter_map(|article| {
            let Some(author) = authors.get(&article.author_id) else {
                log::error!(
                    "author of an article not found, article_id={} author_id={}",
                    article.id,
                    article.author_id
                );
                return None;
            };

            Some(ArticleWithExtra {
                tags: tags.remove(&article.id).unwrap_or_default(),
                is_author_followed: followed.get(&article.author_id).copied().unwrap_or(false),
                is_article_favorite: favorite.get(&article.id).copied().unwrap_or(false),
                favorite_of_user_count: counts.get(&article.id).copied().unwrap_or(0),
                author: author.clone(),
                article,
            })
        })
        .collect();
    Ok(result)
}

/// Resolves one page of articles under `filter` together with the total count.
pub(super) async fn list_with_extra<U: UnitOfWork>(
    uow: &U,
    filter: &ArticleFilter,
    page: ArticlePage,
    user_id: Option<UserId>,
) -> AppResult<ArticleList> {
    let (articles, count) = tokio::try_join!(
        get_articles(uow, filter, page),
        get_article_count(uow, filter),
    )?;
    let articles = many_with_extra(uow, articles, user_id).await?;
    Ok(ArticleList { articles, count })
}
