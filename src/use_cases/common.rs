//! Read helpers shared by the use cases.
//!
//! Each helper runs in its own unit of work scope and never commits it.

use std::collections::HashMap;

use crate::{
    db::{Article, UnitOfWork, UnitOfWorkContext, User, UserId},
    error::AppResult,
};

pub(crate) async fn get_article<U: UnitOfWork>(
    uow: &U,
    slug: &str,
) -> AppResult<Option<Article>> {
    let mut ctx = uow.begin().await?;
    let article = ctx.articles().get_by_slug(slug).await?;

    match &article {
        Some(article) => log::info!("got article, slug={slug} article_id={}", article.id),
        None => log::info!("article not found, slug={slug}"),
    }
    Ok(article)
}

pub(crate) async fn get_user<U: UnitOfWork>(uow: &U, id: UserId) -> AppResult<Option<User>> {
    let mut ctx = uow.begin().await?;
    let user = ctx.users().get_by_id(id).await?;
    Ok(user)
}

pub(crate) async fn get_users<U: UnitOfWork>(
    uow: &U,
    ids: &[UserId],
) -> AppResult<HashMap<UserId, User>> {
    let mut ctx = uow.begin().await?;
    let users = ctx.users().get_by_ids(ids).await?;

    log::info!("got users, ids={ids:?} found={}", users.len());
    Ok(users)
}

pub(crate) async fn is_user_followed<U: UnitOfWork>(
    uow: &U,
    id: UserId,
    by: Option<UserId>,
) -> AppResult<bool> {
    let Some(by) = by else {
        log::info!("user is not authenticated, not followed");
        return Ok(false);
    };

    let mut ctx = uow.begin().await?;
    let is_followed = ctx.followers().is_followed(id, by).await?;

    log::info!("got following status, id={id} by={by} is_followed={is_followed}");
    Ok(is_followed)
}

pub(crate) async fn are_users_followed<U: UnitOfWork>(
    uow: &U,
    ids: &[UserId],
    by: Option<UserId>,
) -> AppResult<HashMap<UserId, bool>> {
    let Some(by) = by else {
        log::info!("user is not authenticated, not followed");
        return Ok(HashMap::new());
    };

    let mut ctx = uow.begin().await?;
    let are_followed = ctx.followers().are_followed(ids, by).await?;

    log::info!("got following status, ids={ids:?} by={by}");
    Ok(are_followed)
}

/// Distinct values in first-seen order.
pub(crate) fn distinct<T: PartialEq + Copy>(values: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut result = Vec::new();
    for value in values {
        if !result.contains(&value) {
            result.push(value);
        }
    }
    result
}
