use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::{
    db::UnitOfWork,
    error::{AppError, AppResult},
    use_cases::{
        articles::{
            ArticleList, ArticlePage, CreateArticleInput, DeleteArticleInput,
            FavoriteArticleInput, FeedArticlesInput, GetArticleInput, ListArticlesInput,
            UnfavoriteArticleInput, UpdateArticleInput,
        },
        UseCase,
    },
    AppState,
};

use super::{optional_auth, required_auth, ArticleBody, AuthHeader};

#[derive(Deserialize)]
pub struct CreateArticle {
    article: CreateArticleData,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct CreateArticleData {
    #[serde(default)]
    tag_list: Vec<String>,
    #[validate(length(min = 1, message = "title can't be blank"))]
    title: String,
    #[validate(length(min = 1, message = "description can't be blank"))]
    description: String,
    #[validate(length(min = 1, message = "body can't be blank"))]
    body: String,
}

#[derive(Deserialize)]
pub struct UpdateArticle {
    article: UpdateArticleData,
}

#[derive(Deserialize, Validate)]
struct UpdateArticleData {
    #[validate(length(min = 1, message = "title can't be blank"))]
    title: Option<String>,
    #[validate(length(min = 1, message = "description can't be blank"))]
    description: Option<String>,
    #[validate(length(min = 1, message = "body can't be blank"))]
    body: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListArticlesQuery {
    tag: Option<String>,
    author: Option<String>,
    favorited: Option<String>,
    limit: Option<i64>,
    offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ListFeedArticlesQuery {
    limit: Option<i64>,
    offset: Option<i64>,
}

fn page(limit: Option<i64>, offset: Option<i64>) -> AppResult<ArticlePage> {
    let default = ArticlePage::default();
    ArticlePage::new(
        limit.unwrap_or(default.limit()),
        offset.unwrap_or(default.offset()),
    )
}

fn articles_response(list: ArticleList) -> impl IntoResponse {
    let articles: Vec<ArticleBody> = list.articles.into_iter().map(ArticleBody::from).collect();
    Json(json!({ "articles": articles, "articlesCount": list.count }))
}

// POST /api/articles
pub async fn create_article<U: UnitOfWork>(
    State(state): State<AppState<U>>,
    header: AuthHeader,
    Json(CreateArticle { article }): Json<CreateArticle>,
) -> AppResult<impl IntoResponse> {
    let auth = required_auth(header)?;
    article.validate()?;

    let created = state
        .use_cases
        .create_article
        .execute(CreateArticleInput {
            auth,
            title: article.title,
            description: article.description,
            body: article.body,
            tags: article.tag_list,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "article": ArticleBody::from(created) })),
    ))
}

// GET /api/articles
pub async fn list_articles<U: UnitOfWork>(
    State(state): State<AppState<U>>,
    Query(params): Query<ListArticlesQuery>,
    header: AuthHeader,
) -> AppResult<impl IntoResponse> {
    let list = state
        .use_cases
        .list_articles
        .execute(ListArticlesInput {
            auth: optional_auth(header),
            tag: params.tag,
            author: params.author,
            favorite_of: params.favorited,
            page: page(params.limit, params.offset)?,
        })
        .await?;

    Ok(articles_response(list))
}

// GET /api/articles/feed
pub async fn feed_articles<U: UnitOfWork>(
    State(state): State<AppState<U>>,
    Query(params): Query<ListFeedArticlesQuery>,
    header: AuthHeader,
) -> AppResult<impl IntoResponse> {
    let auth = required_auth(header)?;
    let list = state
        .use_cases
        .feed_articles
        .execute(FeedArticlesInput {
            auth,
            page: page(params.limit, params.offset)?,
        })
        .await?;

    Ok(articles_response(list))
}

// GET /api/articles/:slug
pub async fn get_article<U: UnitOfWork>(
    State(state): State<AppState<U>>,
    Path(slug): Path<String>,
    header: AuthHeader,
) -> AppResult<impl IntoResponse> {
    let article = state
        .use_cases
        .get_article
        .execute(GetArticleInput {
            auth: optional_auth(header),
            slug,
        })
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(json!({ "article": ArticleBody::from(article) })))
}

// PUT /api/articles/:slug
pub async fn update_article<U: UnitOfWork>(
    State(state): State<AppState<U>>,
    Path(slug): Path<String>,
    header: AuthHeader,
    Json(UpdateArticle { article }): Json<UpdateArticle>,
) -> AppResult<impl IntoResponse> {
    let auth = required_auth(header)?;
    article.validate()?;

    let updated = state
        .use_cases
        .update_article
        .execute(UpdateArticleInput {
            auth,
            slug,
            title: article.title.into(),
            description: article.description.into(),
            body: article.body.into(),
        })
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(json!({ "article": ArticleBody::from(updated) })))
}

// DELETE /api/articles/:slug
pub async fn delete_article<U: UnitOfWork>(
    State(state): State<AppState<U>>,
    Path(slug): Path<String>,
    header: AuthHeader,
) -> AppResult<impl IntoResponse> {
    let auth = required_auth(header)?;
    state
        .use_cases
        .delete_article
        .execute(DeleteArticleInput { auth, slug })
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(StatusCode::NO_CONTENT)
}

// POST /api/articles/:slug/favorite
pub async fn favorite_article<U: UnitOfWork>(
    State(state): State<AppState<U>>,
    Path(slug): Path<String>,
    header: AuthHeader,
) -> AppResult<impl IntoResponse> {
    let auth = required_auth(header)?;
    let article = state
        .use_cases
        .favorite_article
        .execute(FavoriteArticleInput { auth, slug })
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(json!({ "article": ArticleBody::from(article) })))
}

// DELETE /api/articles/:slug/favorite
pub async fn unfavorite_article<U: UnitOfWork>(
    State(state): State<AppState<U>>,
    Path(slug): Path<String>,
    header: AuthHeader,
) -> AppResult<impl IntoResponse> {
    let auth = required_auth(header)?;
    let article = state
        .use_cases
        .unfavorite_article
        .execute(UnfavoriteArticleInput { auth, slug })
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(json!({ "article": ArticleBody::from(article) })))
}
