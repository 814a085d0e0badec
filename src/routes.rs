use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    BoxError, Router,
};
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::compression::CompressionLayer;

use crate::{api, db::UnitOfWork, AppState};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub fn generate_routes<U: UnitOfWork>(state: AppState<U>) -> Router {
    Router::new()
        // ==== USERS ==== //
        .route("/api/users/login", post(api::users::sign_in::<U>))
        .route("/api/users", post(api::users::sign_up::<U>))
        .route(
            "/api/user",
            get(api::users::get_current_user::<U>).put(api::users::update_current_user::<U>),
        )
        // ==== PROFILES ==== //
        .route("/api/profiles/:username", get(api::profiles::get_profile::<U>))
        .route(
            "/api/profiles/:username/follow",
            post(api::profiles::follow::<U>).delete(api::profiles::unfollow::<U>),
        )
        // ==== ARTICLES ==== //
        .route(
            "/api/articles",
            get(api::articles::list_articles::<U>).post(api::articles::create_article::<U>),
        )
        .route("/api/articles/feed", get(api::articles::feed_articles::<U>))
        .route(
            "/api/articles/:slug",
            get(api::articles::get_article::<U>)
                .put(api::articles::update_article::<U>)
                .delete(api::articles::delete_article::<U>),
        )
        .route(
            "/api/articles/:slug/favorite",
            post(api::articles::favorite_article::<U>)
                .delete(api::articles::unfavorite_article::<U>),
        )
        // ==== COMMENTS ==== //
        .route(
            "/api/articles/:slug/comments",
            get(api::comments::get_comments::<U>).post(api::comments::add_comment::<U>),
        )
        .route(
            "/api/articles/:slug/comments/:id",
            delete(api::comments::delete_comment::<U>),
        )
        // ==== TAGS ==== //
        .route("/api/tags", get(api::tags::list_tags::<U>))
        .route("/api/health", get(health))
        .fallback(handler_404)
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_error))
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT)),
        )
}

async fn handle_error(err: BoxError) -> impl IntoResponse {
    if err.is::<tower::timeout::error::Elapsed>() {
        return (StatusCode::REQUEST_TIMEOUT, "request timed out".to_string());
    }

    log::error!("unhandled error: {err}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Unhandled error: {err}"),
    )
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn handler_404() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "nothing to see here")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Method, Request, Response},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::{
        db::memory::MemoryUnitOfWork,
        testing::{
            create_article, create_user, token_for, FakeAuthTokenGenerator, FakePasswordHasher,
        },
    };

    fn app(uow: &MemoryUnitOfWork) -> Router {
        let state = AppState::new(
            uow.clone(),
            Arc::new(FakePasswordHasher),
            Arc::new(FakeAuthTokenGenerator),
        );
        generate_routes(state)
    }

    fn request(
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Token {token}"));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn json_body(response: Response<axum::body::BoxBody>) -> Value {
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_check_responds_ok() {
        let uow = MemoryUnitOfWork::new();
        let response = app(&uow)
            .oneshot(request(Method::GET, "/api/health", None, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let uow = MemoryUnitOfWork::new();
        let response = app(&uow)
            .oneshot(request(Method::GET, "/api/nothing", None, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn registration_returns_user_with_token() {
        let uow = MemoryUnitOfWork::new();
        let body = json!({
            "user": {
                "username": "alice",
                "email": "alice@example.com",
                "password": "secret-password",
            }
        });
        let response = app(&uow)
            .oneshot(request(Method::POST, "/api/users", None, Some(body)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["user"]["username"], "alice");
        assert_eq!(body["user"]["email"], "alice@example.com");
        assert_eq!(body["user"]["token"], "token-1");
        assert_eq!(body["user"]["bio"], "");
        assert_eq!(body["user"]["image"], Value::Null);
    }

    #[tokio::test]
    async fn registration_with_invalid_email_is_unprocessable() {
        let uow = MemoryUnitOfWork::new();
        let body = json!({
            "user": {
                "username": "alice",
                "email": "not-an-email",
                "password": "secret-password",
            }
        });
        let response = app(&uow)
            .oneshot(request(Method::POST, "/api/users", None, Some(body)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn current_user_requires_token() {
        let uow = MemoryUnitOfWork::new();
        let response = app(&uow)
            .oneshot(request(Method::GET, "/api/user", None, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = json_body(response).await;
        assert_eq!(body["errors"]["body"][0], "user is not authenticated");
    }

    #[tokio::test]
    async fn articles_are_listed_with_count() {
        let uow = MemoryUnitOfWork::new();
        let alice = create_user(&uow, "alice").await;
        create_article(&uow, alice.id, "First", &["rust"]).await;
        create_article(&uow, alice.id, "Second", &["go"]).await;

        let response = app(&uow)
            .oneshot(request(Method::GET, "/api/articles?tag=rust", None, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["articlesCount"], 1);
        assert_eq!(body["articles"][0]["title"], "First");
        assert_eq!(body["articles"][0]["tagList"], json!(["rust"]));
        assert_eq!(body["articles"][0]["author"]["username"], "alice");
        assert_eq!(body["articles"][0]["favorited"], false);
    }

    #[tokio::test]
    async fn missing_article_is_not_found() {
        let uow = MemoryUnitOfWork::new();
        let response = app(&uow)
            .oneshot(request(Method::GET, "/api/articles/missing", None, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_article_by_non_author_is_forbidden() {
        let uow = MemoryUnitOfWork::new();
        let alice = create_user(&uow, "alice").await;
        let bob = create_user(&uow, "bob").await;
        let article = create_article(&uow, alice.id, "First", &[]).await;

        let uri = format!("/api/articles/{}", article.slug);
        let response = app(&uow)
            .oneshot(request(Method::DELETE, &uri, Some(&token_for(&bob)), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = app(&uow)
            .oneshot(request(Method::DELETE, &uri, Some(&token_for(&alice)), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn comments_can_be_added_and_listed() {
        let uow = MemoryUnitOfWork::new();
        let alice = create_user(&uow, "alice").await;
        let article = create_article(&uow, alice.id, "First", &[]).await;
        let uri = format!("/api/articles/{}/comments", article.slug);

        let body = json!({ "comment": { "body": "Nice!" } });
        let response = app(&uow)
            .oneshot(request(Method::POST, &uri, Some(&token_for(&alice)), Some(body)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app(&uow)
            .oneshot(request(Method::GET, &uri, None, None))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["comments"][0]["body"], "Nice!");
        assert_eq!(body["comments"][0]["author"]["username"], "alice");
    }
}
