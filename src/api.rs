use axum::{headers::Authorization, TypedHeader};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;

use crate::{
    db::{ArticleWithExtra, CommentId, CommentWithExtra, Profile, User},
    error::{AppError, AppResult},
    use_cases::{users::UserWithToken, OptionalAuth, RequiredAuth},
    utils::auth::JWTToken,
};

pub mod articles;
pub mod comments;
pub mod profiles;
pub mod tags;
pub mod users;

pub type AuthHeader = Option<TypedHeader<Authorization<JWTToken>>>;

fn optional_auth(header: AuthHeader) -> OptionalAuth {
    OptionalAuth::new(header.map(|TypedHeader(Authorization(token))| token.0))
}

fn required_auth(header: AuthHeader) -> AppResult<RequiredAuth> {
    let Some(TypedHeader(Authorization(token))) = header else {
        return Err(AppError::UserIsNotAuthenticated);
    };
    Ok(RequiredAuth::new(token.0))
}

fn utc(timestamp: NaiveDateTime) -> DateTime<Utc> {
    Utc.from_utc_datetime(&timestamp)
}

#[derive(Debug, Serialize)]
pub struct UserBody {
    pub email: String,
    pub token: String,
    pub username: String,
    pub bio: String,
    pub image: Option<String>,
}

impl From<UserWithToken> for UserBody {
    fn from(UserWithToken { user, token }: UserWithToken) -> Self {
        Self {
            email: user.email,
            token,
            username: user.username,
            bio: user.bio,
            image: user.image,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileBody {
    pub username: String,
    pub bio: String,
    pub image: Option<String>,
    pub following: bool,
}

impl ProfileBody {
    fn new(user: User, following: bool) -> Self {
        Self {
            username: user.username,
            bio: user.bio,
            image: user.image,
            following,
        }
    }
}

impl From<Profile> for ProfileBody {
    fn from(profile: Profile) -> Self {
        Self::new(profile.user, profile.is_followed)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleBody {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: String,
    pub tag_list: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub favorited: bool,
    pub favorites_count: i64,
    pub author: ProfileBody,
}

impl From<ArticleWithExtra> for ArticleBody {
    fn from(extra: ArticleWithExtra) -> Self {
        let article = extra.article;
        Self {
            slug: article.slug,
            title: article.title,
            description: article.description,
            body: article.body,
            tag_list: extra.tags,
            created_at: utc(article.created_at),
            updated_at: utc(article.updated_at.unwrap_or(article.created_at)),
            favorited: extra.is_article_favorite,
            favorites_count: extra.favorite_of_user_count,
            author: ProfileBody::new(extra.author, extra.is_author_followed),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentBody {
    pub id: CommentId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body: String,
    pub author: ProfileBody,
}

impl From<CommentWithExtra> for CommentBody {
    fn from(extra: CommentWithExtra) -> Self {
        let comment = extra.comment;
        Self {
            id: comment.id,
            created_at: utc(comment.created_at),
            updated_at: utc(comment.updated_at.unwrap_or(comment.created_at)),
            body: comment.body,
            author: ProfileBody::new(extra.author, extra.is_author_followed),
        }
    }
}
