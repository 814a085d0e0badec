use validator::Validate;

use crate::{db::ArticleWithExtra, error::AppResult};

mod common;
mod create;
mod delete;
mod favorite;
mod feed;
mod get;
mod list;
mod unfavorite;
mod update;

pub use create::*;
pub use delete::*;
pub use favorite::*;
pub use feed::*;
pub use get::*;
pub use list::*;
pub use unfavorite::*;
pub use update::*;

const DEFAULT_LIMIT: i64 = 20;

/// Pagination window of article lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Validate)]
pub struct ArticlePage {
    #[validate(range(min = 1, max = 100))]
    limit: i64,
    #[validate(range(min = 0))]
    offset: i64,
}

impl ArticlePage {
    pub fn new(limit: i64, offset: i64) -> AppResult<Self> {
        let page = Self { limit, offset };
        page.validate()?;
        Ok(page)
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }
}

impl Default for ArticlePage {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// One page of articles and the size of the whole result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleList {
    pub articles: Vec<ArticleWithExtra>,
    pub count: i64,
}
