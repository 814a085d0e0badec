use async_trait::async_trait;

use crate::error::AppResult;

use super::{
    ArticleRepository, CommentRepository, FavoriteRepository, FollowerRepository, TagRepository,
    UserRepository,
};

/// Opens atomic units of storage operations.
#[async_trait]
pub trait UnitOfWork: Clone + Send + Sync + 'static {
    type Context: UnitOfWorkContext;

    async fn begin(&self) -> AppResult<Self::Context>;
}

/// Repositories bound to one transaction.
///
/// Nothing is persisted until [`UnitOfWorkContext::commit`] is called. Dropping
/// the context without committing, including on an early `?` return or when
/// the surrounding future is cancelled, rolls the transaction back.
#[async_trait]
pub trait UnitOfWorkContext: Send + Sized {
    fn users(&mut self) -> &mut dyn UserRepository;

    fn followers(&mut self) -> &mut dyn FollowerRepository;

    fn articles(&mut self) -> &mut dyn ArticleRepository;

    fn tags(&mut self) -> &mut dyn TagRepository;

    fn favorites(&mut self) -> &mut dyn FavoriteRepository;

    fn comments(&mut self) -> &mut dyn CommentRepository;

    async fn commit(self) -> AppResult<()>;
}
