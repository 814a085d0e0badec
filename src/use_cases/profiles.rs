mod follow;
mod get;
mod unfollow;

pub use follow::*;
pub use get::*;
pub use unfollow::*;

#[cfg(test)]
async fn is_followed(
    uow: &crate::db::memory::MemoryUnitOfWork,
    id: crate::db::UserId,
    by: crate::db::UserId,
) -> bool {
    use crate::db::{UnitOfWork, UnitOfWorkContext};

    let mut ctx = uow.begin().await.unwrap();
    ctx.followers().is_followed(id, by).await.unwrap()
}
