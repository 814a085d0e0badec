mod patch;
pub use patch::*;
mod user;
pub use user::*;
mod follower;
pub use follower::*;
mod article;
pub use article::*;
mod tag;
pub use tag::*;
mod favorite;
pub use favorite::*;
mod comment;
pub use comment::*;
mod unit_of_work;
pub use unit_of_work::*;

pub mod memory;
pub mod postgres;
