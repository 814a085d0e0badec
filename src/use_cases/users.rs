use crate::{db::User, utils::jwt::AuthToken};

mod get_current;
mod sign_in;
mod sign_up;
mod update_current;

pub use get_current::*;
pub use sign_in::*;
pub use sign_up::*;
pub use update_current::*;

/// A user together with a token that authenticates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserWithToken {
    pub user: User,
    pub token: AuthToken,
}
