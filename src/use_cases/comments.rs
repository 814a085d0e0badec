mod add_to_article;
mod delete;
mod get_from_article;

pub use add_to_article::*;
pub use delete::*;
pub use get_from_article::*;
