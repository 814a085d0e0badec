use std::sync::Arc;

use db::UnitOfWork;
use use_cases::UseCases;
use utils::{hasher::PasswordHasher, jwt::AuthTokenGenerator};

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod use_cases;
pub mod utils;

#[cfg(test)]
mod testing;

pub struct AppState<U: UnitOfWork> {
    pub use_cases: Arc<UseCases<U>>,
}

impl<U: UnitOfWork> AppState<U> {
    pub fn new(
        unit_of_work: U,
        password_hasher: Arc<dyn PasswordHasher>,
        auth_token_generator: Arc<dyn AuthTokenGenerator>,
    ) -> Self {
        let use_cases = UseCases::new(unit_of_work, password_hasher, auth_token_generator);
        Self {
            use_cases: Arc::new(use_cases),
        }
    }
}

impl<U: UnitOfWork> Clone for AppState<U> {
    fn clone(&self) -> Self {
        Self {
            use_cases: self.use_cases.clone(),
        }
    }
}
