use async_trait::async_trait;
use password_hash::{PasswordHash, SaltString};

use crate::error::AppResult;

#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash_password(&self, password: &str) -> AppResult<String>;

    async fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Argon2id with the crate defaults (19 MiB, 2 iterations, 1 lane).
///
/// Hashing runs on the blocking thread pool.
#[derive(Clone, Copy, Debug, Default)]
pub struct Argon2PasswordHasher;

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash_password(&self, password: &str) -> AppResult<String> {
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hash_password(password))
            .await
            .map_err(|err| anyhow::anyhow!(err))?
    }

    async fn verify(&self, password: &str, hash: &str) -> bool {
        let password = password.to_owned();
        let hash = hash.to_owned();
        match tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await {
            Ok(is_valid) => is_valid,
            Err(err) => {
                log::error!("password verification task failed: {:?}", err);
                false
            }
        }
    }
}

pub fn hash_password(password: impl AsRef<[u8]>) -> AppResult<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());

    let hash = PasswordHash::generate(argon2::Argon2::default(), password.as_ref(), &salt)
        .map_err(|err| anyhow::anyhow!(err))?
        .to_string();
    Ok(hash)
}

pub fn verify_password(password: impl AsRef<[u8]>, hash: &str) -> bool {
    let hash = match PasswordHash::new(hash) {
        Ok(hash) => hash,
        Err(err) => {
            log::error!("stored password hash is malformed: {:?}", err);
            return false;
        }
    };

    match hash.verify_password(&[&argon2::Argon2::default()], password) {
        Ok(()) => true,
        Err(err) => {
            log::info!("invalid password: {:?}", err);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_verifies_only_original_password() {
        let hasher = Argon2PasswordHasher;
        let hash = hasher.hash_password("correct horse").await.unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("correct horse", &hash).await);
        assert!(!hasher.verify("battery staple", &hash).await);
    }

    #[tokio::test]
    async fn malformed_hash_does_not_verify() {
        assert!(!Argon2PasswordHasher.verify("password", "not-a-hash").await);
    }
}
