use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};

use crate::{
    db::{CreateUserInput, Patch, UpdateUserInput, User, UserId, UserRepository},
    error::{AppError, AppResult},
};

use super::{now, PgUnitOfWorkContext};

const USERNAME_UNIQUE_CONSTRAINT: &str = "user_username_key";
const EMAIL_UNIQUE_CONSTRAINT: &str = "user_email_key";

#[async_trait]
impl UserRepository for PgUnitOfWorkContext {
    async fn create(&mut self, input: CreateUserInput) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO "user" (username, email, password_hash, bio, created_at)
            VALUES ($1, $2, $3, '', $4)
            RETURNING *
            "#,
        )
        .bind(input.username)
        .bind(input.email)
        .bind(input.password_hash)
        .bind(now())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(unique_violation)
    }

    async fn get_by_email(&mut self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM "user" WHERE email = $1"#)
            .bind(email)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(user)
    }

    async fn get_by_username(&mut self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM "user" WHERE username = $1"#)
            .bind(username)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(user)
    }

    async fn get_by_id(&mut self, id: UserId) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM "user" WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(user)
    }

    async fn get_by_ids(&mut self, ids: &[UserId]) -> AppResult<HashMap<UserId, User>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let users = sqlx::query_as::<_, User>(r#"SELECT * FROM "user" WHERE id = ANY($1)"#)
            .bind(ids)
            .fetch_all(&mut *self.tx)
            .await?;

        Ok(users.into_iter().map(|user| (user.id, user)).collect())
    }

    async fn update(&mut self, id: UserId, input: UpdateUserInput) -> AppResult<Option<User>> {
        let mut qb = QueryBuilder::<Postgres>::new(r#"UPDATE "user" SET updated_at = "#);
        qb.push_bind(now());

        if let Patch::Set(username) = input.username {
            qb.push(", username = ").push_bind(username);
        }
        if let Patch::Set(email) = input.email {
            qb.push(", email = ").push_bind(email);
        }
        if let Patch::Set(password_hash) = input.password_hash {
            qb.push(", password_hash = ").push_bind(password_hash);
        }
        if let Patch::Set(bio) = input.bio {
            qb.push(", bio = ").push_bind(bio);
        }
        if let Patch::Set(image) = input.image {
            qb.push(", image_url = ").push_bind(image);
        }

        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" RETURNING *");

        qb.build_query_as::<User>()
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(unique_violation)
    }
}

fn unique_violation(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.constraint() {
            Some(USERNAME_UNIQUE_CONSTRAINT) => return AppError::UsernameAlreadyExists,
            Some(EMAIL_UNIQUE_CONSTRAINT) => return AppError::EmailAlreadyExists,
            _ => {}
        }
    }
    err.into()
}
