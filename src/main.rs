use std::sync::Arc;

use anyhow::Context;
use conduit::{
    config::Config,
    db::postgres::PgUnitOfWork,
    routes,
    utils::{hasher::Argon2PasswordHasher, jwt::JwtAuthTokenGenerator},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;

    let uow = PgUnitOfWork::connect(&config)
        .await
        .context("could not connect to the database")?;
    uow.migrate().await.context("could not run migrations")?;

    let state = AppState::new(
        uow,
        Arc::new(Argon2PasswordHasher),
        Arc::new(JwtAuthTokenGenerator::new(
            &config.secret_key,
            config.token_expiration,
        )),
    );

    log::info!("listening on {}", config.bind_addr);
    axum::Server::bind(&config.bind_addr)
        .serve(routes::generate_routes(state).into_make_service())
        .await?;

    Ok(())
}
