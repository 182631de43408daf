mod catalog;
mod server;
mod user;

pub use catalog::{add_ingredient, add_tag};
pub use server::serve;
pub use user::{issue_token, token_for};

use sqlx::migrate::MigrateDatabase;

use crate::config::Config;

#[tracing::instrument(skip(config))]
pub async fn migrate(config: &Config) -> anyhow::Result<()> {
    tracing::info!("Running database migrations...");

    if !sqlx::Sqlite::database_exists(&config.database.url).await? {
        tracing::info!("Database does not exist, creating: {}", config.database.url);
        sqlx::Sqlite::create_database(&config.database.url).await?;
    }

    let pool = crate::db::create_write_pool(&config.database.url).await?;
    foodgram_db::migrate(&pool).await?;
    pool.close().await;

    tracing::info!("Migrations completed successfully");

    Ok(())
}

#[tracing::instrument(skip(config))]
pub async fn reset(config: &Config) -> anyhow::Result<()> {
    if sqlx::Sqlite::database_exists(&config.database.url).await? {
        tracing::warn!("Dropping existing database: {}", config.database.url);
        sqlx::Sqlite::drop_database(&config.database.url).await?;
    } else {
        tracing::info!("Database does not exist, nothing to drop");
    }

    migrate(config).await?;

    tracing::info!("Database reset completed successfully");

    Ok(())
}

/// Single connection state for one-shot commands.
async fn command_state(config: &Config) -> anyhow::Result<foodgram_shared::State> {
    let pool = crate::db::create_pool(&config.database.url, 1).await?;

    Ok(foodgram_shared::State::single(pool))
}
