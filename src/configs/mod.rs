use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{api::error, constants::DatabaseConfig};

pub async fn connect_database(config: &DatabaseConfig) -> Result<PgPool, error::SystemError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections.get())
        .min_connections(1)
        .acquire_slow_threshold(std::time::Duration::from_secs(3))
        .connect(&config.url)
        .await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), error::SystemError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| error::SystemError::from(sqlx::Error::from(e)))?;
    log::info!("Database migrations applied");
    Ok(())
}
