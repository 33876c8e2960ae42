use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

use super::DatabaseConfig;

fn pool_options(cfg: &DatabaseConfig) -> MySqlPoolOptions {
    MySqlPoolOptions::new()
        .max_connections(cfg.max_connections)
        .acquire_timeout(cfg.connect_timeout)
}

/// Connect to MySQL within the configured timeout and apply pending migrations.
pub async fn establish_connection(cfg: &DatabaseConfig) -> Result<MySqlPool, sqlx::Error> {
    let pool = pool_options(cfg).connect(&cfg.url).await?;
    tracing::info!("Successfully connected to the database");

    // Run migrations automatically on startup
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied successfully");

    Ok(pool)
}

/// Build a pool that connects on first use; `/health` reports it as disconnected until then.
pub fn lazy_connection(cfg: &DatabaseConfig) -> Result<MySqlPool, sqlx::Error> {
    pool_options(cfg).connect_lazy(&cfg.url)
}
