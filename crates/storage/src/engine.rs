//! Engine construction for the catalog database.

use anyhow::Result;
use itemseed_core::ConnectionSettings;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};

// One-shot sequential loader; a couple of connections is plenty.
const POOL_MAX_CONNECTIONS: u32 = 2;

/// Build a connection pool from resolved settings.
///
/// The caller owns the pool and is expected to close it before exiting.
pub async fn create_engine(settings: &ConnectionSettings) -> Result<PgPool> {
    let mut options = PgConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .username(&settings.username)
        .database(&settings.database);
    if let Some(password) = &settings.password {
        options = options.password(password);
    }
    if let Some(sslmode) = &settings.sslmode {
        let mode = sslmode
            .parse::<PgSslMode>()
            .map_err(|e| anyhow::anyhow!("invalid sslmode {sslmode:?}: {e}"))?;
        options = options.ssl_mode(mode);
    }

    let pool = PgPoolOptions::new()
        .max_connections(POOL_MAX_CONNECTIONS)
        .connect_with(options)
        .await?;
    tracing::info!(
        host = %settings.host,
        database = %settings.database,
        "connected to postgres"
    );
    Ok(pool)
}
