use once_cell::sync::OnceCell;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::config;

static POOL: OnceCell<PgPool> = OnceCell::new();

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("database connection failed: {0}")]
    Connection(String),
    #[error("database pool not initialized")]
    NotInitialized,
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Connect the global pool and make sure the schema exists. Called once at
/// startup; a failure here is fatal for the process.
pub async fn connect() -> Result<(), DatabaseError> {
    let cfg = &config::config().database;

    if cfg.url.is_empty() {
        return Err(DatabaseError::Connection("DATABASE_URL is not set".to_string()));
    }

    let pool = PgPoolOptions::new()
        .max_connections(cfg.max_connections)
        .acquire_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .connect(&cfg.url)
        .await
        .map_err(|e| DatabaseError::Connection(e.to_string()))?;

    ensure_schema(&pool).await?;

    let _ = POOL.set(pool);
    Ok(())
}

pub fn pool() -> Result<&'static PgPool, DatabaseError> {
    POOL.get().ok_or(DatabaseError::NotInitialized)
}

pub async fn health_check() -> Result<(), DatabaseError> {
    sqlx::query("SELECT 1").execute(pool()?).await?;
    Ok(())
}

/// Create the library tables if missing. Document payloads live in JSONB
/// `data` columns; hierarchy is expressed through parent-key foreign keys.
async fn ensure_schema(pool: &PgPool) -> Result<(), DatabaseError> {
    let ddl = [
        r#"CREATE TABLE IF NOT EXISTS resources (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            lan TEXT NOT NULL,
            subject TEXT NOT NULL,
            name TEXT NOT NULL,
            data JSONB NOT NULL DEFAULT '{}'::jsonb,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )"#,
        r#"CREATE TABLE IF NOT EXISTS resource_data_entries (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            resource_id UUID NOT NULL REFERENCES resources(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            data JSONB NOT NULL DEFAULT '{}'::jsonb,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )"#,
        r#"CREATE TABLE IF NOT EXISTS sub_data (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            resource_data_entry_id UUID NOT NULL REFERENCES resource_data_entries(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            link TEXT,
            data JSONB NOT NULL DEFAULT '{}'::jsonb,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )"#,
        r#"CREATE TABLE IF NOT EXISTS resource_items (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            sub_data_id UUID NOT NULL REFERENCES sub_data(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            link TEXT,
            data JSONB NOT NULL DEFAULT '{}'::jsonb,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )"#,
        "CREATE INDEX IF NOT EXISTS idx_resources_lan ON resources (lan)",
        "CREATE INDEX IF NOT EXISTS idx_entries_resource ON resource_data_entries (resource_id)",
        "CREATE INDEX IF NOT EXISTS idx_sub_data_entry ON sub_data (resource_data_entry_id)",
        "CREATE INDEX IF NOT EXISTS idx_items_sub_data ON resource_items (sub_data_id)",
    ];

    for statement in ddl {
        sqlx::query(statement).execute(pool).await?;
    }

    Ok(())
}
