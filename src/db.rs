//! Database module - PostgreSQL connection and schema

use sqlx::{postgres::PgPoolOptions, PgPool};

/// Create database connection pool
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Apply the schema
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA_SQL)
        .execute(pool)
        .await?;

    tracing::info!("Database schema applied successfully");
    Ok(())
}

/// Database schema SQL
const SCHEMA_SQL: &str = r#"
-- Reported QR payloads. Append-only: no code path updates or deletes rows;
-- is_blacklisted is flipped only by out-of-band moderation.
CREATE TABLE IF NOT EXISTS reported_qrs (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    qr_content TEXT NOT NULL,
    reason TEXT NOT NULL DEFAULT 'User reported as suspicious',
    reported_by VARCHAR(255) NOT NULL DEFAULT 'anonymous',
    is_blacklisted BOOLEAN NOT NULL DEFAULT false,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_reported_qrs_content ON reported_qrs(qr_content);
CREATE INDEX IF NOT EXISTS idx_reported_qrs_blacklist ON reported_qrs(qr_content, is_blacklisted);
"#;
