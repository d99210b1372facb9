use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config;

/// Idempotent DDL applied at startup (synchronize mode). Ids are generated
/// in the application, so no uuid extension is required. Cascade policy:
/// removing a list removes its list_items; an item cannot be removed while
/// a list_item still references it.
const SCHEMA_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        full_name TEXT NOT NULL,
        roles TEXT[] NOT NULL DEFAULT ARRAY['user'],
        is_blocked BOOLEAN NOT NULL DEFAULT FALSE,
        last_update_by UUID REFERENCES users(id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS items (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        user_id UUID NOT NULL REFERENCES users(id)
    )
    "#,
    r#"CREATE INDEX IF NOT EXISTS items_user_id_idx ON items (user_id)"#,
    r#"
    CREATE TABLE IF NOT EXISTS lists (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        user_id UUID NOT NULL REFERENCES users(id)
    )
    "#,
    r#"CREATE INDEX IF NOT EXISTS lists_user_id_idx ON lists (user_id)"#,
    r#"
    CREATE TABLE IF NOT EXISTS list_items (
        id UUID PRIMARY KEY,
        quantity INTEGER NOT NULL DEFAULT 0 CHECK (quantity >= 0),
        completed BOOLEAN NOT NULL DEFAULT FALSE,
        list_id UUID NOT NULL REFERENCES lists(id) ON DELETE CASCADE,
        item_id UUID NOT NULL REFERENCES items(id) ON DELETE RESTRICT
    )
    "#,
    r#"CREATE INDEX IF NOT EXISTS list_items_list_id_idx ON list_items (list_id)"#,
];

pub async fn connect() -> anyhow::Result<PgPool> {
    let cfg = config::config();
    let url = cfg.database_url()?;

    let pool = PgPoolOptions::new()
        .max_connections(cfg.database.max_connections)
        .connect(&url)
        .await?;

    info!("Connected to database {}", cfg.database.name);
    Ok(pool)
}

pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA_STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("Schema synchronized");
    Ok(())
}

pub async fn health_check(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
