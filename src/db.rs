use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

// employees: unique email
// convos: unique participants (the JSON text of the list, so order matters)
const SCHEMA: [&str; 2] = [
    r#"
    CREATE TABLE IF NOT EXISTS employees (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        department TEXT NOT NULL,
        role TEXT NOT NULL,
        password TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS convos (
        id TEXT PRIMARY KEY,
        participants TEXT NOT NULL UNIQUE,
        messages TEXT NOT NULL DEFAULT '[]'
    )
    "#,
];

pub async fn connect(url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await?;
    init(&pool).await?;
    Ok(pool)
}

/// A private in-memory database. One connection that never expires, otherwise
/// the data would vanish with it.
pub async fn memory() -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;
    init(&pool).await?;
    Ok(pool)
}

pub async fn init(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::debug!("schema ready");
    Ok(())
}
