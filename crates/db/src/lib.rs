//! SQLite pool factory and schema bootstrap for Libris.
//!
//! Schema statements are contributed by modules and applied with
//! `CREATE ... IF NOT EXISTS` semantics on every start; there is no
//! versioned migration history.

use std::str::FromStr;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub use sqlx::SqlitePool as DbPool;

const IN_MEMORY_URL: &str = "sqlite::memory:";

/// Open a pooled connection to the database at `url`.
///
/// Foreign keys are enforced on every connection and the file is created
/// when missing.
pub async fn connect(url: &str, max_connections: u32) -> anyhow::Result<DbPool> {
    let options = SqliteConnectOptions::from_str(url)
        .with_context(|| format!("invalid database url '{url}'"))?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect_with(options)
        .await
        .with_context(|| format!("failed to connect to database at '{url}'"))?;

    tracing::info!(target: "libris-db", url, max_connections, "database pool ready");
    Ok(pool)
}

/// Open a private in-memory database.
///
/// The pool holds exactly one connection that never expires, since every
/// new SQLite connection to `:memory:` would see an empty database.
pub async fn connect_in_memory() -> anyhow::Result<DbPool> {
    let options = SqliteConnectOptions::from_str(IN_MEMORY_URL)
        .context("invalid in-memory database url")?
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .min_connections(1)
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .context("failed to open in-memory database")
}

/// Execute a schema fragment statement by statement.
pub async fn apply_schema(pool: &DbPool, label: &str, sql: &str) -> anyhow::Result<()> {
    for (index, statement) in split_sql_statements(sql).iter().enumerate() {
        sqlx::query(statement)
            .execute(pool)
            .await
            .with_context(|| format!("failed to execute statement {} of '{label}'", index + 1))?;
    }

    tracing::debug!(target: "libris-db", label, "schema fragment applied");
    Ok(())
}

/// Splits a schema fragment into individual statements.
/// Assumes statements end with `;` at the end of a line and never nest semicolons.
pub fn split_sql_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();

    for line in sql.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("--") {
            continue;
        }
        current.push_str(line);
        current.push('\n');

        if trimmed.ends_with(';') {
            let statement = current.trim();
            if !statement.is_empty() {
                statements.push(statement.to_string());
            }
            current.clear();
        }
    }

    let leftover = current.trim();
    if !leftover.is_empty() {
        statements.push(leftover.to_string());
    }

    statements
}
