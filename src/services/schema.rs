// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Index table migrations, embedded at compile time.

use crate::error::Result;
use crate::models::backend::SearchBackendKind;
use crate::services::config::SearchConfig;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

pub async fn migrate_postgres(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations/postgres").run(pool).await?;
    Ok(())
}

pub async fn migrate_sqlite(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations/sqlite").run(pool).await?;
    Ok(())
}

/// Connect to the configured database and bring the index table up to date.
/// A missing SQLite database file is created.
pub async fn run_migrations(config: &SearchConfig) -> Result<()> {
    match config.backend {
        SearchBackendKind::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(1)
                .connect(&config.database_url)
                .await?;
            migrate_postgres(&pool).await?;
        }
        SearchBackendKind::Sqlite => {
            let options =
                SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
            let pool = SqlitePoolOptions::new()
                .max_connections(1)
                .connect_with(options)
                .await?;
            migrate_sqlite(&pool).await?;
        }
    }

    info!(backend = %config.backend, "Search index schema is up to date");
    Ok(())
}
