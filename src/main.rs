// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use anyhow::{Context, Result};
use catalog_search::app::{create_router, AppState, VERSION};
use catalog_search::services::catalog::StaticCatalog;
use catalog_search::services::config::SearchConfig;
use catalog_search::services::logging;
use catalog_search::services::schema::run_migrations;
use catalog_search::services::search::SearchService;
use catalog_search::services::strategy::create_search_strategy;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::info;

/// Catalog search service
#[derive(Parser, Debug)]
#[command(name = "catalog-search", version = VERSION, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Serve the HTTP API (default)
    Serve,
    /// Create or update the search index table, then exit
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init();

    let config = SearchConfig::from_env().context("Invalid configuration")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Migrate => run_migrations(&config)
            .await
            .context("Failed to apply migrations")?,
        Command::Serve => serve(config).await?,
    }

    Ok(())
}

async fn serve(config: SearchConfig) -> Result<()> {
    let catalog = match &config.catalog_file {
        Some(path) => StaticCatalog::from_file(path)?,
        None => StaticCatalog::default(),
    };
    info!(
        channels = catalog.channels().len(),
        facet_values = catalog.facet_value_count(),
        "Catalog loaded"
    );
    let catalog = Arc::new(catalog);

    let strategy = create_search_strategy(&config)
        .await
        .context("Failed to initialize search strategy")?;

    let state = AppState {
        search_service: Arc::new(SearchService::new(strategy, catalog.clone())),
        channels: Arc::new(catalog.channels().clone()),
        backend: config.backend,
    };

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;

    info!(
        backend = %config.backend,
        addr = %config.listen_addr,
        "catalog-search v{} listening",
        VERSION
    );

    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
