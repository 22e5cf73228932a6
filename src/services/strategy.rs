// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use crate::error::Result;
use crate::models::backend::SearchBackendKind;
use crate::models::context::RequestContext;
use crate::models::ids::IdList;
use crate::models::search::{SearchInput, SearchResult};
use crate::services::config::SearchConfig;
use crate::services::postgres::PostgresSearchStrategy;
use crate::services::sqlite::SqliteSearchStrategy;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// A storage-engine-specific way of answering search requests.
///
/// All three operations interpret `input` identically: the same rows match
/// for a given input, so a page, its total and its facets always agree.
/// Implementations are read-only and safe to call concurrently.
#[async_trait]
pub trait SearchStrategy: Send + Sync {
    /// Engine name, for logs.
    fn name(&self) -> &'static str;

    /// Distinct facet value ids across every match, ignoring pagination.
    async fn facet_value_ids(&self, ctx: &RequestContext, input: &SearchInput) -> Result<IdList>;

    /// One page of results, ordered by relevance, explicit sort and a stable tie-break.
    async fn search_results(
        &self,
        ctx: &RequestContext,
        input: &SearchInput,
    ) -> Result<Vec<SearchResult>>;

    /// Number of results (product groups when grouping) across all pages.
    async fn total_count(&self, ctx: &RequestContext, input: &SearchInput) -> Result<u64>;
}

/// Build the strategy selected by `config.backend`.
pub async fn create_search_strategy(config: &SearchConfig) -> Result<Arc<dyn SearchStrategy>> {
    match config.backend {
        SearchBackendKind::Postgres => {
            let strategy = PostgresSearchStrategy::connect(
                &config.database_url,
                config.max_connections,
                &config.text_search_config,
            )
            .await?;
            info!(
                strategy = strategy.name(),
                text_search_config = %config.text_search_config,
                "Connected search strategy"
            );
            Ok(Arc::new(strategy))
        }
        SearchBackendKind::Sqlite => {
            let strategy =
                SqliteSearchStrategy::connect(&config.database_url, config.max_connections).await?;
            info!(strategy = strategy.name(), "Connected search strategy");
            Ok(Arc::new(strategy))
        }
    }
}
