// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use crate::error::Result;
use crate::models::context::RequestContext;
use crate::models::search::{SearchInput, SearchResponse};
use crate::services::catalog::FacetCatalog;
use crate::services::logging::summarize_term;
use crate::services::query::SearchQuery;
use crate::services::strategy::SearchStrategy;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Answers search requests by combining the three strategy operations with
/// facet value lookup.
pub struct SearchService {
    strategy: Arc<dyn SearchStrategy>,
    catalog: Arc<dyn FacetCatalog>,
}

impl SearchService {
    pub fn new(strategy: Arc<dyn SearchStrategy>, catalog: Arc<dyn FacetCatalog>) -> Self {
        Self { strategy, catalog }
    }

    /// Run one search. Input is validated before any query runs; the page,
    /// the total and the facet ids are then fetched concurrently and any
    /// failure fails the whole search.
    pub async fn search(
        &self,
        ctx: &RequestContext,
        input: &SearchInput,
    ) -> Result<SearchResponse> {
        let started = Instant::now();
        SearchQuery::from_input(input)?;

        let (items, total_items, facet_value_ids) = futures::try_join!(
            self.strategy.search_results(ctx, input),
            self.strategy.total_count(ctx, input),
            self.strategy.facet_value_ids(ctx, input),
        )?;
        let facet_values = self.catalog.find_facet_values(&facet_value_ids, ctx).await?;

        info!(
            channel = %ctx.channel_code,
            term = %summarize_term(input.term.as_deref().unwrap_or_default()),
            items = items.len(),
            total_items,
            facet_values = facet_values.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Search completed"
        );

        Ok(SearchResponse {
            items,
            total_items,
            facet_values,
        })
    }
}
