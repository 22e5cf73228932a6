// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Search route handler and its OpenAPI description.

use crate::app::{error_response, AppState, SearchContext};
use crate::models::catalog::{FacetSummary, FacetValue};
use crate::models::search::{
    SearchInput, SearchResponse, SearchResult, SearchResultSortParameter, SortOrder,
};
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(search_handler),
    components(schemas(
        SearchInput,
        SearchResponse,
        SearchResult,
        SearchResultSortParameter,
        SortOrder,
        FacetValue,
        FacetSummary
    )),
    tags((name = "search", description = "Catalog search"))
)]
pub struct SearchApiDoc;

/// Create the search router.
pub fn search_router() -> Router<AppState> {
    Router::new().route("/search", post(search_handler))
}

/// Search the catalog index.
#[utoipa::path(
    post,
    path = "/search",
    tag = "search",
    request_body = SearchInput,
    params(
        ("x-channel-token" = Option<String>, Header, description = "Token of the sales channel; the default channel when absent"),
        ("x-language-code" = Option<String>, Header, description = "Language for facet value names"),
    ),
    responses(
        (status = 200, description = "One page of results with totals and facets", body = SearchResponse),
        (status = 400, description = "Malformed facet id or input", body = String),
        (status = 404, description = "Unknown channel token", body = String),
        (status = 503, description = "Search index unavailable", body = String),
    )
)]
pub async fn search_handler(
    SearchContext(ctx): SearchContext,
    State(state): State<AppState>,
    Json(input): Json<SearchInput>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    state
        .search_service
        .search(&ctx, &input)
        .await
        .map(Json)
        .map_err(error_response)
}
