// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Application state, per-request channel resolution, route handlers, and router
//! construction.
//!
//! This module is `pub` so that integration tests can build a test router directly
//! without starting the full binary.

use crate::error::SearchError;
use crate::models::backend::SearchBackendKind;
use crate::models::context::RequestContext;
use crate::models::version::VersionResponse;
use crate::routes::{search_router, SearchApiDoc};
use crate::services::catalog::ChannelRegistry;
use crate::services::search::SearchService;
use axum::{
    extract::{FromRequestParts, State},
    http::{request::Parts, StatusCode},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tracing::error;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application version extracted from `Cargo.toml` at compile time.
/// The patch segment can be overridden via `CATALOG_SEARCH_PATCH_VERSION` (see `build.rs`).
pub const VERSION: &str = env!("CATALOG_SEARCH_VERSION");

/// Header carrying the sales channel token.
pub const CHANNEL_TOKEN_HEADER: &str = "x-channel-token";
/// Header carrying the preferred language for facet value names.
pub const LANGUAGE_HEADER: &str = "x-language-code";

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Shared application state injected into every route handler via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub search_service: Arc<SearchService>,
    pub channels: Arc<ChannelRegistry>,
    pub backend: SearchBackendKind,
}

// ---------------------------------------------------------------------------
// Per-request context extractor
// ---------------------------------------------------------------------------

/// Axum extractor resolving the channel, language and currency of a request
/// from the `x-channel-token` and `x-language-code` headers.
pub struct SearchContext(pub RequestContext);

impl FromRequestParts<AppState> for SearchContext {
    type Rejection = (StatusCode, String);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
        };

        let token = header(CHANNEL_TOKEN_HEADER).unwrap_or_default();
        state
            .channels
            .resolve_context(token, header(LANGUAGE_HEADER))
            .map(SearchContext)
            .map_err(error_response)
    }
}

/// Convert a [`SearchError`] into the `(status, message)` pair handlers return.
/// Server-side failures are logged and their details withheld from the client.
pub fn error_response(err: SearchError) -> (StatusCode, String) {
    let status = err.status_code();
    if status.is_server_error() {
        error!(error = %err, "Search request failed");
        let message = match status {
            StatusCode::SERVICE_UNAVAILABLE => "Search index is unavailable",
            _ => "Internal search error",
        };
        return (status, message.to_string());
    }
    (status, err.to_string())
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

pub async fn version_handler(State(state): State<AppState>) -> Json<VersionResponse> {
    Json(VersionResponse {
        service: "catalog-search".to_string(),
        version: VERSION.to_string(),
        backend: state.backend.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the Axum application router, including Swagger UI at `/swagger-ui`.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/version", get(version_handler))
        .merge(search_router())
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", SearchApiDoc::openapi()))
}
