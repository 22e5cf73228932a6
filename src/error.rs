// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Error type shared by the search strategies, the query service and the HTTP layer.

use crate::models::ids::InvalidId;
use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    /// Request input rejected before any query was built.
    #[error("Invalid facet id: {0}")]
    InvalidFacetId(#[source] InvalidId),

    #[error("No channel found for token '{0}'")]
    ChannelNotFound(String),

    /// An index row violated the identifier invariant the indexer must uphold.
    #[error("Corrupt index row ({column}): {source}")]
    CorruptIndexRow {
        column: &'static str,
        #[source]
        source: InvalidId,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SearchError {
    /// HTTP status the error maps to at the API boundary.
    pub fn status_code(&self) -> StatusCode {
        match self {
            SearchError::InvalidFacetId(_) => StatusCode::BAD_REQUEST,
            SearchError::ChannelNotFound(_) => StatusCode::NOT_FOUND,
            // Storage failures are transient; the caller decides whether to retry
            SearchError::Database(_) => StatusCode::SERVICE_UNAVAILABLE,
            SearchError::CorruptIndexRow { .. }
            | SearchError::Migration(_)
            | SearchError::Catalog(_)
            | SearchError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
