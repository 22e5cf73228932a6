// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use crate::models::catalog::FacetValue;
use crate::models::context::CurrencyCode;
use crate::models::ids::Id;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Direction of an explicit sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Explicit sort keys. Applied after relevance: name first, then price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SearchResultSortParameter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<SortOrder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<SortOrder>,
}

/// Request to search the catalog index
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchInput {
    /// Free-text search term
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    /// Facet value ids; a result must carry every one of them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facet_ids: Option<Vec<String>>,
    /// Collapse variants into one result per product
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_by_product: Option<bool>,
    /// Page size (default: 25)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take: Option<u32>,
    /// Page offset (default: 0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SearchResultSortParameter>,
}

/// One search hit: a variant, or a whole product when grouping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub sku: String,
    pub slug: String,
    pub product_id: Id,
    pub product_name: String,
    pub product_preview: String,
    pub product_variant_id: Id,
    pub product_variant_name: String,
    pub product_variant_preview: String,
    /// Price in minor units of `currency_code`
    pub price: i64,
    pub currency_code: CurrencyCode,
    pub description: String,
    pub facet_ids: Vec<Id>,
    pub facet_value_ids: Vec<Id>,
    /// Relevance score, 0 when no term was given
    pub score: f64,
}

/// Search response containing one page of results and the available facets
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub items: Vec<SearchResult>,
    /// Number of matching results across all pages
    pub total_items: u64,
    /// Facet values present anywhere in the unpaginated result set
    pub facet_values: Vec<FacetValue>,
}

impl SearchResponse {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_items: 0,
            facet_values: Vec::new(),
        }
    }
}
