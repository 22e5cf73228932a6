// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Conversion of raw query rows into API results.

use crate::error::{Result, SearchError};
use crate::models::context::CurrencyCode;
use crate::models::ids::{Id, IdList};
use crate::models::index::{IndexColumn, RawSearchRow};
use crate::models::search::SearchResult;

fn parse_id(column: IndexColumn, raw: &str) -> Result<Id> {
    Id::parse(raw).map_err(|source| SearchError::CorruptIndexRow {
        column: column.as_str(),
        source,
    })
}

fn parse_ids(column: IndexColumn, raw: &str) -> Result<IdList> {
    IdList::parse_delimited(raw).map_err(|source| SearchError::CorruptIndexRow {
        column: column.as_str(),
        source,
    })
}

/// Map one result row into a [`SearchResult`] priced in `currency_code`.
///
/// Pure and deterministic. Delimited facet columns are split, trimmed and
/// de-duplicated in first-seen order, which turns the concatenation produced
/// by grouping into a set union.
pub fn map_to_search_result(
    row: &RawSearchRow,
    currency_code: &CurrencyCode,
) -> Result<SearchResult> {
    Ok(SearchResult {
        sku: row.sku.clone(),
        slug: row.slug.clone(),
        product_id: parse_id(IndexColumn::ProductId, &row.product_id)?,
        product_name: row.product_name.clone(),
        product_preview: row.product_preview.clone(),
        product_variant_id: parse_id(IndexColumn::ProductVariantId, &row.product_variant_id)?,
        product_variant_name: row.product_variant_name.clone(),
        product_variant_preview: row.product_variant_preview.clone(),
        price: row.price,
        currency_code: currency_code.clone(),
        description: row.description.clone(),
        facet_ids: parse_ids(IndexColumn::FacetIds, &row.facet_ids)?.into_vec(),
        facet_value_ids: parse_ids(IndexColumn::FacetValueIds, &row.facet_value_ids)?.into_vec(),
        score: row.score,
    })
}

/// Parse the aggregated facet value ids of a whole match set.
///
/// `None` is what the aggregate yields over zero rows.
pub fn map_facet_union(raw: Option<&str>) -> Result<IdList> {
    match raw {
        Some(raw) => parse_ids(IndexColumn::FacetValueIds, raw),
        None => Ok(IdList::new()),
    }
}
