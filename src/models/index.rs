// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! The denormalized search index table, as written by the indexer and read by
//! the search strategies.

use crate::models::context::LanguageCode;
use crate::models::ids::{Id, IdList};

/// Name of the index table in every supported engine.
pub const SEARCH_INDEX_TABLE: &str = "search_index_item";

/// One flattened (product, variant, language) row.
///
/// At most one row exists per `(product_variant_id, language_code)`.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexRow {
    pub product_variant_id: Id,
    pub language_code: LanguageCode,
    pub product_id: Id,
    pub sku: String,
    pub slug: String,
    pub product_name: String,
    pub product_variant_name: String,
    pub description: String,
    pub facet_ids: IdList,
    pub facet_value_ids: IdList,
    /// Amount in minor currency units.
    pub price: i64,
    pub product_preview: String,
    pub product_variant_preview: String,
}

/// Columns of [`SEARCH_INDEX_TABLE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexColumn {
    Sku,
    Slug,
    Price,
    ProductVariantId,
    LanguageCode,
    ProductId,
    ProductName,
    ProductVariantName,
    Description,
    FacetIds,
    FacetValueIds,
    ProductPreview,
    ProductVariantPreview,
}

impl IndexColumn {
    pub const ALL: [IndexColumn; 13] = [
        IndexColumn::Sku,
        IndexColumn::Slug,
        IndexColumn::Price,
        IndexColumn::ProductVariantId,
        IndexColumn::LanguageCode,
        IndexColumn::ProductId,
        IndexColumn::ProductName,
        IndexColumn::ProductVariantName,
        IndexColumn::Description,
        IndexColumn::FacetIds,
        IndexColumn::FacetValueIds,
        IndexColumn::ProductPreview,
        IndexColumn::ProductVariantPreview,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IndexColumn::Sku => "sku",
            IndexColumn::Slug => "slug",
            IndexColumn::Price => "price",
            IndexColumn::ProductVariantId => "product_variant_id",
            IndexColumn::LanguageCode => "language_code",
            IndexColumn::ProductId => "product_id",
            IndexColumn::ProductName => "product_name",
            IndexColumn::ProductVariantName => "product_variant_name",
            IndexColumn::Description => "description",
            IndexColumn::FacetIds => "facet_ids",
            IndexColumn::FacetValueIds => "facet_value_ids",
            IndexColumn::ProductPreview => "product_preview",
            IndexColumn::ProductVariantPreview => "product_variant_preview",
        }
    }

    /// Facet columns hold delimited id sets and are unioned when grouping.
    pub fn is_facet_set(&self) -> bool {
        matches!(self, IndexColumn::FacetIds | IndexColumn::FacetValueIds)
    }
}

/// A row produced by the result query: either a single index row or the
/// aggregate of one product's rows. Facet columns are still delimited here.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct RawSearchRow {
    pub sku: String,
    pub slug: String,
    pub price: i64,
    pub product_variant_id: String,
    pub language_code: String,
    pub product_id: String,
    pub product_name: String,
    pub product_variant_name: String,
    pub description: String,
    pub facet_ids: String,
    pub facet_value_ids: String,
    pub product_preview: String,
    pub product_variant_preview: String,
    pub score: f64,
}

impl From<&IndexRow> for RawSearchRow {
    fn from(row: &IndexRow) -> Self {
        RawSearchRow {
            sku: row.sku.clone(),
            slug: row.slug.clone(),
            price: row.price,
            product_variant_id: row.product_variant_id.to_string(),
            language_code: row.language_code.to_string(),
            product_id: row.product_id.to_string(),
            product_name: row.product_name.clone(),
            product_variant_name: row.product_variant_name.clone(),
            description: row.description.clone(),
            facet_ids: row.facet_ids.to_delimited(),
            facet_value_ids: row.facet_value_ids.to_delimited(),
            product_preview: row.product_preview.clone(),
            product_variant_preview: row.product_variant_preview.clone(),
            score: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_names_are_unique() {
        let mut names: Vec<&str> = IndexColumn::ALL.iter().map(IndexColumn::as_str).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), IndexColumn::ALL.len());
    }

    #[test]
    fn test_only_facet_columns_are_sets() {
        let sets: Vec<_> = IndexColumn::ALL
            .iter()
            .filter(|c| c.is_facet_set())
            .map(IndexColumn::as_str)
            .collect();
        assert_eq!(sets, vec!["facet_ids", "facet_value_ids"]);
    }

    #[test]
    fn test_raw_row_from_index_row_serializes_facets() {
        let row = IndexRow {
            product_variant_id: Id::parse("11").unwrap(),
            language_code: LanguageCode::parse("en").unwrap(),
            product_id: Id::parse("1").unwrap(),
            sku: "RED-SHIRT".to_string(),
            slug: "shirt".to_string(),
            product_name: "Shirt".to_string(),
            product_variant_name: "Red Shirt".to_string(),
            description: "A shirt".to_string(),
            facet_ids: IdList::parse_delimited("f1").unwrap(),
            facet_value_ids: IdList::parse_delimited("1,2").unwrap(),
            price: 1999,
            product_preview: "p.jpg".to_string(),
            product_variant_preview: "v.jpg".to_string(),
        };

        let raw = RawSearchRow::from(&row);
        assert_eq!(raw.facet_value_ids, "1,2");
        assert_eq!(raw.product_variant_id, "11");
        assert_eq!(raw.language_code, "en");
        assert_eq!(raw.score, 0.0);
    }
}
