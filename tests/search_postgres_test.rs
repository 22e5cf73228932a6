// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

mod common;

use catalog_search::models::ids::Id;
use catalog_search::models::index::IndexRow;
use catalog_search::models::search::SearchInput;
use catalog_search::services::postgres::{PostgresDialect, PostgresSearchStrategy};
use catalog_search::services::strategy::SearchStrategy;
use common::{ctx, index_row, insert_postgres, postgres_pool, shirt_rows};
use std::collections::HashSet;

// Integration tests for the PostgreSQL strategy
// These tests require a running PostgreSQL instance
// Run with: TEST_DATABASE_URL=postgres://... cargo test --test search_postgres_test -- --ignored

async fn strategy_with(schema: &str, rows: &[IndexRow]) -> PostgresSearchStrategy {
    let pool = postgres_pool(schema).await;
    insert_postgres(&pool, rows).await;
    PostgresSearchStrategy::new(pool, PostgresDialect::default())
}

fn input(term: Option<&str>, facet_ids: &[&str], grouped: bool) -> SearchInput {
    SearchInput {
        term: term.map(str::to_string),
        facet_ids: Some(facet_ids.iter().map(|id| id.to_string()).collect()),
        group_by_product: Some(grouped),
        ..Default::default()
    }
}

#[tokio::test]
#[ignore]
async fn test_grouped_term_search_unions_variant_facets() {
    let strategy = strategy_with("search_test_grouped", &shirt_rows()).await;
    let request = input(Some("shirt"), &[], true);

    let items = strategy.search_results(&ctx(), &request).await.unwrap();

    assert_eq!(items.len(), 1);
    let facets: HashSet<&str> = items[0].facet_value_ids.iter().map(Id::as_str).collect();
    assert_eq!(facets, HashSet::from(["1", "2", "3"]));
    assert!(items[0].score > 0.0);
    assert_eq!(strategy.total_count(&ctx(), &request).await.unwrap(), 1);
}

#[tokio::test]
#[ignore]
async fn test_facet_filter_counts_one_either_way() {
    let strategy = strategy_with("search_test_facets", &shirt_rows()).await;

    for grouped in [false, true] {
        let request = input(None, &["1"], grouped);
        let items = strategy.search_results(&ctx(), &request).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_id.as_str(), "p1");
        assert_eq!(strategy.total_count(&ctx(), &request).await.unwrap(), 1);
    }

    let facets = strategy
        .facet_value_ids(&ctx(), &input(None, &["1"], false))
        .await
        .unwrap();
    assert_eq!(facets.to_delimited(), "1,2");
}

#[tokio::test]
#[ignore]
async fn test_sku_match_outranks_description_match() {
    let by_sku = index_row("w1", "pa", "WIDGET-1", "Gadget", "");
    let mut by_description = index_row("w2", "pb", "Y-2", "Thing", "");
    by_description.description = "Fits every widget".to_string();
    let strategy = strategy_with("search_test_ranking", &[by_description, by_sku]).await;

    let items = strategy
        .search_results(&ctx(), &input(Some("widget"), &[], false))
        .await
        .unwrap();

    let skus: Vec<&str> = items.iter().map(|item| item.sku.as_str()).collect();
    assert_eq!(skus, ["WIDGET-1", "Y-2"]);
    assert!(items[0].score > items[1].score);
}

#[tokio::test]
#[ignore]
async fn test_take_one_skip_one_returns_second_row() {
    let rows = vec![
        index_row("v1", "p1", "A-1", "Lamp", ""),
        index_row("v2", "p2", "B-2", "Lamp", ""),
        index_row("v3", "p3", "C-3", "Lamp", ""),
    ];
    let strategy = strategy_with("search_test_paging", &rows).await;

    let all = strategy
        .search_results(&ctx(), &input(Some("lamp"), &[], false))
        .await
        .unwrap();
    let mut request = input(Some("lamp"), &[], false);
    request.take = Some(1);
    request.skip = Some(1);

    let page = strategy.search_results(&ctx(), &request).await.unwrap();

    assert_eq!(page.len(), 1);
    assert_eq!(page[0], all[1]);
    assert_eq!(strategy.total_count(&ctx(), &request).await.unwrap(), 3);
}

#[tokio::test]
#[ignore]
async fn test_empty_result_is_not_an_error() {
    let strategy = strategy_with("search_test_empty", &shirt_rows()).await;
    let request = input(Some("umbrella"), &[], false);

    assert!(strategy.search_results(&ctx(), &request).await.unwrap().is_empty());
    assert_eq!(strategy.total_count(&ctx(), &request).await.unwrap(), 0);
    assert!(strategy.facet_value_ids(&ctx(), &request).await.unwrap().is_empty());
}
