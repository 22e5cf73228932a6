// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

#![allow(dead_code)]

use catalog_search::models::context::{CurrencyCode, LanguageCode, RequestContext};
use catalog_search::models::ids::{Id, IdList};
use catalog_search::models::index::{IndexColumn, IndexRow, SEARCH_INDEX_TABLE};
use catalog_search::services::query::BindValue;
use catalog_search::services::schema::{migrate_postgres, migrate_sqlite};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Executor;

/// Fresh in-memory SQLite database with the index table.
/// A single connection that never expires keeps the database alive for the test.
pub async fn sqlite_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");
    migrate_sqlite(&pool).await.expect("Failed to migrate SQLite");
    pool
}

/// PostgreSQL pool scoped to a new schema, so tests can run in parallel.
/// Requires TEST_DATABASE_URL.
pub async fn postgres_pool(schema: &str) -> PgPool {
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");

    let admin = PgPoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .expect("Failed to connect to PostgreSQL");
    admin
        .execute(format!("DROP SCHEMA IF EXISTS {schema} CASCADE").as_str())
        .await
        .unwrap();
    admin
        .execute(format!("CREATE SCHEMA {schema}").as_str())
        .await
        .unwrap();
    admin.close().await;

    let search_path = format!("SET search_path TO {schema}");
    let pool = PgPoolOptions::new()
        .max_connections(3)
        .after_connect(move |conn, _meta| {
            let search_path = search_path.clone();
            Box::pin(async move {
                conn.execute(search_path.as_str()).await?;
                Ok(())
            })
        })
        .connect(&url)
        .await
        .expect("Failed to connect to PostgreSQL");
    migrate_postgres(&pool).await.expect("Failed to migrate PostgreSQL");
    pool
}

pub fn ctx() -> RequestContext {
    RequestContext {
        channel_code: "__default_channel__".to_string(),
        language_code: LanguageCode::default(),
        currency_code: CurrencyCode::parse("EUR").unwrap(),
    }
}

/// An English index row with the given identity, sku, product name and facet value ids.
pub fn index_row(
    variant: &str,
    product: &str,
    sku: &str,
    name: &str,
    facet_value_ids: &str,
) -> IndexRow {
    IndexRow {
        product_variant_id: Id::parse(variant).unwrap(),
        language_code: LanguageCode::default(),
        product_id: Id::parse(product).unwrap(),
        sku: sku.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
        product_name: name.to_string(),
        product_variant_name: format!("{name} {sku}"),
        description: String::new(),
        facet_ids: IdList::new(),
        facet_value_ids: IdList::parse_delimited(facet_value_ids).unwrap(),
        price: 1000,
        product_preview: String::new(),
        product_variant_preview: String::new(),
    }
}

/// The two-variant shirt product used throughout the search tests.
pub fn shirt_rows() -> Vec<IndexRow> {
    vec![
        index_row("v1", "p1", "RED-SHIRT", "Shirt", "1,2"),
        index_row("v2", "p1", "BLU-SHIRT", "Shirt", "2,3"),
    ]
}

fn column_value(row: &IndexRow, column: IndexColumn) -> BindValue {
    let text = |value: &str| BindValue::Text(value.to_string());
    match column {
        IndexColumn::Sku => text(&row.sku),
        IndexColumn::Slug => text(&row.slug),
        IndexColumn::Price => BindValue::Int(row.price),
        IndexColumn::ProductVariantId => text(row.product_variant_id.as_str()),
        IndexColumn::LanguageCode => text(row.language_code.as_str()),
        IndexColumn::ProductId => text(row.product_id.as_str()),
        IndexColumn::ProductName => text(&row.product_name),
        IndexColumn::ProductVariantName => text(&row.product_variant_name),
        IndexColumn::Description => text(&row.description),
        IndexColumn::FacetIds => BindValue::Text(row.facet_ids.to_delimited()),
        IndexColumn::FacetValueIds => BindValue::Text(row.facet_value_ids.to_delimited()),
        IndexColumn::ProductPreview => text(&row.product_preview),
        IndexColumn::ProductVariantPreview => text(&row.product_variant_preview),
    }
}

fn insert_sql() -> String {
    let columns: Vec<&str> = IndexColumn::ALL.iter().map(IndexColumn::as_str).collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|n| format!("${n}")).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        SEARCH_INDEX_TABLE,
        columns.join(", "),
        placeholders.join(", ")
    )
}

pub async fn insert_sqlite(pool: &SqlitePool, rows: &[IndexRow]) {
    let sql = insert_sql();
    for row in rows {
        let mut query = sqlx::query::<sqlx::Sqlite>(&sql);
        for column in IndexColumn::ALL {
            query = match column_value(row, column) {
                BindValue::Text(text) => query.bind(text),
                BindValue::Int(int) => query.bind(int),
            };
        }
        query.execute(pool).await.expect("Failed to insert index row");
    }
}

pub async fn insert_postgres(pool: &PgPool, rows: &[IndexRow]) {
    let sql = insert_sql();
    for row in rows {
        let mut query = sqlx::query::<sqlx::Postgres>(&sql);
        for column in IndexColumn::ALL {
            query = match column_value(row, column) {
                BindValue::Text(text) => query.bind(text),
                BindValue::Int(int) => query.bind(int),
            };
        }
        query.execute(pool).await.expect("Failed to insert index row");
    }
}
