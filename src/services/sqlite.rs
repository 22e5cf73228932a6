// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! SQLite search strategy: per-word `LIKE` matching with weighted hit counts.
//!
//! SQLite has no built-in stemming, so a field matches when it contains every
//! word of the term as a substring, and a matching field scores 1 before
//! weighting. `LIKE` folds case for ASCII letters only: "shirt" finds "SHIRT",
//! but "über" does not find "Über". Indexers targeting SQLite should store
//! non-ASCII text in the case users search with.

use crate::error::Result;
use crate::models::context::RequestContext;
use crate::models::ids::{Id, IdList, ID_DELIMITER};
use crate::models::index::RawSearchRow;
use crate::models::search::{SearchInput, SearchResult};
use crate::services::mapper::{map_facet_union, map_to_search_result};
use crate::services::query::{
    bind_all, BindValue, Dialect, QueryParams, SearchQuery, SearchQueryBuilder, TermParams,
    TermQuery,
};
use crate::services::strategy::SearchStrategy;
use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Sqlite;
use tracing::debug;

#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteDialect;

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    /// One `%word%` pattern per word.
    fn bind_term(&self, term: &TermQuery, params: &mut QueryParams) -> TermParams {
        TermParams(
            term.words()
                .iter()
                .map(|word| params.push(BindValue::Text(format!("%{word}%"))))
                .collect(),
        )
    }

    fn text_match(&self, expr: &str, term: &TermParams) -> String {
        let all_words = term
            .0
            .iter()
            .map(|pattern| format!("{expr} LIKE {pattern}"))
            .collect::<Vec<_>>()
            .join(" AND ");
        format!("({all_words})")
    }

    fn field_rank(&self, expr: &str, term: &TermParams) -> String {
        format!("(CASE WHEN {} THEN 1 ELSE 0 END)", self.text_match(expr, term))
    }

    fn facet_contains(&self, column: &str, id: &Id, params: &mut QueryParams) -> String {
        let needle = params.push(BindValue::Text(format!("{ID_DELIMITER}{id}{ID_DELIMITER}")));
        format!("instr(',' || {column} || ',', {needle}) > 0")
    }

    fn string_agg(&self, expr: &str) -> String {
        format!("group_concat({expr}, ',')")
    }

    fn float(&self, expr: &str) -> String {
        format!("CAST({expr} AS REAL)")
    }
}

pub struct SqliteSearchStrategy {
    pool: SqlitePool,
}

impl SqliteSearchStrategy {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl SearchStrategy for SqliteSearchStrategy {
    fn name(&self) -> &'static str {
        SqliteDialect.name()
    }

    async fn facet_value_ids(&self, _ctx: &RequestContext, input: &SearchInput) -> Result<IdList> {
        let query = SearchQuery::from_input(input)?;
        let statement = SearchQueryBuilder::new(&SqliteDialect, &query).facet_value_ids();
        debug!(sql = %statement.sql, "sqlite facet value ids");

        let union: Option<String> = bind_all!(
            sqlx::query_scalar::<Sqlite, Option<String>>(&statement.sql),
            &statement.binds
        )
        .fetch_one(&self.pool)
        .await?;

        map_facet_union(union.as_deref())
    }

    async fn search_results(
        &self,
        ctx: &RequestContext,
        input: &SearchInput,
    ) -> Result<Vec<SearchResult>> {
        let query = SearchQuery::from_input(input)?;
        let statement = SearchQueryBuilder::new(&SqliteDialect, &query).results();
        debug!(sql = %statement.sql, binds = statement.binds.len(), "sqlite search results");

        let rows: Vec<RawSearchRow> = bind_all!(
            sqlx::query_as::<Sqlite, RawSearchRow>(&statement.sql),
            &statement.binds
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| map_to_search_result(row, &ctx.currency_code))
            .collect()
    }

    async fn total_count(&self, _ctx: &RequestContext, input: &SearchInput) -> Result<u64> {
        let query = SearchQuery::from_input(input)?;
        let statement = SearchQueryBuilder::new(&SqliteDialect, &query).count();
        debug!(sql = %statement.sql, "sqlite total count");

        let scalar = sqlx::query_scalar::<Sqlite, i64>(&statement.sql);
        let total: i64 = bind_all!(scalar, &statement.binds).fetch_one(&self.pool).await?;

        Ok(u64::try_from(total).unwrap_or_default())
    }
}
