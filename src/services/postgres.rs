// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! PostgreSQL search strategy: tsvector matching ranked with `ts_rank_cd`.

use crate::error::{Result, SearchError};
use crate::models::context::RequestContext;
use crate::models::ids::{Id, IdList};
use crate::models::index::RawSearchRow;
use crate::models::search::{SearchInput, SearchResult};
use crate::services::mapper::{map_facet_union, map_to_search_result};
use crate::services::query::{
    bind_all, BindValue, Dialect, QueryParams, SearchQuery, SearchQueryBuilder, TermParams,
    TermQuery,
};
use crate::services::strategy::SearchStrategy;
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Postgres;
use tracing::debug;

pub const DEFAULT_TEXT_SEARCH_CONFIG: &str = "english";

pub struct PostgresDialect {
    text_search_config: String,
}

impl PostgresDialect {
    /// The configuration name is inlined into SQL as a literal, so only plain
    /// (optionally schema-qualified) lowercase identifiers are accepted.
    pub fn new(text_search_config: &str) -> Result<Self> {
        let valid_part = |part: &str| {
            part.chars()
                .next()
                .is_some_and(|c| c.is_ascii_lowercase() || c == '_')
                && part
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        };
        let parts: Vec<&str> = text_search_config.split('.').collect();
        if parts.len() > 2 || !parts.iter().all(|part| valid_part(part)) {
            return Err(SearchError::Config(format!(
                "invalid text search configuration: '{}'",
                text_search_config
            )));
        }

        Ok(Self {
            text_search_config: text_search_config.to_string(),
        })
    }

    fn tsvector(&self, expr: &str) -> String {
        format!("to_tsvector('{}', {})", self.text_search_config, expr)
    }

    fn tsquery(&self, term: &TermParams) -> String {
        format!("to_tsquery('{}', {})", self.text_search_config, term.0[0])
    }
}

impl Default for PostgresDialect {
    fn default() -> Self {
        Self {
            text_search_config: DEFAULT_TEXT_SEARCH_CONFIG.to_string(),
        }
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    /// Words are AND-ed into a single tsquery bound once.
    fn bind_term(&self, term: &TermQuery, params: &mut QueryParams) -> TermParams {
        let tsquery = term.words().join(" & ");
        TermParams(vec![params.push(BindValue::Text(tsquery))])
    }

    fn text_match(&self, expr: &str, term: &TermParams) -> String {
        format!("{} @@ {}", self.tsvector(expr), self.tsquery(term))
    }

    fn field_rank(&self, expr: &str, term: &TermParams) -> String {
        format!("ts_rank_cd({}, {})", self.tsvector(expr), self.tsquery(term))
    }

    fn facet_contains(&self, column: &str, id: &Id, params: &mut QueryParams) -> String {
        let placeholder = params.push(BindValue::Text(id.to_string()));
        format!("{placeholder} = ANY(string_to_array({column}, ','))")
    }

    fn string_agg(&self, expr: &str) -> String {
        format!("string_agg({expr}, ',')")
    }

    fn float(&self, expr: &str) -> String {
        format!("CAST({expr} AS DOUBLE PRECISION)")
    }
}

pub struct PostgresSearchStrategy {
    pool: PgPool,
    dialect: PostgresDialect,
}

impl PostgresSearchStrategy {
    pub fn new(pool: PgPool, dialect: PostgresDialect) -> Self {
        Self { pool, dialect }
    }

    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        text_search_config: &str,
    ) -> Result<Self> {
        let dialect = PostgresDialect::new(text_search_config)?;
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self::new(pool, dialect))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl SearchStrategy for PostgresSearchStrategy {
    fn name(&self) -> &'static str {
        self.dialect.name()
    }

    async fn facet_value_ids(&self, _ctx: &RequestContext, input: &SearchInput) -> Result<IdList> {
        let query = SearchQuery::from_input(input)?;
        let statement = SearchQueryBuilder::new(&self.dialect, &query).facet_value_ids();
        debug!(sql = %statement.sql, "postgres facet value ids");

        let union: Option<String> = bind_all!(
            sqlx::query_scalar::<Postgres, Option<String>>(&statement.sql),
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
        let statement = SearchQueryBuilder::new(&self.dialect, &query).results();
        debug!(sql = %statement.sql, binds = statement.binds.len(), "postgres search results");

        let rows: Vec<RawSearchRow> = bind_all!(
            sqlx::query_as::<Postgres, RawSearchRow>(&statement.sql),
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
        let statement = SearchQueryBuilder::new(&self.dialect, &query).count();
        debug!(sql = %statement.sql, "postgres total count");

        let scalar = sqlx::query_scalar::<Postgres, i64>(&statement.sql);
        let total: i64 = bind_all!(scalar, &statement.binds).fetch_one(&self.pool).await?;

        Ok(u64::try_from(total).unwrap_or_default())
    }
}
