// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Query construction shared by the relational search strategies.
//!
//! A [`SearchInput`] is validated once into a [`SearchQuery`], then
//! [`SearchQueryBuilder`] renders the three statements a strategy runs:
//!
//! * results: filtered, ranked, optionally grouped, sorted and paginated rows
//! * count: the same filtered/grouped selection wrapped in `COUNT(*)`
//! * facet value ids: the union of facet value ids over the same filter,
//!   always grouped by product
//!
//! All three share one predicate builder, so the page content, the total and
//! the available facets can never disagree about which rows match. Engine
//! specifics (full-text operators, string aggregation) come from a [`Dialect`].
//!
//! Placeholders are numbered (`$1`, `$2`, ...) and may repeat; both PostgreSQL
//! and SQLite accept this form.

use crate::error::{Result, SearchError};
use crate::models::ids::{Id, IdList};
use crate::models::index::{IndexColumn, SEARCH_INDEX_TABLE};
use crate::models::search::{SearchInput, SearchResultSortParameter};

/// Terms whose collapsed length does not exceed this contribute no ranking and
/// no text predicate.
pub const MIN_TERM_LENGTH: usize = 2;

pub const DEFAULT_TAKE: u32 = 25;
pub const MAX_TAKE: u32 = 1000;

/// Relevance weight of each searchable field.
pub const FIELD_WEIGHTS: [(IndexColumn, f64); 4] = [
    (IndexColumn::Sku, 10.0),
    (IndexColumn::ProductName, 2.0),
    (IndexColumn::ProductVariantName, 1.5),
    (IndexColumn::Description, 1.0),
];

const INDEX_ALIAS: &str = "si";

/// Stable ordering applied after every requested sort key so that pages never
/// overlap or skip rows.
const TIE_BREAK: [IndexColumn; 3] = [
    IndexColumn::ProductId,
    IndexColumn::ProductVariantId,
    IndexColumn::LanguageCode,
];

/// A free-text term reduced to the words every matching field must contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermQuery {
    words: Vec<String>,
}

impl TermQuery {
    /// Returns `None` when the term is too short or has no searchable word.
    ///
    /// Whitespace is collapsed before the length check. Words are split on any
    /// character that is neither alphanumeric nor `-`, so engine operators in
    /// user input never reach the text-search function.
    pub fn parse(term: &str) -> Option<Self> {
        let collapsed = term.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.chars().count() <= MIN_TERM_LENGTH {
            return None;
        }

        let words: Vec<String> = collapsed
            .split(|c: char| !(c.is_alphanumeric() || c == '-'))
            .map(|word| word.trim_matches('-'))
            .filter(|word| word.chars().any(char::is_alphanumeric))
            .map(str::to_string)
            .collect();

        (!words.is_empty()).then_some(TermQuery { words })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// The words joined by single spaces.
    pub fn normalized(&self) -> String {
        self.words.join(" ")
    }
}

/// A validated search request. Built only through [`SearchQuery::from_input`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub term: Option<TermQuery>,
    /// Every id must be present on a matching row.
    pub facet_value_ids: IdList,
    pub group_by_product: bool,
    pub sort: SearchResultSortParameter,
    pub take: u32,
    pub skip: u32,
}

impl SearchQuery {
    /// Validate caller input. Malformed facet ids are rejected here, before any
    /// SQL exists.
    pub fn from_input(input: &SearchInput) -> Result<Self> {
        let facet_value_ids = input
            .facet_ids
            .iter()
            .flatten()
            .map(|raw| Id::parse(raw))
            .collect::<std::result::Result<IdList, _>>()
            .map_err(SearchError::InvalidFacetId)?;

        let take = match input.take {
            None | Some(0) => DEFAULT_TAKE,
            Some(take) => take.min(MAX_TAKE),
        };

        Ok(SearchQuery {
            term: input.term.as_deref().and_then(TermQuery::parse),
            facet_value_ids,
            group_by_product: input.group_by_product.unwrap_or(false),
            sort: input.sort.unwrap_or_default(),
            take,
            skip: input.skip.unwrap_or(0),
        })
    }

    pub fn is_ranked(&self) -> bool {
        self.term.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Text(String),
    Int(i64),
}

/// SQL text plus the values for its `$n` placeholders, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlStatement {
    pub sql: String,
    pub binds: Vec<BindValue>,
}

/// Accumulates bind values and hands out their placeholders.
#[derive(Debug, Default)]
pub struct QueryParams {
    binds: Vec<BindValue>,
}

impl QueryParams {
    pub fn push(&mut self, value: BindValue) -> String {
        self.binds.push(value);
        format!("${}", self.binds.len())
    }

    fn finish(self, sql: String) -> SqlStatement {
        SqlStatement {
            sql,
            binds: self.binds,
        }
    }
}

/// Placeholders holding a bound [`TermQuery`], in the dialect's own encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermParams(pub Vec<String>);

/// Engine-specific SQL fragments.
pub trait Dialect: Send + Sync {
    fn name(&self) -> &'static str;

    /// Bind the term and return the placeholders the other fragments use.
    fn bind_term(&self, term: &TermQuery, params: &mut QueryParams) -> TermParams;

    /// Boolean expression: `expr` contains every word of the term.
    fn text_match(&self, expr: &str, term: &TermParams) -> String;

    /// Numeric rank of `expr` against the term, before weighting.
    fn field_rank(&self, expr: &str, term: &TermParams) -> String;

    /// Boolean expression: the delimited id set in `column` contains `id`.
    fn facet_contains(&self, column: &str, id: &Id, params: &mut QueryParams) -> String;

    /// Aggregate concatenating `expr` across a group with the id delimiter.
    fn string_agg(&self, expr: &str) -> String;

    /// Cast `expr` to the engine's double precision type.
    fn float(&self, expr: &str) -> String;
}

fn qualified(column: IndexColumn) -> String {
    format!("{}.{}", INDEX_ALIAS, column.as_str())
}

pub struct SearchQueryBuilder<'a> {
    dialect: &'a dyn Dialect,
    query: &'a SearchQuery,
}

impl<'a> SearchQueryBuilder<'a> {
    pub fn new(dialect: &'a dyn Dialect, query: &'a SearchQuery) -> Self {
        Self { dialect, query }
    }

    /// The page of results.
    pub fn results(&self) -> SqlStatement {
        let mut params = QueryParams::default();
        let grouped = self.query.group_by_product;
        let term = self.bind_term(&mut params);

        let mut columns = self.select_list(grouped);
        columns.push(format!("{} AS score", self.score(term.as_ref(), grouped)));

        let mut sql = format!(
            "SELECT {} FROM {} {}",
            columns.join(", "),
            SEARCH_INDEX_TABLE,
            INDEX_ALIAS
        );
        sql.push_str(&self.filter(term.as_ref(), &mut params, grouped));
        sql.push_str(&self.order_by());

        let take = params.push(BindValue::Int(i64::from(self.query.take)));
        let skip = params.push(BindValue::Int(i64::from(self.query.skip)));
        sql.push_str(&format!(" LIMIT {take} OFFSET {skip}"));

        params.finish(sql)
    }

    /// Number of rows (or product groups) the results query pages over.
    pub fn count(&self) -> SqlStatement {
        let mut params = QueryParams::default();
        let grouped = self.query.group_by_product;
        let term = self.bind_term(&mut params);

        let key = if grouped {
            IndexColumn::ProductId
        } else {
            IndexColumn::ProductVariantId
        };
        let inner = format!(
            "SELECT {} FROM {} {}{}",
            qualified(key),
            SEARCH_INDEX_TABLE,
            INDEX_ALIAS,
            self.filter(term.as_ref(), &mut params, grouped)
        );

        params.finish(format!("SELECT COUNT(*) AS total FROM ({inner}) AS matched"))
    }

    /// Union of facet value ids across the whole unpaginated match set.
    ///
    /// Grouping by product is forced regardless of the request, so the result
    /// reflects availability per product rather than per displayed row.
    pub fn facet_value_ids(&self) -> SqlStatement {
        let mut params = QueryParams::default();
        let term = self.bind_term(&mut params);
        let column = IndexColumn::FacetValueIds.as_str();

        let inner = format!(
            "SELECT {}, {} AS {} FROM {} {}{}",
            qualified(IndexColumn::ProductId),
            self.dialect.string_agg(&qualified(IndexColumn::FacetValueIds)),
            column,
            SEARCH_INDEX_TABLE,
            INDEX_ALIAS,
            self.filter(term.as_ref(), &mut params, true)
        );

        params.finish(format!(
            "SELECT {} AS {} FROM ({}) AS by_product",
            self.dialect.string_agg(&format!("by_product.{column}")),
            column,
            inner
        ))
    }

    fn bind_term(&self, params: &mut QueryParams) -> Option<TermParams> {
        self.query
            .term
            .as_ref()
            .map(|term| self.dialect.bind_term(term, params))
    }

    /// Every non-key column passes through an aggregate when grouping: facet
    /// sets are unioned, everything else takes the group's minimum.
    fn select_list(&self, grouped: bool) -> Vec<String> {
        IndexColumn::ALL
            .iter()
            .map(|column| {
                let expr = self.column_expr(*column, grouped);
                format!("{} AS {}", expr, column.as_str())
            })
            .collect()
    }

    fn column_expr(&self, column: IndexColumn, grouped: bool) -> String {
        let name = qualified(column);
        if !grouped || column == IndexColumn::ProductId {
            name
        } else if column.is_facet_set() {
            self.dialect.string_agg(&name)
        } else {
            format!("MIN({name})")
        }
    }

    fn score(&self, term: Option<&TermParams>, grouped: bool) -> String {
        let Some(term) = term else {
            return self.dialect.float("0");
        };

        let weighted = FIELD_WEIGHTS
            .iter()
            .map(|(column, weight)| {
                let expr = self.column_expr(*column, grouped);
                format!("{} * {}", self.dialect.field_rank(&expr, term), weight)
            })
            .collect::<Vec<_>>()
            .join(" + ");

        self.dialect.float(&format!("({weighted})"))
    }

    /// WHERE (and GROUP BY) shared by all three statements.
    fn filter(
        &self,
        term: Option<&TermParams>,
        params: &mut QueryParams,
        grouped: bool,
    ) -> String {
        let mut predicates = Vec::new();

        if let Some(term) = term {
            let any_field = FIELD_WEIGHTS
                .iter()
                .map(|(column, _)| self.dialect.text_match(&qualified(*column), term))
                .collect::<Vec<_>>()
                .join(" OR ");
            predicates.push(format!("({any_field})"));
        }

        let facet_column = qualified(IndexColumn::FacetValueIds);
        for id in &self.query.facet_value_ids {
            predicates.push(self.dialect.facet_contains(&facet_column, id, params));
        }

        let mut sql = String::new();
        if !predicates.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&predicates.join(" AND "));
        }
        if grouped {
            sql.push_str(&format!(" GROUP BY {}", qualified(IndexColumn::ProductId)));
        }
        sql
    }

    /// Score first (only when ranking), then name, then price, then the tie-break.
    fn order_by(&self) -> String {
        let mut keys = Vec::new();
        if self.query.is_ranked() {
            keys.push("score DESC".to_string());
        }
        if let Some(order) = self.query.sort.name {
            keys.push(format!("{} {}", IndexColumn::ProductName.as_str(), order.as_sql()));
        }
        if let Some(order) = self.query.sort.price {
            keys.push(format!("{} {}", IndexColumn::Price.as_str(), order.as_sql()));
        }
        keys.extend(TIE_BREAK.iter().map(|c| format!("{} ASC", c.as_str())));

        format!(" ORDER BY {}", keys.join(", "))
    }
}

/// Binds every value of a [`SqlStatement`] onto a sqlx query, in placeholder order.
macro_rules! bind_all {
    ($query:expr, $binds:expr) => {{
        let mut query = $query;
        for value in $binds {
            query = match value {
                $crate::services::query::BindValue::Text(text) => query.bind(text.as_str()),
                $crate::services::query::BindValue::Int(int) => query.bind(*int),
            };
        }
        query
    }};
}

pub(crate) use bind_all;
