//! Entity-agnostic paged query construction.
//!
//! Every collection read in the API goes through [`PageQuery`]: owner and
//! foreign-key scoping as AND-conjoined predicates, an optional
//! case-insensitive substring search over designated columns, and validated
//! limit/offset. The builder produces parameterized SQL only; execution
//! happens against the shared pool with positionally bound params.

use serde::Deserialize;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::{FromRow, PgPool, Row};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Invalid limit: {0}")]
    InvalidLimit(String),

    #[error("Invalid offset: {0}")]
    InvalidOffset(String),
}

/// Validated limit/offset pair. Negative values are rejected here, before
/// any query is built; a zero limit is legal and yields an empty page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Pagination {
    pub const DEFAULT_LIMIT: i64 = 10;

    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Result<Self, QueryError> {
        let limit = limit.unwrap_or(Self::DEFAULT_LIMIT);
        let offset = offset.unwrap_or(0);
        if limit < 0 {
            return Err(QueryError::InvalidLimit("limit must not be negative".to_string()));
        }
        if offset < 0 {
            return Err(QueryError::InvalidOffset("offset must not be negative".to_string()));
        }
        Ok(Self { limit, offset })
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self { limit: Self::DEFAULT_LIMIT, offset: 0 }
    }
}

/// Typed query parameter, bound positionally as $1..$n.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Uuid(Uuid),
    Text(String),
    Int(i64),
    Bool(bool),
    TextArray(Vec<String>),
}

impl From<Uuid> for SqlParam {
    fn from(v: Uuid) -> Self {
        SqlParam::Uuid(v)
    }
}

impl From<String> for SqlParam {
    fn from(v: String) -> Self {
        SqlParam::Text(v)
    }
}

impl From<&str> for SqlParam {
    fn from(v: &str) -> Self {
        SqlParam::Text(v.to_string())
    }
}

impl From<i64> for SqlParam {
    fn from(v: i64) -> Self {
        SqlParam::Int(v)
    }
}

impl From<i32> for SqlParam {
    fn from(v: i32) -> Self {
        SqlParam::Int(v as i64)
    }
}

impl From<bool> for SqlParam {
    fn from(v: bool) -> Self {
        SqlParam::Bool(v)
    }
}

impl From<Vec<String>> for SqlParam {
    fn from(v: Vec<String>) -> Self {
        SqlParam::TextArray(v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PredicateOp {
    /// column = $n
    Eq,
    /// column @> $n (array containment)
    Contains,
}

#[derive(Debug, Clone)]
struct Predicate {
    column: &'static str,
    op: PredicateOp,
    param: SqlParam,
}

#[derive(Debug, Clone)]
struct SearchClause {
    columns: &'static [&'static str],
    term: String,
}

/// Rendered SQL plus its parameters in bind order.
#[derive(Debug, Clone)]
pub struct SqlStatement {
    pub query: String,
    pub params: Vec<SqlParam>,
}

pub struct PageQuery {
    table: &'static str,
    select: &'static str,
    join: Option<&'static str>,
    predicates: Vec<Predicate>,
    search: Option<SearchClause>,
    page: Option<Pagination>,
}

impl PageQuery {
    pub fn new(table: &'static str) -> Self {
        debug_assert!(is_valid_identifier(table), "invalid table name: {table}");
        Self {
            table,
            select: "*",
            join: None,
            predicates: vec![],
            search: None,
            page: None,
        }
    }

    /// Override the projection, e.g. "list_items.*" when a join is present.
    pub fn select(mut self, columns: &'static str) -> Self {
        self.select = columns;
        self
    }

    /// Attach a verbatim join clause, e.g.
    /// "INNER JOIN items ON items.id = list_items.item_id".
    pub fn join(mut self, clause: &'static str) -> Self {
        self.join = Some(clause);
        self
    }

    pub fn filter_eq(mut self, column: &'static str, value: impl Into<SqlParam>) -> Self {
        debug_assert!(is_valid_column(column), "invalid column name: {column}");
        self.predicates.push(Predicate {
            column,
            op: PredicateOp::Eq,
            param: value.into(),
        });
        self
    }

    /// Array containment: every element of `values` must be present in the
    /// row's array column. An empty set is the caller's "no restriction" and
    /// must be skipped at the call site, not passed here.
    pub fn filter_contains(mut self, column: &'static str, values: Vec<String>) -> Self {
        debug_assert!(is_valid_column(column), "invalid column name: {column}");
        self.predicates.push(Predicate {
            column,
            op: PredicateOp::Contains,
            param: SqlParam::TextArray(values),
        });
        self
    }

    /// Case-insensitive substring search over one or more columns. A missing
    /// or empty term leaves the query unchanged.
    pub fn search(mut self, columns: &'static [&'static str], term: Option<&str>) -> Self {
        debug_assert!(columns.iter().all(|c| is_valid_column(c)));
        match term {
            Some(t) if !t.is_empty() => {
                self.search = Some(SearchClause {
                    columns,
                    term: t.to_string(),
                });
            }
            _ => {}
        }
        self
    }

    pub fn page(mut self, page: Pagination) -> Self {
        self.page = Some(page);
        self
    }

    pub fn to_sql(&self) -> SqlStatement {
        let (where_clause, params) = self.build_where();

        let mut parts = vec![
            format!("SELECT {}", self.select),
            format!("FROM {}", quote_column(self.table)),
        ];
        if let Some(join) = self.join {
            parts.push(join.to_string());
        }
        if !where_clause.is_empty() {
            parts.push(format!("WHERE {}", where_clause));
        }
        if let Some(page) = self.page {
            parts.push(format!("LIMIT {} OFFSET {}", page.limit, page.offset));
        }

        SqlStatement { query: parts.join(" "), params }
    }

    /// Count query over the same predicates and search, ignoring pagination.
    pub fn to_count_sql(&self) -> SqlStatement {
        let (where_clause, params) = self.build_where();

        let mut parts = vec![
            "SELECT COUNT(*) AS count".to_string(),
            format!("FROM {}", quote_column(self.table)),
        ];
        if let Some(join) = self.join {
            parts.push(join.to_string());
        }
        if !where_clause.is_empty() {
            parts.push(format!("WHERE {}", where_clause));
        }

        SqlStatement { query: parts.join(" "), params }
    }

    fn build_where(&self) -> (String, Vec<SqlParam>) {
        let mut conditions = vec![];
        let mut params = vec![];

        for predicate in &self.predicates {
            params.push(predicate.param.clone());
            let placeholder = params.len();
            let condition = match predicate.op {
                PredicateOp::Eq => format!("{} = ${}", quote_column(predicate.column), placeholder),
                PredicateOp::Contains => {
                    format!("{} @> ${}", quote_column(predicate.column), placeholder)
                }
            };
            conditions.push(condition);
        }

        if let Some(search) = &self.search {
            let pattern = format!("%{}%", search.term);
            let mut matches = vec![];
            for column in search.columns {
                params.push(SqlParam::Text(pattern.clone()));
                matches.push(format!("{} ILIKE ${}", quote_column(column), params.len()));
            }
            conditions.push(format!("({})", matches.join(" OR ")));
        }

        (conditions.join(" AND "), params)
    }

    pub async fn fetch_all<T>(self, pool: &PgPool) -> Result<Vec<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let SqlStatement { query, params } = self.to_sql();
        let mut q = sqlx::query_as::<_, T>(&query);
        for p in params {
            q = bind_query_as(q, p);
        }
        q.fetch_all(pool).await
    }

    pub async fn count(self, pool: &PgPool) -> Result<i64, sqlx::Error> {
        let SqlStatement { query, params } = self.to_count_sql();
        let mut q = sqlx::query(&query);
        for p in params {
            q = bind_query(q, p);
        }
        let row = q.fetch_one(pool).await?;
        row.try_get("count")
    }
}

fn bind_query(
    q: sqlx::query::Query<'_, sqlx::Postgres, PgArguments>,
    p: SqlParam,
) -> sqlx::query::Query<'_, sqlx::Postgres, PgArguments> {
    match p {
        SqlParam::Uuid(v) => q.bind(v),
        SqlParam::Text(v) => q.bind(v),
        SqlParam::Int(v) => q.bind(v),
        SqlParam::Bool(v) => q.bind(v),
        SqlParam::TextArray(v) => q.bind(v),
    }
}

fn bind_query_as<O>(
    q: sqlx::query::QueryAs<'_, sqlx::Postgres, O, PgArguments>,
    p: SqlParam,
) -> sqlx::query::QueryAs<'_, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    match p {
        SqlParam::Uuid(v) => q.bind(v),
        SqlParam::Text(v) => q.bind(v),
        SqlParam::Int(v) => q.bind(v),
        SqlParam::Bool(v) => q.bind(v),
        SqlParam::TextArray(v) => q.bind(v),
    }
}

fn is_valid_identifier(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(|c| c.is_alphanumeric() || c == '_')
        && name.chars().next().is_some_and(|c| c.is_alphabetic() || c == '_')
}

fn is_valid_column(name: &str) -> bool {
    !name.is_empty() && name.split('.').all(is_valid_identifier)
}

/// Quote an identifier, handling dotted table.column references.
fn quote_column(name: &str) -> String {
    name.split('.')
        .map(|part| format!("\"{}\"", part))
        .collect::<Vec<_>>()
        .join(".")
}

/// Query-string shape shared by every list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub search: Option<String>,
}

impl ListParams {
    pub fn pagination(&self) -> Result<Pagination, QueryError> {
        Pagination::new(self.limit, self.offset)
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref()
    }
}
