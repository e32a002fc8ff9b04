//! Contract with the hosted relational store and object storage.
//!
//! Rows travel as JSON objects; the record modules (`lead`, `application`,
//! `post`, `consultation`) own the table names and row shapes. Two
//! implementations exist: the in-memory backend in [`crate::memory`] and the
//! hosted-API adapter in `zenith-server`.

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub type Row = Value;

// ---------------------------------------------------------------------------
// Filters and ordering
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Eq(String, Value),
    In(String, Vec<Value>),
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq(column.into(), value.into())
    }

    pub fn is_in<V: Into<Value>>(column: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Filter::In(column.into(), values.into_iter().map(Into::into).collect())
    }

    /// Whether `row` satisfies this filter. A missing column never matches.
    pub fn matches(&self, row: &Row) -> bool {
        match self {
            Filter::Eq(col, v) => row.get(col).is_some_and(|x| x == v),
            Filter::In(col, vs) => row.get(col).is_some_and(|x| vs.contains(x)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

impl Order {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: true,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: false,
        }
    }
}

/// A filtered, ordered select.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

#[async_trait]
pub trait Store: Send + Sync {
    /// Short label used in logs and the health endpoint.
    fn kind(&self) -> &'static str;

    /// Insert a row and return it as stored (with generated columns).
    async fn insert(&self, table: &str, row: Row) -> Result<Row>;

    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Row>>;

    /// Apply `patch` to every row matching all `filters`; returns the updated rows.
    async fn update(&self, table: &str, filters: &[Filter], patch: Row) -> Result<Vec<Row>>;

    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<()>;
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Upload without overwriting an existing object.
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<()>;

    fn public_url(&self, bucket: &str, path: &str) -> String;
}

/// The pair of collaborators a request handler needs.
#[derive(Clone)]
pub struct Backend {
    pub store: Arc<dyn Store>,
    pub storage: Arc<dyn ObjectStorage>,
}

impl Backend {
    pub fn new(store: Arc<dyn Store>, storage: Arc<dyn ObjectStorage>) -> Self {
        Self { store, storage }
    }

    pub fn kind(&self) -> &'static str {
        self.store.kind()
    }
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend").field("kind", &self.kind()).finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
