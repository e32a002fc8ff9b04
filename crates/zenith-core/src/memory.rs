//! In-process backend implementing [`Store`] and [`ObjectStorage`].
//!
//! Used by `zenith serve --in-memory` and throughout the test suites. Data
//! lives for the lifetime of the process.

use crate::error::{Result, ZenithError};
use crate::store::{Backend, Filter, ObjectStorage, Query, Row, Store};
use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[derive(Default)]
struct Inner {
    tables: HashMap<String, Vec<Row>>,
    buckets: BTreeSet<String>,
    objects: BTreeMap<(String, String), StoredObject>,
}

#[derive(Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<Mutex<Inner>>,
    failure: Option<String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend with the given storage buckets already created.
    pub fn with_buckets<S: Into<String>>(buckets: impl IntoIterator<Item = S>) -> Self {
        let backend = Self::new();
        {
            let mut inner = backend.lock();
            inner.buckets.extend(buckets.into_iter().map(Into::into));
        }
        backend
    }

    /// Backend whose every operation fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            inner: Arc::default(),
            failure: Some(message.into()),
        }
    }

    /// Snapshot of an uploaded object, if present.
    pub fn object(&self, bucket: &str, path: &str) -> Option<StoredObject> {
        self.lock()
            .objects
            .get(&(bucket.to_string(), path.to_string()))
            .cloned()
    }

    pub fn object_count(&self) -> usize {
        self.lock().objects.len()
    }

    /// Wrap this backend as both collaborators of a [`Backend`].
    pub fn into_backend(self) -> Backend {
        let shared = Arc::new(self);
        Backend::new(shared.clone(), shared)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A poisoned lock only means another test thread panicked mid-write.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check(&self) -> Result<()> {
        match &self.failure {
            Some(msg) => Err(ZenithError::Store(msg.clone())),
            None => Ok(()),
        }
    }
}

fn matches_all(row: &Row, filters: &[Filter]) -> bool {
    filters.iter().all(|f| f.matches(row))
}

/// Order JSON scalars; `null`/missing sort after everything else.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Greater,
        (_, None | Some(Value::Null)) => Ordering::Less,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}

#[async_trait]
impl Store for MemoryBackend {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, table: &str, row: Row) -> Result<Row> {
        self.check()?;
        let Value::Object(mut map) = row else {
            return Err(ZenithError::Store("row must be a JSON object".into()));
        };
        map.entry("id")
            .or_insert_with(|| Value::String(uuid::Uuid::new_v4().to_string()));
        map.entry("created_at")
            .or_insert_with(|| Value::String(chrono::Utc::now().to_rfc3339()));
        let row = Value::Object(map);
        self.lock()
            .tables
            .entry(table.to_string())
            .or_default()
            .push(row.clone());
        Ok(row)
    }

    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Row>> {
        self.check()?;
        let inner = self.lock();
        let mut rows: Vec<Row> = inner
            .tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|r| matches_all(r, &query.filters))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        drop(inner);

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let a = a.get(&order.column);
                let b = b.get(&order.column);
                let ord = compare_values(a, b);
                // Nulls stay last in both directions.
                let a_null = a.is_none_or(Value::is_null);
                let b_null = b.is_none_or(Value::is_null);
                if order.ascending || a_null || b_null {
                    ord
                } else {
                    ord.reverse()
                }
            });
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    async fn update(&self, table: &str, filters: &[Filter], patch: Row) -> Result<Vec<Row>> {
        self.check()?;
        if filters.is_empty() {
            return Err(ZenithError::InvalidFilter("update", table.to_string()));
        }
        let Value::Object(patch) = patch else {
            return Err(ZenithError::Store("patch must be a JSON object".into()));
        };
        let mut inner = self.lock();
        let mut updated = Vec::new();
        if let Some(rows) = inner.tables.get_mut(table) {
            for row in rows.iter_mut().filter(|r| matches_all(r, filters)) {
                if let Value::Object(map) = row {
                    for (k, v) in &patch {
                        map.insert(k.clone(), v.clone());
                    }
                }
                updated.push(row.clone());
            }
        }
        Ok(updated)
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<()> {
        self.check()?;
        if filters.is_empty() {
            return Err(ZenithError::InvalidFilter("delete", table.to_string()));
        }
        if let Some(rows) = self.lock().tables.get_mut(table) {
            rows.retain(|r| !matches_all(r, filters));
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStorage for MemoryBackend {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        self.check()?;
        let mut inner = self.lock();
        if !inner.buckets.contains(bucket) {
            return Err(ZenithError::BucketNotFound(bucket.to_string()));
        }
        let key = (bucket.to_string(), path.to_string());
        if inner.objects.contains_key(&key) {
            return Err(ZenithError::ObjectExists(format!("{bucket}/{path}")));
        }
        inner.objects.insert(
            key,
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("memory://{bucket}/{path}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
