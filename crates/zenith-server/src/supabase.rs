//! Adapter from the hosted-API client to the core store contract.

use async_trait::async_trait;
use std::sync::Arc;
use supabase_client::{QueryParams, SupabaseClient, SupabaseConfig, SupabaseError};
use zenith_core::config::SupabaseSettings;
use zenith_core::store::{Backend, Filter, ObjectStorage, Query, Row, Store};
use zenith_core::{Result, ZenithError};

#[derive(Debug, Clone)]
pub struct SupabaseBackend {
    client: SupabaseClient,
}

impl SupabaseBackend {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    /// Build a [`Backend`] from settings, or `None` when credentials are absent.
    pub fn from_settings(settings: &SupabaseSettings) -> Result<Option<Backend>> {
        let Some((url, key)) = settings.credentials() else {
            return Ok(None);
        };
        let client = SupabaseClient::new(SupabaseConfig::new(url, key))
            .map_err(|e| ZenithError::Config(e.to_string()))?;
        let shared = Arc::new(Self::new(client));
        Ok(Some(Backend::new(shared.clone(), shared)))
    }
}

fn params(filters: &[Filter]) -> QueryParams {
    filters.iter().fold(QueryParams::new(), |p, f| match f {
        Filter::Eq(col, v) => p.eq(col, v),
        Filter::In(col, vs) => p.is_in(col, vs),
    })
}

fn query_params(query: &Query) -> QueryParams {
    let mut p = params(&query.filters);
    if let Some(order) = &query.order {
        p = p.order(&order.column, order.ascending);
    }
    if let Some(limit) = query.limit {
        p = p.limit(limit);
    }
    p
}

fn store_error(e: SupabaseError) -> ZenithError {
    ZenithError::Store(e.to_string())
}

#[async_trait]
impl Store for SupabaseBackend {
    fn kind(&self) -> &'static str {
        "supabase"
    }

    async fn insert(&self, table: &str, row: Row) -> Result<Row> {
        self.client.insert(table, &row).await.map_err(store_error)
    }

    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Row>> {
        self.client
            .select(table, &query_params(query))
            .await
            .map_err(store_error)
    }

    async fn update(&self, table: &str, filters: &[Filter], patch: Row) -> Result<Vec<Row>> {
        if filters.is_empty() {
            return Err(ZenithError::InvalidFilter("update", table.to_string()));
        }
        self.client
            .update(table, &params(filters), &patch)
            .await
            .map_err(store_error)
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<()> {
        if filters.is_empty() {
            return Err(ZenithError::InvalidFilter("delete", table.to_string()));
        }
        self.client
            .delete(table, &params(filters))
            .await
            .map_err(store_error)
    }
}

#[async_trait]
impl ObjectStorage for SupabaseBackend {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        self.client
            .upload(bucket, path, bytes, content_type)
            .await
            .map_err(|e| {
                if e.is_bucket_not_found() {
                    ZenithError::BucketNotFound(bucket.to_string())
                } else if e.is_duplicate() {
                    ZenithError::ObjectExists(format!("{bucket}/{path}"))
                } else {
                    store_error(e)
                }
            })
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        self.client.public_url(bucket, path)
    }
}
