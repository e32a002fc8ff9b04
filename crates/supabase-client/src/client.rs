use crate::error::SupabaseError;
use crate::types::{QueryParams, SupabaseConfig};
use crate::Result;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Method, RequestBuilder, Response};
use serde_json::Value;

const PREFER_REPRESENTATION: &str = "return=representation";

/// Handle to one hosted project. Cheap to clone; the underlying connection
/// pool is shared.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    config: SupabaseConfig,
}

impl SupabaseClient {
    pub fn new(config: SupabaseConfig) -> Result<Self> {
        let key = HeaderValue::from_str(&config.service_key)
            .map_err(|e| SupabaseError::InvalidKey(e.to_string()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.service_key))
            .map_err(|e| SupabaseError::InvalidKey(e.to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;
        Ok(Self { http, config })
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url(), path.trim_start_matches('/'))
    }

    fn table(&self, method: Method, table: &str, params: &QueryParams) -> RequestBuilder {
        self.http
            .request(method, self.url(&format!("rest/v1/{table}")))
            .query(params.pairs())
    }

    pub(crate) fn request(&self, method: Method, url: String) -> RequestBuilder {
        self.http.request(method, url)
    }

    // ─── Rows ─────────────────────────────────────────────────────────────

    /// Insert one row and return it as stored.
    pub async fn insert(&self, table: &str, row: &Value) -> Result<Value> {
        let resp = self
            .table(Method::POST, table, &QueryParams::new())
            .header("Prefer", PREFER_REPRESENTATION)
            .json(row)
            .send()
            .await?;
        let rows = rows(check(resp).await?).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| SupabaseError::Decode(format!("insert into {table} returned no rows")))
    }

    pub async fn select(&self, table: &str, params: &QueryParams) -> Result<Vec<Value>> {
        let resp = self
            .table(Method::GET, table, params)
            .query(&[("select", "*")])
            .send()
            .await?;
        rows(check(resp).await?).await
    }

    /// Patch every row matching `params`; returns the updated rows.
    pub async fn update(
        &self,
        table: &str,
        params: &QueryParams,
        patch: &Value,
    ) -> Result<Vec<Value>> {
        let resp = self
            .table(Method::PATCH, table, params)
            .header("Prefer", PREFER_REPRESENTATION)
            .json(patch)
            .send()
            .await?;
        rows(check(resp).await?).await
    }

    pub async fn delete(&self, table: &str, params: &QueryParams) -> Result<()> {
        let resp = self.table(Method::DELETE, table, params).send().await?;
        check(resp).await?;
        Ok(())
    }
}

/// Turn a non-2xx response into [`SupabaseError::Api`], pulling the message
/// from the JSON body's `message`, `error` or `msg` field when present.
pub(crate) async fn check(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = error_message(&body).unwrap_or_else(|| {
        if body.trim().is_empty() {
            status.to_string()
        } else {
            body.clone()
        }
    });
    tracing::debug!(status = status.as_u16(), %message, "supabase request failed");
    Err(SupabaseError::Api {
        status: status.as_u16(),
        message,
    })
}

fn error_message(body: &str) -> Option<String> {
    let v: Value = serde_json::from_str(body).ok()?;
    ["message", "error", "msg"]
        .iter()
        .find_map(|k| v.get(*k).and_then(Value::as_str).map(str::to_string))
}

async fn rows(resp: Response) -> Result<Vec<Value>> {
    let text = resp.text().await?;
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Array(rows)) => Ok(rows),
        Ok(Value::Null) => Ok(Vec::new()),
        Ok(obj @ Value::Object(_)) => Ok(vec![obj]),
        Ok(other) => Err(SupabaseError::Decode(format!("expected rows, got {other}"))),
        Err(e) => Err(SupabaseError::Decode(e.to_string())),
    }
}
