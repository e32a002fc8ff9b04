use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─── Connection settings ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://abcd.supabase.co`. Trailing slashes are ignored.
    pub url: String,
    /// Service-role key; sent as both `apikey` and bearer token.
    pub service_key: String,
}

impl SupabaseConfig {
    pub fn new(url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            service_key: service_key.into(),
        }
    }

    pub(crate) fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

// ─── REST query parameters ────────────────────────────────────────────────

/// Query-string builder for the REST endpoint's horizontal filtering syntax:
/// `col=eq.v`, `col=in.("a","b")`, `order=col.desc`, `limit=n`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: &str, value: &Value) -> Self {
        self.pairs
            .push((column.to_string(), format!("eq.{}", scalar(value))));
        self
    }

    pub fn is_in(mut self, column: &str, values: &[Value]) -> Self {
        let list: Vec<String> = values.iter().map(|v| quoted(&scalar(v))).collect();
        self.pairs
            .push((column.to_string(), format!("in.({})", list.join(","))));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let dir = if ascending { "asc" } else { "desc" };
        self.pairs
            .push(("order".to_string(), format!("{column}.{dir}")));
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.pairs.push(("limit".to_string(), n.to_string()));
        self
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

fn scalar(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}
