//! Contact-form leads (`leads` table).

use crate::error::{Result, ZenithError};
use crate::status::LeadStatus;
use crate::store::{Filter, Order, Query, Row, Store};
use crate::validate;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const TABLE: &str = "leads";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Body of `POST /api/contact`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeadInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub budget: String,
}

impl LeadInput {
    pub fn validate(&self) -> Result<()> {
        validate::min_len("name", &self.name, 2)?;
        validate::email("email", &self.email)?;
        validate::min_len("message", &self.message, 5)?;
        validate::min_len("service", &self.service, 1)?;
        validate::min_len("budget", &self.budget, 1)?;
        Ok(())
    }

    /// Row shape stored in `leads`. The chosen service is kept as `source`.
    fn to_row(&self) -> Row {
        json!({
            "name": self.name,
            "email": self.email,
            "phone": validate::present(self.phone.as_deref()),
            "company": validate::present(self.company.as_deref()),
            "message": self.message,
            "source": self.service,
            "budget": self.budget,
            "status": LeadStatus::New,
        })
    }
}

/// A stored lead as read back from the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Validate and store a new lead with status `new`.
pub async fn create(store: &dyn Store, input: &LeadInput) -> Result<Row> {
    input.validate()?;
    let row = store.insert(TABLE, input.to_row()).await?;
    tracing::info!(email = %input.email, source = %input.service, "lead captured");
    Ok(row)
}

/// All leads, newest first.
pub async fn list(store: &dyn Store) -> Result<Vec<Row>> {
    store
        .select(TABLE, &Query::new().order(Order::desc("created_at")))
        .await
}

pub async fn list_typed(store: &dyn Store) -> Result<Vec<Lead>> {
    list(store)
        .await?
        .into_iter()
        .map(|row| serde_json::from_value(row).map_err(ZenithError::from))
        .collect()
}

pub async fn set_status(store: &dyn Store, id: &str, status: &str) -> Result<Row> {
    let status: LeadStatus = status.parse()?;
    let rows = store
        .update(TABLE, &[Filter::eq("id", id)], json!({ "status": status }))
        .await?;
    let row = rows
        .into_iter()
        .next()
        .ok_or_else(|| ZenithError::NotFound("Lead not found".to_string()))?;
    tracing::info!(%id, %status, "lead status updated");
    Ok(row)
}

pub async fn delete_many(store: &dyn Store, ids: &[String]) -> Result<()> {
    if ids.is_empty() {
        return Err(ZenithError::NoIds);
    }
    store
        .delete(TABLE, &[Filter::is_in("id", ids.iter().map(String::as_str))])
        .await?;
    tracing::info!(count = ids.len(), "leads deleted");
    Ok(())
}

pub async fn count(store: &dyn Store) -> Result<usize> {
    Ok(store.select(TABLE, &Query::new()).await?.len())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
