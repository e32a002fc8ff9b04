pub mod applications;
pub mod catalog;
pub mod consultations;
pub mod contact;
pub mod health;
pub mod leads;
pub mod posts;
pub mod summary;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::AppError;

/// Parse a JSON request body, mapping any failure to 400 `Invalid JSON`.
pub(crate) fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|_| AppError::bad_request("Invalid JSON"))
}

/// Body of the bulk-delete admin routes.
#[derive(Debug, Default, Deserialize)]
pub struct IdsBody {
    #[serde(default)]
    pub ids: Vec<String>,
}

impl IdsBody {
    /// A body that cannot be read as `{ids}` is treated as an empty id list.
    pub(crate) fn from_bytes(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}

/// Body of the status PATCH routes.
#[derive(Debug, Deserialize)]
pub struct StatusBody {
    #[serde(default)]
    pub status: String,
}
