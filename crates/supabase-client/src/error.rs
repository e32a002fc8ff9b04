use thiserror::Error;

#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response. `message` is the API's own error text.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid service key: {0}")]
    InvalidKey(String),
}

impl SupabaseError {
    /// The storage API reports a missing bucket in the message body rather
    /// than with a dedicated status.
    pub fn is_bucket_not_found(&self) -> bool {
        matches!(self, SupabaseError::Api { message, .. } if message.contains("Bucket not found"))
    }

    /// Upload refused because an object already sits at that path.
    pub fn is_duplicate(&self) -> bool {
        match self {
            SupabaseError::Api { status, message } => {
                *status == 409 || message.contains("already exists")
            }
            _ => false,
        }
    }
}
