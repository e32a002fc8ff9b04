use thiserror::Error;

#[derive(Debug, Error)]
pub enum ZenithError {
    #[error("Missing SUPABASE credentials")]
    MissingCredentials,

    #[error("{0}")]
    Validation(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("No ids supplied")]
    NoIds,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    TooLarge(String),

    #[error("refusing unfiltered {0} on table '{1}'")]
    InvalidFilter(&'static str, String),

    #[error(
        "Storage bucket \"{0}\" not found. Create this bucket in Supabase Storage or change SUPABASE_RESUME_BUCKET."
    )]
    BucketNotFound(String),

    #[error("object already exists: {0}")]
    ObjectExists(String),

    /// Message surfaced unchanged from the hosted store.
    #[error("{0}")]
    Store(String),

    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("invalid config: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ZenithError>;
