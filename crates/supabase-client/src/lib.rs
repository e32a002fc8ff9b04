//! `supabase-client`: async driver for a hosted Supabase project.
//!
//! Covers the two surfaces the site uses:
//!
//! ```text
//! SupabaseClient
//!     ├── rest/v1/{table}            insert / select / update / delete
//!     └── storage/v1/object/{bucket} upload / public URL
//! ```
//!
//! Rows are plain `serde_json::Value`s; callers own their schema.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use supabase_client::{QueryParams, SupabaseClient, SupabaseConfig};
//!
//! let client = SupabaseClient::new(SupabaseConfig::new(url, key))?;
//! let leads = client
//!     .select("leads", &QueryParams::new().order("created_at", false))
//!     .await?;
//! ```

pub mod client;
pub mod error;
pub mod storage;
pub mod types;


pub use client::SupabaseClient;
pub use error::SupabaseError;
pub use types::{QueryParams, SupabaseConfig};

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, SupabaseError>;
