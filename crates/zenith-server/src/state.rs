use crate::error::AppError;
use crate::supabase::SupabaseBackend;
use std::sync::Arc;
use zenith_core::config::SiteConfig;
use zenith_core::store::{Backend, Store};
use zenith_core::ZenithError;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<SiteConfig>,
    backend: Option<Backend>,
}

impl AppState {
    /// State wired to the hosted backend when credentials are configured.
    pub fn from_config(config: SiteConfig) -> zenith_core::Result<Self> {
        let backend = SupabaseBackend::from_settings(&config.supabase)?;
        match &backend {
            Some(b) => tracing::info!(backend = b.kind(), "store configured"),
            None => tracing::warn!("no store credentials; store-backed routes will fail"),
        }
        Ok(Self {
            config: Arc::new(config),
            backend,
        })
    }

    pub fn with_backend(config: SiteConfig, backend: Option<Backend>) -> Self {
        Self {
            config: Arc::new(config),
            backend,
        }
    }

    /// The configured backend, or the missing-credentials error.
    pub fn backend(&self) -> Result<&Backend, AppError> {
        self.backend
            .as_ref()
            .ok_or_else(|| AppError(ZenithError::MissingCredentials.into()))
    }

    pub fn store(&self) -> Result<&dyn Store, AppError> {
        Ok(self.backend()?.store.as_ref())
    }

    /// Store for reads that have a fallback.
    pub fn optional_store(&self) -> Option<&dyn Store> {
        self.backend.as_ref().map(|b| b.store.as_ref())
    }

    pub fn backend_kind(&self) -> &'static str {
        self.backend.as_ref().map_or("none", Backend::kind)
    }

    pub fn resume_bucket(&self) -> &str {
        &self.config.supabase.resume_bucket
    }
}
