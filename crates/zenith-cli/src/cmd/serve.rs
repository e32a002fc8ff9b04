use anyhow::{Context, Result};
use std::path::Path;
use zenith_core::memory::MemoryBackend;
use zenith_server::AppState;

pub struct ServeOptions {
    pub port: Option<u16>,
    pub host: Option<String>,
    pub in_memory: bool,
    pub open: bool,
}

pub fn run(config_path: &Path, opts: ServeOptions) -> Result<()> {
    let mut config = super::load_config(config_path)?;
    if let Some(port) = opts.port {
        config.server.port = port;
    }
    if let Some(host) = opts.host {
        config.server.host = host;
    }

    let state = if opts.in_memory {
        let backend = MemoryBackend::with_buckets([config.supabase.resume_bucket.clone()]);
        tracing::warn!("serving from an in-memory store; data is lost on exit");
        AppState::with_backend(config, Some(backend.into_backend()))
    } else {
        config.ensure_valid().context("refusing to start")?;
        AppState::from_config(config)?
    };

    let host = state.config.server.host.clone();
    let port = state.config.server.port;
    let rt = tokio::runtime::Runtime::new()?;

    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind((host.as_str(), port))
            .await
            .with_context(|| format!("failed to bind {host}:{port}"))?;
        let actual_port = listener.local_addr()?.port();
        println!("ZenithView site → http://localhost:{actual_port}");

        tokio::select! {
            res = zenith_server::serve_on(state, listener, opts.open) => res,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                Ok(())
            }
        }
    })
}
