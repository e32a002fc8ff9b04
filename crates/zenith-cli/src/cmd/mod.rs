pub mod admin;
pub mod catalog;
pub mod config;
pub mod serve;

use anyhow::Context;
use std::path::Path;
use zenith_core::config::SiteConfig;

/// Config file overlaid with the environment.
pub fn load_config(path: &Path) -> anyhow::Result<SiteConfig> {
    SiteConfig::resolve(path).with_context(|| format!("failed to load {}", path.display()))
}
