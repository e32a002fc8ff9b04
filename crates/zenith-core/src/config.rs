use crate::error::{Result, ZenithError};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "zenith.yaml";

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// SupabaseSettings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SupabaseSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_role_key: Option<String>,
    #[serde(default = "default_resume_bucket")]
    pub resume_bucket: String,
}

fn default_resume_bucket() -> String {
    "resumes".to_string()
}

impl SupabaseSettings {
    /// `(url, key)` when both are present and non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let url = self.url.as_deref().filter(|s| !s.trim().is_empty())?;
        let key = self
            .service_role_key
            .as_deref()
            .filter(|s| !s.trim().is_empty())?;
        Some((url, key))
    }
}

// ---------------------------------------------------------------------------
// ServerSettings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

// ---------------------------------------------------------------------------
// SiteConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub supabase: SupabaseSettings,
    /// Shared secret gating `/api/admin/*`. Unset means the admin is open.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_token: Option<String>,
    #[serde(default = "default_calendly_url")]
    pub calendly_url: String,
}

fn default_calendly_url() -> String {
    "https://calendly.com/zenithview/demo".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            supabase: SupabaseSettings {
                resume_bucket: default_resume_bucket(),
                ..Default::default()
            },
            admin_token: None,
            calendly_url: default_calendly_url(),
        }
    }
}

impl SiteConfig {
    /// Load from a YAML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(&data)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Overlay values from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| std::env::var(key).ok());
    }

    /// Overlay values from `lookup`. Empty values are ignored.
    pub fn apply_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(v) = get("SUPABASE_URL") {
            self.supabase.url = Some(v);
        }
        if let Some(v) = get("SUPABASE_SERVICE_ROLE_KEY") {
            self.supabase.service_role_key = Some(v);
        }
        if let Some(v) = get("SUPABASE_RESUME_BUCKET") {
            self.supabase.resume_bucket = v;
        }
        if let Some(v) = get("ZENITH_ADMIN_TOKEN") {
            self.admin_token = Some(v);
        }
        if let Some(v) = get("ZENITH_CALENDLY_URL") {
            self.calendly_url = v;
        }
    }

    /// File then environment.
    pub fn resolve(path: &Path) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env();
        Ok(config)
    }

    /// Copy safe to print: secrets replaced with a marker.
    pub fn redacted(&self) -> Self {
        let mut c = self.clone();
        if c.supabase.service_role_key.is_some() {
            c.supabase.service_role_key = Some("<redacted>".to_string());
        }
        if c.admin_token.is_some() {
            c.admin_token = Some("<redacted>".to_string());
        }
        c
    }

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let s = &self.supabase;

        match (s.url.is_some(), s.service_role_key.is_some()) {
            (true, false) => warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "SUPABASE_URL is set but SUPABASE_SERVICE_ROLE_KEY is missing".into(),
            }),
            (false, true) => warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "SUPABASE_SERVICE_ROLE_KEY is set but SUPABASE_URL is missing".into(),
            }),
            (false, false) => warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "no Supabase credentials: store-backed routes will return 500".into(),
            }),
            (true, true) => {}
        }

        if let Some(url) = &s.url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("supabase url '{url}' must start with http:// or https://"),
                });
            }
        }

        if s.resume_bucket.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "resume bucket name is empty".into(),
            });
        }

        if self.admin_token.is_none() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "ZENITH_ADMIN_TOKEN not set: admin routes are unauthenticated".into(),
            });
        }

        warnings
    }

    /// Fail on the first error-level warning.
    pub fn ensure_valid(&self) -> Result<()> {
        match self
            .validate()
            .into_iter()
            .find(|w| w.level == WarnLevel::Error)
        {
            Some(w) => Err(ZenithError::Config(w.message)),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = SiteConfig::load(&dir.path().join("zenith.yaml")).unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.supabase.resume_bucket, "resumes");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("zenith.yaml");
        let mut config = SiteConfig::default();
        config.server.port = 8080;
        config.supabase.resume_bucket = "cvs".into();
        config.save(&path).unwrap();

        let loaded = SiteConfig::load(&path).unwrap();
        assert_eq!(loaded.server.port, 8080);
        assert_eq!(loaded.supabase.resume_bucket, "cvs");
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("zenith.yaml");
        std::fs::write(&path, "server:\n  port: 9000\n").unwrap();
        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.calendly_url, "https://calendly.com/zenithview/demo");
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = SiteConfig::default();
        config.apply_vars(vars(&[
            ("SUPABASE_URL", "https://abc.supabase.co"),
            ("SUPABASE_SERVICE_ROLE_KEY", "secret"),
            ("SUPABASE_RESUME_BUCKET", "cv"),
            ("ZENITH_ADMIN_TOKEN", "tok"),
        ]));
        assert_eq!(
            config.supabase.credentials(),
            Some(("https://abc.supabase.co", "secret"))
        );
        assert_eq!(config.supabase.resume_bucket, "cv");
        assert_eq!(config.admin_token.as_deref(), Some("tok"));
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let mut config = SiteConfig::default();
        config.apply_vars(vars(&[("SUPABASE_RESUME_BUCKET", "  ")]));
        assert_eq!(config.supabase.resume_bucket, "resumes");
    }

    #[test]
    fn half_configured_credentials_is_an_error() {
        let mut config = SiteConfig::default();
        config.supabase.url = Some("https://abc.supabase.co".into());
        assert!(config.ensure_valid().is_err());
        assert!(config.supabase.credentials().is_none());
    }

    #[test]
    fn url_without_scheme_is_an_error() {
        let mut config = SiteConfig::default();
        config.supabase.url = Some("abc.supabase.co".into());
        config.supabase.service_role_key = Some("k".into());
        let warnings = config.validate();
        assert!(warnings
            .iter()
            .any(|w| w.level == WarnLevel::Error && w.message.contains("http")));
    }

    #[test]
    fn defaults_only_warn() {
        let config = SiteConfig::default();
        assert!(config.ensure_valid().is_ok());
        assert!(!config.validate().is_empty());
    }

    #[test]
    fn redacted_hides_secrets() {
        let mut config = SiteConfig::default();
        config.supabase.service_role_key = Some("secret".into());
        config.admin_token = Some("tok".into());
        let yaml = serde_yaml::to_string(&config.redacted()).unwrap();
        assert!(!yaml.contains("secret"));
        assert!(!yaml.contains("tok\n"));
        assert!(yaml.contains("<redacted>"));
    }
}
