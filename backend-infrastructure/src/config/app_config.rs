use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use backend_domain::RuntimeConfig;

use super::validation::{validate_identities, IdentityEntry};

pub const CONFIG_ENV: &str = "GATHERLY_CONFIG";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub data_path: Option<String>,
    pub home_region: String,
    pub catalog_url: Option<String>,
    pub catalog_token: Option<String>,
    pub catalog_location: String,
    pub catalog_within: String,
    pub catalog_fixture_path: Option<String>,
    pub identities: Vec<IdentityEntry>,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub log_dir: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let runtime = RuntimeConfig::default();
        Self {
            bind_addr: runtime.bind_addr,
            data_path: None,
            home_region: runtime.home_region,
            catalog_url: None,
            catalog_token: None,
            catalog_location: runtime.catalog_location,
            catalog_within: runtime.catalog_within,
            catalog_fixture_path: None,
            identities: Vec::new(),
            max_body_bytes: runtime.max_body_bytes,
            request_timeout_seconds: runtime.request_timeout_seconds,
            log_dir: None,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var(CONFIG_ENV).unwrap_or_else(|_| "./config.toml".to_string());
        Self::load_from(&path).await
    }

    pub async fn load_from(path: &str) -> Result<Self> {
        let file_path = Path::new(path);
        let base_dir = file_path.parent();
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            Self::from_toml(&content)?
        } else {
            warn!("config file {} not found, using defaults", path);
            AppConfig::default()
        };
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|err| anyhow!("invalid config: {}", err))
    }

    pub fn normalize(&mut self) {
        self.data_path = normalize_optional(self.data_path.take());
        self.catalog_url = normalize_optional(self.catalog_url.take())
            .map(|url| url.trim_end_matches('/').to_string());
        self.catalog_token = normalize_optional(self.catalog_token.take());
        self.catalog_fixture_path = normalize_optional(self.catalog_fixture_path.take());
        self.log_dir = normalize_optional(self.log_dir.take());
        self.home_region = self.home_region.trim().to_string();
        self.catalog_location = self.catalog_location.trim().to_string();
        self.catalog_within = self.catalog_within.trim().to_string();
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.data_path = self.data_path.as_deref().map(|path| resolve_path(base, path));
        self.catalog_fixture_path = self
            .catalog_fixture_path
            .as_deref()
            .map(|path| resolve_path(base, path));
        self.log_dir = self.log_dir.as_deref().map(|path| resolve_path(base, path));
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if self.home_region.is_empty() {
            return Err(anyhow!("home_region must not be empty"));
        }
        if self.catalog_location.is_empty() {
            return Err(anyhow!("catalog_location must not be empty"));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        if let Some(url) = &self.catalog_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(anyhow!("catalog_url must be an http(s) url"));
            }
        }
        validate_identities(&self.identities)
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            home_region: self.home_region.clone(),
            catalog_location: self.catalog_location.clone(),
            catalog_within: self.catalog_within.clone(),
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("GATHERLY_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("GATHERLY_DATA_PATH") {
            self.data_path = Some(value);
        }
        if let Ok(value) = env::var("GATHERLY_HOME_REGION") {
            self.home_region = value;
        }
        if let Ok(value) = env::var("GATHERLY_CATALOG_URL") {
            self.catalog_url = Some(value);
        }
        if let Ok(value) = env::var("GATHERLY_CATALOG_TOKEN") {
            self.catalog_token = Some(value);
        }
        if let Ok(value) = env::var("GATHERLY_CATALOG_LOCATION") {
            self.catalog_location = value;
        }
        if let Ok(value) = env::var("GATHERLY_CATALOG_WITHIN") {
            self.catalog_within = value;
        }
        if let Ok(value) = env::var("GATHERLY_CATALOG_FIXTURE_PATH") {
            self.catalog_fixture_path = Some(value);
        }
        if let Ok(value) = env::var("GATHERLY_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Ok(value) = env::var("GATHERLY_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Ok(value) = env::var("GATHERLY_LOG_DIR") {
            self.log_dir = Some(value);
        }
    }
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
