#[cfg(feature = "cli")]
pub mod cli;
pub mod file;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_origins, validate_range, validate_url, Validate,
};
use file::{is_unresolved_placeholder, FileConfig};
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &["http://localhost:3000", "http://localhost:5173"];

/// Fully resolved service configuration.
#[derive(Clone, Serialize)]
pub struct GatewayConfig {
    #[serde(skip)]
    pub api_key: Option<String>,
    pub model: String,
    pub api_base_url: String,
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub cors_allow_all: bool,
    pub request_timeout_secs: u64,
    pub environment: String,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("api_base_url", &self.api_base_url)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("allowed_origins", &self.allowed_origins)
            .field("cors_allow_all", &self.cors_allow_all)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("environment", &self.environment)
            .finish()
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            cors_allow_all: false,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            environment: "development".to_string(),
        }
    }
}

impl GatewayConfig {
    /// Layers a TOML file over the current values.
    pub fn merge_file(&mut self, file: FileConfig) {
        if let Some(server) = file.server {
            if let Some(host) = server.host {
                self.host = host;
            }
            if let Some(port) = server.port {
                self.port = port;
            }
            if let Some(environment) = server.environment {
                self.environment = environment;
            }
        }

        if let Some(model) = file.model {
            if let Some(key) = model.api_key.filter(|k| !is_unresolved_placeholder(k)) {
                self.api_key = Some(key);
            }
            if let Some(name) = model.name {
                self.model = name;
            }
            if let Some(url) = model.api_base_url {
                self.api_base_url = url;
            }
            if let Some(timeout) = model.request_timeout_secs {
                self.request_timeout_secs = timeout;
            }
        }

        if let Some(cors) = file.cors {
            if let Some(origins) = cors.allowed_origins {
                self.allowed_origins = origins;
            }
            if let Some(allow_all) = cors.allow_all {
                self.cors_allow_all = allow_all;
            }
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Allow-all is only on when asked for, either by flag or a `*` origin.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_allow_all || self.allowed_origins.iter().any(|o| o == "*")
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

impl ConfigProvider for GatewayConfig {
    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Validate for GatewayConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_base_url", &self.api_base_url)?;
        validate_non_empty_string("model", &self.model)?;
        validate_non_empty_string("host", &self.host)?;
        validate_range("port", self.port, 1, u16::MAX)?;
        validate_range("request_timeout_secs", self.request_timeout_secs, 1, 600)?;
        validate_origins("allowed_origins", &self.allowed_origins)?;

        if !self.has_api_key() {
            tracing::warn!("⚠️ GEMINI_API_KEY is not set; /solve will report the AI service as unavailable");
        }

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}
