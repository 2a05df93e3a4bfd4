use super::file::FileConfig;
use super::GatewayConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

/// Command-line flags; each one can also come from the environment.
/// Unset options fall through to the TOML file and then to built-in defaults.
#[derive(Debug, Clone, Parser)]
#[command(name = "math-gateway")]
#[command(about = "HTTP gateway that solves natural-language math problems with a generative model")]
pub struct CliConfig {
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, env = "GEMINI_MODEL")]
    pub model: Option<String>,

    #[arg(long, env = "GEMINI_API_BASE_URL")]
    pub api_base_url: Option<String>,

    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    #[arg(long, env = "ALLOWED_ORIGINS", value_delimiter = ',')]
    pub allowed_origins: Option<Vec<String>>,

    #[arg(long, env = "CORS_ALLOW_ALL", num_args = 0..=1, default_missing_value = "true")]
    pub cors_allow_all: Option<bool>,

    #[arg(long, env = "REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: Option<u64>,

    #[arg(long, env = "APP_ENV")]
    pub environment: Option<String>,

    #[arg(long, env = "MATH_GATEWAY_CONFIG", help = "Path to an optional TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, env = "LOG_JSON", help = "Emit JSON log lines")]
    pub json_logs: bool,
}

impl CliConfig {
    /// Defaults, then the config file (if any), then flags and environment.
    pub fn resolve(&self) -> Result<GatewayConfig> {
        let mut config = GatewayConfig::default();

        if let Some(path) = &self.config {
            tracing::debug!("Loading config file {}", path.display());
            config.merge_file(FileConfig::from_file(path)?);
        }

        if let Some(key) = &self.api_key {
            config.api_key = Some(key.clone());
        }
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(url) = &self.api_base_url {
            config.api_base_url = url.clone();
        }
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(origins) = &self.allowed_origins {
            config.allowed_origins = origins
                .iter()
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
        }
        if let Some(allow_all) = self.cors_allow_all {
            config.cors_allow_all = allow_all;
        }
        if let Some(timeout) = self.request_timeout_secs {
            config.request_timeout_secs = timeout;
        }
        if let Some(environment) = &self.environment {
            config.environment = environment.clone();
        }

        Ok(config)
    }
}
