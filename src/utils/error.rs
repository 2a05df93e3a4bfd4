use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("AI service unavailable: {message}")]
    UpstreamUnavailable { message: String },

    #[error("AI request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("AI service returned HTTP {status}: {message}")]
    UpstreamStatusError { status: u16, message: String },

    #[error("Malformed AI response: {message}")]
    MalformedResponseError { message: String },

    #[error("AI service returned an empty completion")]
    EmptyCompletionError,

    #[error("Both primary and fallback requests failed: {original} (fallback: {fallback})")]
    TerminalFailure { original: String, fallback: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Config file parse error: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Client,
    Upstream,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl GatewayError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } => ErrorCategory::Client,
            Self::UpstreamUnavailable { .. }
            | Self::ApiError(_)
            | Self::UpstreamStatusError { .. }
            | Self::MalformedResponseError { .. }
            | Self::EmptyCompletionError
            | Self::TerminalFailure { .. } => ErrorCategory::Upstream,
            Self::ConfigParseError(_)
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ValidationError { .. } => ErrorSeverity::Low,
            Self::ApiError(_)
            | Self::UpstreamStatusError { .. }
            | Self::MalformedResponseError { .. }
            | Self::EmptyCompletionError => ErrorSeverity::Medium,
            Self::UpstreamUnavailable { .. }
            | Self::TerminalFailure { .. }
            | Self::ConfigParseError(_)
            | Self::InvalidConfigValueError { .. } => ErrorSeverity::High,
            Self::IoError(_) | Self::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self.category() {
            ErrorCategory::Client => 400,
            _ => 500,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ValidationError { .. } => {
                "Send a JSON body with a non-empty \"problem\" string"
            }
            Self::UpstreamUnavailable { .. } => {
                "Set GEMINI_API_KEY (or --api-key) and restart the service"
            }
            Self::ApiError(_) => "Check network connectivity to the AI service",
            Self::UpstreamStatusError { status, .. } if *status == 429 => {
                "The AI service quota is exhausted; wait and try again"
            }
            Self::UpstreamStatusError { .. } => {
                "Verify the API key and model name are accepted by the AI service"
            }
            Self::MalformedResponseError { .. } | Self::EmptyCompletionError => {
                "Try rephrasing the problem"
            }
            Self::TerminalFailure { .. } => "Check /health and the AI service status, then retry",
            Self::ConfigParseError(_) => "Fix the syntax of the TOML configuration file",
            Self::InvalidConfigValueError { .. } => {
                "Review the command-line flags and environment variables"
            }
            Self::IoError(_) => "Check file permissions and that the port is free",
            Self::SerializationError(_) => "Report this as a bug",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { message } => message.clone(),
            Self::UpstreamUnavailable { .. } => "AI service is not configured".to_string(),
            Self::TerminalFailure { .. } => {
                "The AI service could not solve this problem right now".to_string()
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid configuration for {}: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
