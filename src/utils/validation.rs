use crate::utils::error::{GatewayError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(GatewayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(GatewayError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(GatewayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// CORS origins are bare `scheme://host[:port]` values; `*` is accepted as
/// the allow-all marker.
pub fn validate_origins(field_name: &str, origins: &[String]) -> Result<()> {
    for origin in origins {
        if origin == "*" {
            continue;
        }
        validate_url(field_name, origin)?;
        if origin.ends_with('/') {
            return Err(GatewayError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: origin.clone(),
                reason: "Origin must not contain a path or trailing slash".to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GatewayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(GatewayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Checks the `problem` member of a solve request body and returns it trimmed.
pub fn validate_problem(value: Option<&serde_json::Value>) -> Result<String> {
    let Some(value) = value else {
        return Err(GatewayError::validation(
            "Problem is required. Send a JSON body like {\"problem\": \"2 + 2\"}",
        ));
    };

    let Some(text) = value.as_str() else {
        return Err(GatewayError::validation("Problem must be a string"));
    };

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(GatewayError::validation("Problem cannot be empty"));
    }

    Ok(trimmed.to_string())
}
