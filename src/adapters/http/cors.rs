use crate::config::GatewayConfig;
use axum::http::{header, HeaderValue, Method};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(600);

/// Build the CORS layer. Any origin is allowed only when the config asks
/// for it; otherwise the allow-list is matched exactly.
pub fn build_cors_layer(cfg: &GatewayConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
        .max_age(PREFLIGHT_MAX_AGE);

    if cfg.allows_any_origin() {
        if cfg.environment == "production" {
            tracing::warn!(
                "CORS allows any origin in production; set ALLOWED_ORIGINS to restrict it"
            );
        }
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = cfg
        .allowed_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        tracing::warn!("No CORS origins configured; cross-origin browser requests will be refused");
    }

    layer.allow_origin(origins)
}
