use super::responses::{error_response, millis, outcome_response, timestamp};
use super::AppState;
use crate::core::catalog::{endpoint_paths, ENDPOINTS, EXAMPLES, OPERATIONS};
use crate::utils::error::GatewayError;
use crate::utils::validation::validate_problem;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;

/// POST /solve
pub async fn solve(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let started = Instant::now();

    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::debug!("Rejected solve body: {}", rejection.body_text());
            return error_response(&GatewayError::validation(format!(
                "Request body must be JSON: {}",
                rejection.body_text()
            )));
        }
    };

    let problem = match validate_problem(body.get("problem")) {
        Ok(problem) => problem,
        Err(e) => {
            tracing::debug!("Rejected solve request: {}", e);
            return error_response(&e);
        }
    };

    let Some(engine) = state.engine.as_ref() else {
        tracing::error!("❌ Solve requested but no AI client is configured");
        return error_response(&GatewayError::UpstreamUnavailable {
            message: "GEMINI_API_KEY is not set".to_string(),
        });
    };

    tracing::info!("Solving problem ({} chars)", problem.chars().count());
    let outcome = engine.solve(&problem).await;
    let elapsed = started.elapsed();
    tracing::info!(
        outcome = ?outcome.kind(),
        elapsed_ms = millis(elapsed),
        "Solve finished"
    );

    outcome_response(outcome, elapsed)
}

/// GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    let config = &state.config;
    let mut body = json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "uptime": state.monitor.uptime().as_secs_f64(),
        "timestamp": timestamp(),
        "configuration": {
            "aiConfigured": state.engine.is_some(),
            "model": config.model,
            "corsAllowAll": config.allows_any_origin(),
            "allowedOrigins": config.allowed_origins,
            "environment": config.environment,
        },
    });

    if let Some(memory) = state.monitor.memory_stats() {
        body["memory"] = json!(memory);
    }

    Json(body)
}

/// GET /operations
pub async fn operations() -> Json<Value> {
    Json(json!({
        "success": true,
        "operations": OPERATIONS,
        "note": "Problems are answered by a generative model; any phrasing is accepted.",
    }))
}

/// GET /examples
pub async fn examples() -> Json<Value> {
    Json(json!({
        "success": true,
        "examples": EXAMPLES,
    }))
}

/// GET /
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Solves natural-language math problems with a generative model and returns structured JSON",
        "endpoints": ENDPOINTS,
        "usage": {
            "request": {
                "method": "POST",
                "path": "/solve",
                "body": { "problem": "What is the derivative of x^2?" },
            },
            "response": {
                "success": true,
                "originalProblem": "What is the derivative of x^2?",
                "analysis": { "operation": "derivative", "expression": "x^2", "context": "structured" },
                "calculation": {
                    "method": "ai_structured",
                    "result": "2x",
                    "operation": "derivative",
                    "steps": "1. Apply the power rule",
                    "confidence": "high",
                },
                "explanation": "...",
            },
        },
    }))
}

/// Anything that did not match a route, including a known path with the wrong method.
pub async fn not_found(uri: Uri) -> impl IntoResponse {
    tracing::debug!("No route for {}", uri.path());
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": "Endpoint not found",
            "path": uri.path(),
            "availableEndpoints": endpoint_paths(),
        })),
    )
}
