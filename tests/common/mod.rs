#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use math_gateway::core::LanguageModel;
use math_gateway::utils::monitor::ProcessMonitor;
use math_gateway::{build_router, AppState, GatewayConfig, GatewayError, Result};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceExt; // for oneshot

/// Fake model that replays queued replies and records every prompt.
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn new(replies: Vec<Result<String>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub async fn calls(&self) -> usize {
        self.prompts.lock().await.len()
    }
}

#[async_trait::async_trait]
impl LanguageModel for ScriptedModel {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().await.push(prompt.to_string());
        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::EmptyCompletionError))
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}

pub fn upstream_error(message: &str) -> GatewayError {
    GatewayError::UpstreamStatusError {
        status: 503,
        message: message.to_string(),
    }
}

pub fn app_with_model(model: Option<Arc<dyn LanguageModel>>) -> axum::Router {
    app_with(GatewayConfig::default(), model)
}

pub fn app_with(config: GatewayConfig, model: Option<Arc<dyn LanguageModel>>) -> axum::Router {
    let state = AppState::new(config, model, ProcessMonitor::new(false));
    build_router(Arc::new(state))
}

pub fn post_json(path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(path: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

pub async fn send(app: axum::Router, request: Request<Body>) -> (u16, serde_json::Value) {
    let response: Response<Body> = app.oneshot(request).await.unwrap();
    let status = response.status().as_u16();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
