mod common;

use axum::body::Body;
use axum::http::Request;
use common::{app_with, app_with_model, get, send, ScriptedModel};
use math_gateway::GatewayConfig;
use tower::ServiceExt;

#[tokio::test]
async fn test_health_reports_configuration() {
    let model = ScriptedModel::new(vec![]);
    let (status, json) = send(app_with_model(Some(model)), get("/health")).await;

    assert_eq!(status, 200);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "math-gateway");
    assert!(json["uptime"].is_f64());
    assert_eq!(json["configuration"]["aiConfigured"], true);
    assert_eq!(json["configuration"]["corsAllowAll"], false);
    assert_eq!(json["configuration"]["environment"], "development");
    assert!(json.get("memory").is_none());
}

#[tokio::test]
async fn test_health_without_model() {
    let (_, json) = send(app_with_model(None), get("/health")).await;
    assert_eq!(json["configuration"]["aiConfigured"], false);
}

#[tokio::test]
async fn test_operations_and_examples_are_static_lists() {
    let (status, json) = send(app_with_model(None), get("/operations")).await;
    assert_eq!(status, 200);
    let operations = json["operations"].as_array().unwrap();
    assert!(operations.iter().any(|op| op["name"] == "derivative"));

    let (status, json) = send(app_with_model(None), get("/examples")).await;
    assert_eq!(status, 200);
    let examples = json["examples"].as_array().unwrap();
    assert!(!examples.is_empty());
    assert!(examples[0]["expectedOperation"].is_string());
    assert!(examples[0]["expectedResult"].is_string());
}

#[tokio::test]
async fn test_root_documents_endpoints() {
    let (status, json) = send(app_with_model(None), get("/")).await;

    assert_eq!(status, 200);
    assert_eq!(json["name"], "math-gateway");
    let endpoints = json["endpoints"].as_array().unwrap();
    assert!(endpoints.iter().any(|e| e["path"] == "/solve"));
}

#[tokio::test]
async fn test_unknown_route_is_404_with_endpoint_list() {
    let (status, json) = send(app_with_model(None), get("/nope")).await;

    assert_eq!(status, 404);
    assert_eq!(json["success"], false);
    assert_eq!(json["path"], "/nope");
    let endpoints = json["availableEndpoints"].as_array().unwrap();
    assert!(endpoints.iter().any(|e| e == "POST /solve"));
}

#[tokio::test]
async fn test_wrong_method_is_404() {
    let (status, json) = send(app_with_model(None), get("/solve")).await;

    assert_eq!(status, 404);
    assert_eq!(json["error"], "Endpoint not found");
}

#[tokio::test]
async fn test_cors_allows_listed_origin_only() {
    let config = GatewayConfig {
        allowed_origins: vec!["https://app.example.com".to_string()],
        ..Default::default()
    };

    let request = Request::builder()
        .uri("/health")
        .header("origin", "https://app.example.com")
        .body(Body::empty())
        .unwrap();
    let response = app_with(config.clone(), None).oneshot(request).await.unwrap();
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "https://app.example.com"
    );

    let request = Request::builder()
        .uri("/health")
        .header("origin", "https://evil.example.com")
        .body(Body::empty())
        .unwrap();
    let response = app_with(config, None).oneshot(request).await.unwrap();
    assert!(response.headers().get("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn test_cors_allow_all_and_preflight() {
    let config = GatewayConfig {
        cors_allow_all: true,
        ..Default::default()
    };

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/solve")
        .header("origin", "https://anywhere.example.com")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();
    let response = app_with(config, None).oneshot(request).await.unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}
