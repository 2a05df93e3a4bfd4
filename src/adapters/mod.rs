// Adapters layer: concrete implementations for external systems (model API, HTTP server).

pub mod gemini;
pub mod http;
