pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::gemini::GeminiClient;
pub use adapters::http::{build_router, serve, AppState};
pub use config::GatewayConfig;
pub use crate::core::solver::SolveEngine;
pub use utils::error::{GatewayError, Result};
