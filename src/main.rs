use clap::Parser;
use math_gateway::utils::error::ErrorSeverity;
use math_gateway::utils::monitor::ProcessMonitor;
use math_gateway::utils::{logger, validation::Validate};
use math_gateway::{AppState, CliConfig, GatewayError};

fn exit_code(e: &GatewayError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn report(stage: &str, e: &GatewayError) {
    tracing::error!(
        "❌ {}: {} (Category: {:?}, Severity: {:?})",
        stage,
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_logger(cli.verbose, cli.json_logs);
    tracing::info!("Starting math-gateway {}", env!("CARGO_PKG_VERSION"));

    let config = match cli.resolve().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            report("Configuration failed", &e);
            std::process::exit(exit_code(&e).max(1));
        }
    };
    tracing::debug!("Resolved config: {:?}", config);

    let state = match AppState::from_config(config, ProcessMonitor::new(true)) {
        Ok(state) => state,
        Err(e) => {
            report("Startup failed", &e);
            std::process::exit(exit_code(&e).max(1));
        }
    };

    if let Err(e) = math_gateway::serve(state).await {
        report("Server error", &e);
        return Err(e.into());
    }

    Ok(())
}
