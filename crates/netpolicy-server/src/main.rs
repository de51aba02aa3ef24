//! netpolicy server
//!
//! - Rule CRUD: GET /rules, POST /rules/add, POST /rules/delete
//! - Dataplane polling: GET /whitelists?groups=a,b
//! - Liveness: GET /healthz
//!
//! State is volatile and rebuilt from zero on every start.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use netpolicy_core::error::{NetPolicyError, Result};
use netpolicy_server::{app_state, config, router};

#[derive(Parser)]
#[command(name = "netpolicy-server")]
#[command(about = "In-memory network policy server")]
#[command(version)]
struct Args {
    /// Path to the YAML config file
    #[arg(long, default_value = "netpolicy.yaml")]
    config: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, code = e.client_code().as_str(), "terminated");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let cfg = config::load_from_file(&args.config)?;
    let listen = cfg.server.listen_addr()?;

    let state = app_state::AppState::new(&cfg)?;
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| NetPolicyError::Internal(format!("bind {listen} failed: {e}")))?;
    tracing::info!(%listen, "netpolicy-server starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| NetPolicyError::Internal(format!("server failed: {e}")))?;

    tracing::info!("netpolicy-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for interrupt; running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("interrupt received, draining");
}
