use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use leave_engine::api::{AppState, create_router};
use leave_engine::config::ConfigLoader;

/// Annual leave balance service.
#[derive(Debug, Parser)]
#[command(name = "leave-engine", version, about)]
struct Args {
    /// Directory holding policy.yaml and accrual.yaml
    #[arg(long, env = "LEAVE_ENGINE_CONFIG", default_value = "./config/kr_annual_leave")]
    config: PathBuf,

    /// Address to listen on
    #[arg(long, env = "LEAVE_ENGINE_BIND", default_value = "0.0.0.0:8080")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args = Args::parse();

    let config = ConfigLoader::load(&args.config)?;
    info!(
        code = %config.metadata().code,
        version = %config.metadata().version,
        config = %args.config.display(),
        "Leave policy loaded"
    );

    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    info!(bind = %args.bind, "Leave engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}
