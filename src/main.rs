use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use worktime_engine::api::{API_PREFIX, AppState, create_router};
use worktime_engine::config::ConfigLoader;

#[derive(Parser, Debug)]
#[command(name = "worktime-engine", version, about = "Monthly work-hour statistics service")]
struct Cli {
    /// Directory holding workhours.yaml, leave_labels.yaml and holidays/
    #[arg(long = "config-dir", default_value = "./config")]
    config_dir: PathBuf,

    /// Address to listen on
    #[arg(long = "bind", default_value = "127.0.0.1:8080")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let loader = ConfigLoader::load(&cli.config_dir)?;
    let router = create_router(AppState::from_loader(&loader));

    let listener = tokio::net::TcpListener::bind(cli.bind).await?;
    info!(address = %cli.bind, prefix = API_PREFIX, "Worktime engine listening");
    axum::serve(listener, router).await?;

    Ok(())
}
