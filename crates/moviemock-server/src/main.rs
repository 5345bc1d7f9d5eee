use anyhow::Context;
use clap::{ArgAction, Parser};
use moviemock_core::config::parser::load_config;
use moviemock_core::mocks::Upstream;
use moviemock_core::{MockService, MockSettings, MovieStore};
use moviemock_server::logging::init_logging;
use moviemock_server::{create_app, AppState, ReqwestUpstream};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "moviemock")]
#[command(about = "Mock backend for the movie catalogue, reviews and streaming APIs")]
#[command(version)]
struct Cli {
    /// Settings file (YAML, JSON or JSONC)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Glob pattern of movie fixture files; bundled fixtures when omitted
    #[arg(short, long, value_name = "PATTERN")]
    fixtures: Option<String>,

    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:9090")]
    addr: SocketAddr,

    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet)?;

    let settings: MockSettings = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => MockSettings::default(),
    };

    let store = match &cli.fixtures {
        Some(pattern) => MovieStore::from_fixture_files(pattern)
            .with_context(|| format!("Failed to load fixtures from {pattern}"))?,
        None => MovieStore::with_default_fixtures().context("Failed to load bundled fixtures")?,
    };

    let upstream = Arc::new(ReqwestUpstream::new(
        settings.upstream_url.clone(),
        settings.routes.featured.clone(),
    ));
    let service = MockService::new(store, settings)
        .with_upstream(upstream.clone() as Arc<dyn Upstream>);
    let app = create_app(AppState::new(service).with_forwarder(upstream));

    let listener = tokio::net::TcpListener::bind(cli.addr)
        .await
        .with_context(|| format!("Failed to bind {}", cli.addr))?;
    tracing::info!(addr = %cli.addr, "moviemock listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("moviemock stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
