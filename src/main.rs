//! Credence HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use credence::config::Config;
use credence::gateway::{HandlerState, create_router_with_state};
use credence::providers::{GenaiModel, GoogleSearchClient, HttpPageFetcher, RedditMentionsClient};
use credence::ratelimit::TokenBucket;
use credence::sources::ReliabilityDataset;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check().await);
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        model = %config.llm_model,
        "Credence starting"
    );

    let dataset = ReliabilityDataset::load(&config.dataset_paths)?;
    if dataset.is_empty() {
        tracing::warn!("Reliability dataset is empty; every source will score as reliable");
    }

    if !config.search_configured() {
        tracing::warn!(
            "No CREDENCE_SEARCH_API_KEY / CREDENCE_SEARCH_ENGINE_ID configured, evidence search disabled"
        );
    }
    let search = GoogleSearchClient::new(
        config.search_api_key.clone(),
        config.search_engine_id.clone(),
        config.search_timeout,
    )?;
    let fetcher = HttpPageFetcher::new(config.fetch_timeout)?;
    let model = GenaiModel::new(config.llm_model.clone(), config.llm_timeout);
    let social = RedditMentionsClient::new(config.fetch_timeout)?;
    let limiter = TokenBucket::new(config.rate_limit_burst, config.rate_limit_interval);

    let state = HandlerState::new(
        dataset,
        Arc::new(fetcher),
        Arc::new(search),
        Arc::new(model),
        Arc::new(social),
        limiter,
    )
    .with_cors_origins(config.cors_origins.clone());

    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Credence shutdown complete");
    Ok(())
}

async fn run_health_check() -> i32 {
    let port = std::env::var("CREDENCE_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let Ok(client) = reqwest::Client::builder()
        .timeout(Duration::from_secs(1))
        .build()
    else {
        return 1;
    };

    match client.get(&url).send().await {
        Ok(res) if res.status().is_success() => 0,
        _ => 1,
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
