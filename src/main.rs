// manga-colorizer - Gemini relay for colorizing black-and-white manga pages
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use manga_colorizer::cli::{run_colorize, Args, Command};
use manga_colorizer::config::AppConfig;
use manga_colorizer::gemini::GeminiClient;
use manga_colorizer::server::create_router;
use manga_colorizer::utils::logging;
use std::net::SocketAddr;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration (.env first, as deployments rely on it)
    dotenv::dotenv().ok();
    let mut config = AppConfig::load(args.config.as_deref())?;

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;

    match args.command {
        Some(Command::Colorize(colorize)) => {
            let written = run_colorize(&colorize).await?;
            println!("{}", written.display());
            Ok(())
        }
        Some(Command::Serve(serve)) => {
            serve.apply(&mut config);
            serve_relay(config).await
        }
        None => serve_relay(config).await,
    }
}

async fn serve_relay(config: AppConfig) -> Result<()> {
    info!("Starting manga-colorizer v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Build the upstream client
    let gemini_client = GeminiClient::new(&config.gemini)?;
    info!("Relaying to {}", gemini_client.endpoint());

    // Phase 4: Build and start HTTP server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = create_router(config, gemini_client)?;

    info!("Manga Colorizer server running on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 5: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
