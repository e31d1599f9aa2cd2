//! Squirrels Server Binary
//!
//! Starts the HTTP server for the squirrels API.

use std::sync::Arc;

use clap::Parser;
use squirrels::network::{build_runtime, Server};
use squirrels::{Config, SquirrelRepository};
use tracing_subscriber::{fmt, EnvFilter};

/// Squirrels Server
#[derive(Parser, Debug)]
#[command(name = "squirrels-server")]
#[command(about = "REST API server for squirrel records")]
#[command(version)]
struct Args {
    /// Database file (created if missing)
    #[arg(short, long, default_value = "squirrel_db.db")]
    db_path: String,

    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    listen: String,

    /// Runtime worker threads
    #[arg(short, long, default_value = "4")]
    workers: usize,

    /// Empty the database before serving
    #[arg(long)]
    reset: bool,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,squirrels=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("Squirrels Server v{}", squirrels::VERSION);
    tracing::info!("Database file: {}", args.db_path);
    tracing::info!("Listen address: {}", args.listen);

    // Build config from args
    let config = Config::builder()
        .db_path(&args.db_path)
        .listen_addr(&args.listen)
        .worker_threads(args.workers)
        .build();

    // Open repository
    let repository = match SquirrelRepository::open(&config.db_path) {
        Ok(r) => Arc::new(r),
        Err(e) => {
            tracing::error!("Failed to open database: {}", e);
            std::process::exit(1);
        }
    };

    if args.reset {
        if let Err(e) = repository.reset() {
            tracing::error!("Failed to reset database: {}", e);
            std::process::exit(1);
        }
        tracing::info!("Database reset to empty");
    }

    let runtime = match build_runtime(&config) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Failed to start runtime: {}", e);
            std::process::exit(1);
        }
    };

    let result: squirrels::Result<()> = runtime.block_on(async {
        let server = Server::bind(&config, repository).await?;
        server.run().await
    });

    if let Err(e) = result {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
