//! HTTP Server
//!
//! Binds the listener and serves the app until shutdown.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::error::{Result, SquirrelError};
use crate::repository::SquirrelRepository;

use super::create_app;

/// HTTP server for the squirrels API
///
/// ## Lifecycle:
/// - `bind()` claims the listen address (port 0 picks a free port)
/// - `run()` serves until SIGINT/SIGTERM, `run_until()` until a given future
///   resolves; in-flight requests finish before either returns
pub struct Server {
    listener: TcpListener,
    app: axum::Router,
}

impl Server {
    /// Bind the listen address
    pub async fn bind(config: &Config, repository: Arc<SquirrelRepository>) -> Result<Self> {
        let listener = TcpListener::bind(config.listen_addr.as_str()).await?;

        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self {
            listener,
            app: create_app(repository, config),
        })
    }

    /// Address actually bound (useful with port 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until the process receives SIGINT or SIGTERM
    pub async fn run(self) -> Result<()> {
        self.run_until(async {
            let signal = shutdown_signal().await;
            tracing::info!("Received {}, shutting down", signal);
        })
        .await
    }

    /// Serve until `shutdown` resolves
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

/// Resolves with the signal name on SIGINT (Ctrl+C) or SIGTERM
pub async fn shutdown_signal() -> &'static str {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => "SIGINT",
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending().await
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                "SIGTERM"
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<&'static str>();

    tokio::select! {
        signal = ctrl_c => signal,
        signal = terminate => signal,
    }
}

/// Multi-threaded runtime with `worker_threads` workers
pub fn build_runtime(config: &Config) -> Result<Runtime> {
    if config.worker_threads == 0 {
        return Err(SquirrelError::Config(
            "worker_threads must be at least 1".to_string(),
        ));
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.worker_threads)
        .thread_name("squirrels-worker")
        .enable_all()
        .build()?;

    Ok(runtime)
}
