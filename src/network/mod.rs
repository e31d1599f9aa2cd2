//! Network Module
//!
//! HTTP serving for the REST API.
//!
//! ## Architecture
//! - `axum` app with a single fallback handler, so every path and method
//!   reaches `RequestRouter` and gets its exact status code
//! - Store work runs on tokio's blocking pool
//! - `Server` binds a listener and serves until a shutdown future resolves

mod app;
mod server;

pub use app::{create_app, AppState};
pub use server::{build_runtime, shutdown_signal, Server};
