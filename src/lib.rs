//! # Squirrels
//!
//! A small REST API server for squirrel records with:
//! - A flat-file store that rewrites the whole collection on every change
//! - Checksummed store files with corruption detection
//! - A strict routing/validation state machine
//! - An `axum` HTTP server on a multi-threaded tokio runtime
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     HTTP Server                              │
//! │          (axum fallback handler, tokio runtime)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  method, path, body (blocking pool)
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   Request Router                             │
//! │           (route → validate → status code)                   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                SquirrelRepository                            │
//! │          (id assignment, write lock)                         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                ┌──────▼──────┐
//!                │FlatFileStore│
//!                │ (one file)  │
//!                └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod store;
pub mod model;
pub mod repository;
pub mod router;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{SquirrelError, Result};
pub use config::Config;
pub use model::{Squirrel, SquirrelForm, SquirrelId};
pub use repository::SquirrelRepository;
pub use router::{RequestRouter, Route};
pub use store::FlatFileStore;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of Squirrels
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
