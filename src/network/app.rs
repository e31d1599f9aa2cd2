//! Application
//!
//! Wires `RequestRouter` into an `axum::Router`.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower_http::timeout::TimeoutLayer;

use crate::config::Config;
use crate::error::SquirrelError;
use crate::repository::SquirrelRepository;
use crate::router::RequestRouter;

/// State shared across requests
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<RequestRouter>,

    /// Largest request body accepted (bytes)
    pub max_body_size: usize,
}

/// Build the HTTP application for a repository
pub fn create_app(repository: Arc<SquirrelRepository>, config: &Config) -> Router {
    let state = AppState {
        router: Arc::new(RequestRouter::new(repository)),
        max_body_size: config.max_body_size,
    };

    let app: Router = Router::new().fallback(handle_request).with_state(state);

    if config.request_timeout_ms > 0 {
        app.layer(TimeoutLayer::new(Duration::from_millis(
            config.request_timeout_ms,
        )))
    } else {
        app
    }
}

/// Every request lands here; routing happens in `RequestRouter`
async fn handle_request(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Body,
) -> Response {
    let body = match to_bytes(body, state.max_body_size).await {
        Ok(body) => body,
        Err(e) => {
            return SquirrelError::Protocol(format!("unreadable request body: {}", e))
                .into_response()
        }
    };

    let router = Arc::clone(&state.router);
    let path = uri.path().to_string();
    let result =
        tokio::task::spawn_blocking(move || router.handle(&method, &path, &body)).await;

    match result {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("Request handler panicked: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
