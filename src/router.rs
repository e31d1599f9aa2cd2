//! Request Router
//!
//! Classifies (method, path, body) into a repository call and turns the
//! outcome into a response. Synchronous: store I/O blocks, so async callers
//! run it on a blocking thread.
//!
//! ## Routes
//! ```text
//! /squirrels          collection
//! /squirrels/{id}     item; {id} must match ^-?[0-9]+$ and be > 0
//! anything else       unrecognized (404)
//! ```
//!
//! ## Outcomes
//! | Method | Route      | Result                                   |
//! |--------|------------|------------------------------------------|
//! | GET    | collection | 200 JSON array                           |
//! | GET    | item       | 200 JSON object / 404                    |
//! | POST   | collection | 201 JSON object / 400                    |
//! | PUT    | item       | 204 / 400 / 404                          |
//! | DELETE | item       | 204 / 404                                |
//! | other  | any        | 404                                      |

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::{Result, SquirrelError};
use crate::model::{SquirrelForm, SquirrelId};
use crate::repository::SquirrelRepository;

/// The only resource served
pub const RESOURCE: &str = "squirrels";

/// Where a request path points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/squirrels`
    Collection,

    /// `/squirrels/{id}` with a usable (positive) id
    Item(SquirrelId),

    /// `/squirrels/{id}` where `{id}` is non-numeric, empty, or not positive
    InvalidItem,

    /// Any other path
    Unrecognized,
}

impl Route {
    /// Classify a request path (query string already removed)
    ///
    /// The path is matched as sent; percent-escapes are not decoded.
    pub fn parse(path: &str) -> Self {
        let Some(rest) = path.strip_prefix('/') else {
            return Route::Unrecognized;
        };

        let segments: Vec<&str> = rest.split('/').collect();
        match segments.as_slice() {
            [resource] if *resource == RESOURCE => Route::Collection,
            [resource, id] if *resource == RESOURCE => parse_id(id)
                .map(Route::Item)
                .unwrap_or(Route::InvalidItem),
            _ => Route::Unrecognized,
        }
    }
}

/// Parse an id segment: `^-?[0-9]+$`, then require it to be > 0
fn parse_id(segment: &str) -> Option<SquirrelId> {
    let digits = segment.strip_prefix('-').unwrap_or(segment);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // Negative, zero, and out-of-range ids never name a squirrel
    match segment.parse::<i64>() {
        Ok(id) if id > 0 => Some(id as SquirrelId),
        _ => None,
    }
}

/// Dispatches requests to the repository
pub struct RequestRouter {
    repository: Arc<SquirrelRepository>,
}

impl RequestRouter {
    pub fn new(repository: Arc<SquirrelRepository>) -> Self {
        Self { repository }
    }

    /// Handle a request
    ///
    /// Never fails: errors become their status code and are logged by
    /// `SquirrelError::into_response`.
    pub fn handle(&self, method: &Method, path: &str, body: &[u8]) -> Response {
        let route = Route::parse(path);

        let response = match self.dispatch(method, route, body) {
            Ok(response) => response,
            Err(e) => e.into_response(),
        };

        tracing::debug!("{} {} -> {}", method, path, response.status().as_u16());
        response
    }

    fn dispatch(&self, method: &Method, route: Route, body: &[u8]) -> Result<Response> {
        match (method, route) {
            (&Method::GET, Route::Collection) => {
                let squirrels = self.repository.list_all()?;
                Ok(Json(squirrels).into_response())
            }
            (&Method::GET, Route::Item(id)) => {
                let squirrel = self.repository.get_by_id(id)?;
                Ok(Json(squirrel).into_response())
            }
            (&Method::POST, Route::Collection) => {
                let form = squirrel_form(body)?;
                let squirrel = self.repository.create(form)?;
                Ok((StatusCode::CREATED, Json(squirrel)).into_response())
            }
            (&Method::PUT, Route::Item(id)) => {
                let form = squirrel_form(body)?;
                self.repository.update(id, form)?;
                Ok(StatusCode::NO_CONTENT.into_response())
            }
            (&Method::DELETE, Route::Item(id)) => {
                self.repository.delete_by_id(id)?;
                Ok(StatusCode::NO_CONTENT.into_response())
            }
            _ => Err(SquirrelError::NotFound),
        }
    }
}

/// Decode `name` and `size` from a form-urlencoded body
///
/// Unknown keys are ignored; a repeated field is a validation failure.
fn squirrel_form(body: &[u8]) -> Result<SquirrelForm> {
    serde_urlencoded::from_bytes(body)
        .map_err(|e| SquirrelError::Validation(format!("undecodable form body: {}", e)))
}
