//! HTTP route definitions.
//!
//! ```text
//! POST /apply   - Submit one application  {url, message?}
//! GET  /search  - Search vacancies        ?text=&page=
//! GET  /health  - Liveness check
//! ```

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{apply, health, search};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/apply", post(apply))
        .route("/search", get(search))
        .route("/health", get(health))
        .with_state(state)
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
