//! # JobPilot API
//!
//! HTTP gateway in front of the automation flows. One browser-backed
//! invocation per request: launch Chrome, restore the saved session, run the
//! flow, shut Chrome down, answer with `{status, message}`.

mod automation;
mod handlers;
mod routes;
mod server;
mod state;

pub use automation::{ApiError, Automation, BrowserAutomation};
pub use handlers::{ApplyRequest, ApplyResponse, SearchParams};
pub use routes::create_router;
pub use server::{GatewayConfig, GatewayServer};
pub use state::AppState;
