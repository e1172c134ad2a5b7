//! # JobPilot Browser
//!
//! Chrome automation over CDP (Chrome DevTools Protocol) for the JobPilot
//! engine: a WebSocket CDP client, a per-page session, a headless Chrome
//! launcher, the saved-session (cookie) store, and the
//! [`PageDriver`](jobpilot_engine::PageDriver) implementation binding it all
//! to the engine flows.

mod client;
mod driver;
mod error;
mod launcher;
mod protocol;
mod session;
mod store;

pub use client::CdpClient;
pub use driver::CdpPage;
pub use error::{BrowserError, CdpError};
pub use launcher::{Browser, LaunchConfig};
pub use protocol::{Cookie, StorageState};
pub use session::PageSession;
pub use store::{SessionStore, StoreError};
