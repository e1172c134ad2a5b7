//! Cookie transfer between the saved session and the live page.

use serde_json::json;
use tracing::debug;

use crate::error::CdpError;
use crate::protocol::{Cookie, StorageState};

use super::core::PageSession;

impl PageSession {
    /// Inject saved cookies before the first navigation so the page loads
    /// with an authenticated context.
    pub async fn apply_storage_state(&self, state: &StorageState) -> Result<(), CdpError> {
        if state.cookies.is_empty() {
            return Ok(());
        }
        self.call(
            "Network.setCookies",
            Some(json!({"cookies": state.cookies})),
        )
        .await?;
        debug!("Applied {} cookies to session", state.cookies.len());
        Ok(())
    }

    /// Capture the current cookies, e.g. after an interactive login.
    pub async fn capture_storage_state(&self) -> Result<StorageState, CdpError> {
        let result = self.call("Network.getCookies", None).await?;
        let cookies: Vec<Cookie> = serde_json::from_value(result["cookies"].clone())?;
        debug!("Captured {} cookies from session", cookies.len());
        Ok(StorageState { cookies })
    }
}
