//! Shared gateway state.

use std::sync::Arc;

use crate::automation::Automation;

/// State shared by every request handler.
pub struct AppState {
    pub automation: Arc<dyn Automation>,
}

impl AppState {
    pub fn new(automation: Arc<dyn Automation>) -> Self {
        Self { automation }
    }
}
