//! Engine error types.

use thiserror::Error;

/// Errors surfaced by a [`PageDriver`](crate::PageDriver) implementation.
#[derive(Debug, Error)]
pub enum DriverError {
    /// Navigation failed or the page never reached a usable state.
    #[error("Navigation failed: {0}")]
    Navigation(String),

    /// A required element never appeared within its timeout.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// A click or fill raised on the page.
    #[error("Interaction failed: {0}")]
    Interaction(String),

    /// A bounded wait expired.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// JavaScript evaluation failed.
    #[error("Script error: {0}")]
    Script(String),

    /// The underlying page session is gone.
    #[error("Page session closed")]
    SessionClosed,
}

/// Errors from engine flows that are not submission outcomes.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No authenticated session is available.
    #[error("no session")]
    SessionMissing,

    /// The site served its bot-protection page instead of results.
    #[error("Bot protection triggered")]
    BotProtection,

    #[error(transparent)]
    Driver(#[from] DriverError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_error_display() {
        let err = DriverError::ElementNotFound("button.apply".to_string());
        assert!(err.to_string().contains("button.apply"));
        assert!(err.to_string().contains("not found"));

        let err = DriverError::Timeout("popup".to_string());
        assert!(err.to_string().starts_with("Timeout"));
    }

    #[test]
    fn test_engine_error_from_driver() {
        let err = EngineError::from(DriverError::SessionClosed);
        assert_eq!(err.to_string(), "Page session closed");
    }

    #[test]
    fn test_session_missing_message() {
        assert_eq!(EngineError::SessionMissing.to_string(), "no session");
    }
}
