//! Configuration schema.
//!
//! Every knob the flows consume is explicit here and passed into
//! constructors; nothing reads the process environment at runtime.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub browser: BrowserConfig,
    pub session: SessionConfig,
    pub search: SearchConfig,
    pub timings: TimingsConfig,
    pub diagnostics: DiagnosticsConfig,
}

/// HTTP gateway binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Chrome launch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub debug_port: u16,
    pub headless: bool,
    pub profile_dir: Option<PathBuf>,
    pub chrome_path: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            debug_port: 9222,
            headless: true,
            profile_dir: None,
            chrome_path: None,
        }
    }
}

/// Where the captured login session lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub file: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            file: "~/.jobpilot/hh_session.json".to_string(),
        }
    }
}

/// Vacancy search defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub base_url: String,
    /// Region code the site expects in the `area` query parameter.
    pub area: String,
    pub items_on_page: u32,
    pub default_text: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://hh.ru".to_string(),
            area: "113".to_string(),
            items_on_page: 20,
            default_text: "Frontend".to_string(),
        }
    }
}

/// Bounded waits for the submission flow, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingsConfig {
    pub navigation_ms: u64,
    pub modal_wait_ms: u64,
    pub pre_fill_settle_ms: u64,
    pub post_submit_settle_ms: u64,
    pub dropdown_settle_ms: u64,
    pub post_click_settle_ms: u64,
}

impl Default for TimingsConfig {
    fn default() -> Self {
        Self {
            navigation_ms: 90_000,
            modal_wait_ms: 5_000,
            pre_fill_settle_ms: 1_000,
            post_submit_settle_ms: 3_000,
            dropdown_settle_ms: 500,
            post_click_settle_ms: 2_000,
        }
    }
}

/// Offline-inspection artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Where the page HTML is written when a submission outcome is unclear.
    pub snapshot_path: String,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            snapshot_path: "hh_last_response.html".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8000);
        assert!(config.browser.headless);
        assert_eq!(config.search.area, "113");
        assert_eq!(config.timings.navigation_ms, 90_000);
        assert_eq!(config.diagnostics.snapshot_path, "hh_last_response.html");
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 9000
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.search.items_on_page, 20);
    }
}
