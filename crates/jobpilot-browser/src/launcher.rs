//! Chrome lifecycle: find, launch with remote debugging, connect, shut down.

use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::{Child, Command};
use tracing::{info, warn};

use crate::client::CdpClient;
use crate::error::BrowserError;
use crate::session::PageSession;

/// Chrome launch configuration.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    /// Chrome debugging port.
    pub debug_port: u16,
    /// Run Chrome headless. Interactive login needs a headed browser.
    pub headless: bool,
    /// Profile directory; a default under the home directory is used when
    /// unset.
    pub profile_dir: Option<PathBuf>,
    /// Explicit Chrome binary; autodetected when unset.
    pub chrome_path: Option<PathBuf>,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            debug_port: 9222,
            headless: true,
            profile_dir: None,
            chrome_path: None,
        }
    }
}

impl LaunchConfig {
    pub fn endpoint(&self) -> String {
        format!("http://localhost:{}", self.debug_port)
    }

    pub fn profile_dir(&self) -> PathBuf {
        self.profile_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".jobpilot")
                .join("browser-profile")
        })
    }
}

/// A launched Chrome instance with a connected CDP client.
///
/// Owned by one invocation; [`Browser::shutdown`] is the single cleanup point
/// every exit path runs through.
pub struct Browser {
    client: CdpClient,
    process: Option<Child>,
    config: LaunchConfig,
}

impl Browser {
    /// Find a Chrome executable on this machine.
    pub fn find_chrome() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        let paths = [
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
        ];

        #[cfg(target_os = "linux")]
        let paths = [
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
        ];

        #[cfg(target_os = "windows")]
        let paths = [
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ];

        paths.iter().map(PathBuf::from).find(|p| p.exists())
    }

    /// Launch Chrome and connect to it.
    pub async fn launch(config: LaunchConfig) -> Result<Self, BrowserError> {
        let chrome_path = config
            .chrome_path
            .clone()
            .or_else(Self::find_chrome)
            .ok_or(BrowserError::ChromeNotFound)?;

        let profile_dir = config.profile_dir();
        if let Err(e) = std::fs::create_dir_all(&profile_dir) {
            warn!("Failed to create profile directory: {}", e);
        }

        info!(
            "Launching Chrome with profile at: {}",
            profile_dir.display()
        );

        let mut cmd = Command::new(&chrome_path);
        cmd.arg(format!("--remote-debugging-port={}", config.debug_port))
            .arg(format!("--user-data-dir={}", profile_dir.display()))
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-background-networking")
            .arg("--disable-sync")
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        if config.headless {
            cmd.arg("--headless=new");
        }

        let process = cmd
            .spawn()
            .map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;

        info!("Chrome launched with PID: {:?}", process.id());

        Self::wait_until_ready(&config).await?;

        let client = CdpClient::connect(&config.endpoint()).await?;
        info!("Connected to Chrome at {}", config.endpoint());

        Ok(Self {
            client,
            process: Some(process),
            config,
        })
    }

    /// Connect to an already-running Chrome without owning its process.
    pub async fn connect(config: LaunchConfig) -> Result<Self, BrowserError> {
        let client = CdpClient::connect(&config.endpoint()).await?;
        Ok(Self {
            client,
            process: None,
            config,
        })
    }

    async fn wait_until_ready(config: &LaunchConfig) -> Result<(), BrowserError> {
        let version_url = format!("{}/json/version", config.endpoint());
        for _ in 0..30 {
            tokio::time::sleep(std::time::Duration::from_millis(200)).await;
            if reqwest::get(&version_url).await.is_ok() {
                return Ok(());
            }
        }
        Err(BrowserError::LaunchFailed(
            "Chrome failed to start within timeout".to_string(),
        ))
    }

    /// Open a fresh page.
    pub async fn new_page(&self) -> Result<PageSession, BrowserError> {
        Ok(self.client.new_page().await?)
    }

    /// Close a page.
    pub async fn close_page(&self, session: &PageSession) -> Result<(), BrowserError> {
        Ok(self.client.close_page(session.target_id()).await?)
    }

    /// Shut Chrome down if this instance launched it.
    pub async fn shutdown(mut self) {
        if let Some(mut child) = self.process.take() {
            info!("Shutting down Chrome...");
            let _ = child.kill().await;
        }
    }

    pub fn endpoint(&self) -> String {
        self.config.endpoint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_config_default() {
        let config = LaunchConfig::default();
        assert_eq!(config.debug_port, 9222);
        assert!(config.headless);
        assert_eq!(config.endpoint(), "http://localhost:9222");
    }

    #[test]
    fn test_profile_dir_override() {
        let config = LaunchConfig {
            profile_dir: Some(PathBuf::from("/tmp/profile")),
            ..Default::default()
        };
        assert_eq!(config.profile_dir(), PathBuf::from("/tmp/profile"));
    }

    #[test]
    fn test_profile_dir_default_is_not_empty() {
        let config = LaunchConfig::default();
        assert!(config.profile_dir().ends_with("browser-profile"));
    }
}
