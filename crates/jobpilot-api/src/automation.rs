//! The browser-backed automation behind the gateway.
//!
//! Each call is a full browser invocation: launch Chrome, open a page,
//! restore the saved session, run the flow, shut Chrome down. Shutdown runs
//! on every exit path so a failed flow cannot leak a Chrome process.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use jobpilot_browser::{Browser, BrowserError, CdpPage, LaunchConfig, SessionStore, StoreError};
use jobpilot_config::{BrowserConfig, Config, ConfigLoader, SearchConfig, TimingsConfig};
use jobpilot_engine::{
    CoverLetter, EngineError, FlowTimings, PostingReference, SearchEngine, SearchSettings,
    SearchTimings, SubmissionEngine, SubmissionOutcome, Vacancy,
};

/// Errors surfaced by gateway operations that do not fold into a
/// [`SubmissionOutcome`].
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Browser(#[from] BrowserError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What the request handlers need from the automation layer.
///
/// A trait so router tests can substitute a scripted implementation instead
/// of launching Chrome.
#[async_trait]
pub trait Automation: Send + Sync {
    /// Submit one application. Never raises; failures become
    /// [`SubmissionOutcome::Failed`].
    async fn apply(&self, posting: PostingReference, letter: CoverLetter) -> SubmissionOutcome;

    /// Search vacancies and fetch their descriptions.
    async fn search(&self, query: Option<String>, page_num: u32) -> Result<Vec<Vacancy>, ApiError>;
}

/// Production [`Automation`]: one Chrome launch per call.
///
/// Calls run one at a time: the debug port and profile directory are shared,
/// so a second concurrent launch would attach to the first call's Chrome and
/// the first shutdown would kill it mid-flow. Concurrent requests queue.
pub struct BrowserAutomation {
    config: Config,
    invocation: tokio::sync::Mutex<()>,
}

impl BrowserAutomation {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            invocation: tokio::sync::Mutex::new(()),
        }
    }

    fn session_store(&self) -> SessionStore {
        SessionStore::new(ConfigLoader::expand_path(&self.config.session.file))
    }

    async fn apply_on(
        &self,
        browser: &Browser,
        state: &jobpilot_browser::StorageState,
        posting: &PostingReference,
        letter: &CoverLetter,
    ) -> Result<SubmissionOutcome, ApiError> {
        let session = browser.new_page().await?;
        session
            .apply_storage_state(state)
            .await
            .map_err(BrowserError::from)?;
        let page = CdpPage::new(session);

        let engine = SubmissionEngine::new(
            flow_timings(&self.config.timings),
            Some(PathBuf::from(ConfigLoader::expand_path(
                &self.config.diagnostics.snapshot_path,
            ))),
        );
        Ok(engine.submit(&page, posting, letter).await)
    }

    async fn search_on(
        &self,
        browser: &Browser,
        state: Option<&jobpilot_browser::StorageState>,
        query: Option<&str>,
        page_num: u32,
    ) -> Result<Vec<Vacancy>, ApiError> {
        let session = browser.new_page().await?;
        if let Some(state) = state {
            session
                .apply_storage_state(state)
                .await
                .map_err(BrowserError::from)?;
        }
        let page = CdpPage::new(session);

        let engine = SearchEngine::new(
            search_settings(&self.config.search),
            SearchTimings::default(),
        );
        Ok(engine.search(&page, query, page_num).await?)
    }
}

#[async_trait]
impl Automation for BrowserAutomation {
    async fn apply(&self, posting: PostingReference, letter: CoverLetter) -> SubmissionOutcome {
        let _guard = self.invocation.lock().await;

        // A saved login session is a hard precondition for applying.
        let state = match self.session_store().load() {
            Ok(state) => state,
            Err(StoreError::NotFound(_)) => {
                warn!("No saved session, refusing to apply");
                return SubmissionOutcome::Failed(EngineError::SessionMissing.to_string());
            }
            Err(e) => return SubmissionOutcome::Failed(e.to_string()),
        };

        let browser = match Browser::launch(launch_config(&self.config.browser)).await {
            Ok(browser) => browser,
            Err(e) => return SubmissionOutcome::Failed(e.to_string()),
        };

        let result = self.apply_on(&browser, &state, &posting, &letter).await;
        browser.shutdown().await;

        match result {
            Ok(outcome) => outcome,
            Err(e) => SubmissionOutcome::Failed(e.to_string()),
        }
    }

    async fn search(&self, query: Option<String>, page_num: u32) -> Result<Vec<Vacancy>, ApiError> {
        let _guard = self.invocation.lock().await;

        // Search works logged out; cookies are applied when a session exists.
        let store = self.session_store();
        let state = if store.exists() {
            Some(store.load()?)
        } else {
            info!("No saved session, searching logged out");
            None
        };

        let browser = Browser::launch(launch_config(&self.config.browser)).await?;
        let result = self
            .search_on(&browser, state.as_ref(), query.as_deref(), page_num)
            .await;
        browser.shutdown().await;
        result
    }
}

fn launch_config(config: &BrowserConfig) -> LaunchConfig {
    LaunchConfig {
        debug_port: config.debug_port,
        headless: config.headless,
        profile_dir: config.profile_dir.clone(),
        chrome_path: config.chrome_path.clone(),
    }
}

fn flow_timings(config: &TimingsConfig) -> FlowTimings {
    FlowTimings {
        navigation: Duration::from_millis(config.navigation_ms),
        modal_wait: Duration::from_millis(config.modal_wait_ms),
        pre_fill_settle: Duration::from_millis(config.pre_fill_settle_ms),
        post_submit_settle: Duration::from_millis(config.post_submit_settle_ms),
        dropdown_settle: Duration::from_millis(config.dropdown_settle_ms),
        post_click_settle: Duration::from_millis(config.post_click_settle_ms),
    }
}

fn search_settings(config: &SearchConfig) -> SearchSettings {
    SearchSettings {
        base_url: config.base_url.clone(),
        area: config.area.clone(),
        items_on_page: config.items_on_page,
        default_text: config.default_text.clone(),
    }
}
