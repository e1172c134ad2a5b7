//! JobPilot - browser automation for hh.ru vacancies.
//!
//! Main entry point for the JobPilot CLI and gateway server.

mod cli;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use jobpilot_api::{AppState, BrowserAutomation, GatewayConfig, GatewayServer};
use jobpilot_browser::{Browser, CdpPage, LaunchConfig, SessionStore};
use jobpilot_config::{Config, ConfigLoader};
use jobpilot_engine::{selectors, CoverLetter, PageDriver, PostingReference};

use cli::{Cli, Commands};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let cli = Cli::parse();
    let config = ConfigLoader::load_or_default(&cli.config)?;

    match cli.command {
        None => run_serve(config, None, None).await,
        Some(Commands::Serve { host, port }) => run_serve(config, host, port).await,
        Some(Commands::Apply { url, message }) => run_apply(config, url, message).await,
        Some(Commands::Search { text, page }) => run_search(config, text, page).await,
        Some(Commands::Login { timeout }) => run_login(config, timeout).await,
    }
}

/// Run the HTTP gateway in foreground.
async fn run_serve(
    config: Config,
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting JobPilot v{}", env!("CARGO_PKG_VERSION"));

    let gateway = GatewayConfig::new(
        host.unwrap_or_else(|| config.server.host.clone()),
        port.unwrap_or(config.server.port),
    );
    let state = Arc::new(AppState::new(Arc::new(BrowserAutomation::new(config))));

    let server = GatewayServer::new(gateway, state);
    server.run().await
}

/// Submit one application and print the result.
async fn run_apply(
    config: Config,
    url: String,
    message: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    use jobpilot_api::Automation;

    let automation = BrowserAutomation::new(config);
    let outcome = automation
        .apply(PostingReference::new(url), CoverLetter::from(message))
        .await;

    println!(
        "{}",
        serde_json::json!({
            "status": outcome.status(),
            "message": outcome.message(),
        })
    );
    Ok(())
}

/// Search vacancies and print them as JSON.
async fn run_search(
    config: Config,
    text: Option<String>,
    page: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    use jobpilot_api::Automation;

    let automation = BrowserAutomation::new(config);
    let vacancies = automation.search(text, page).await?;

    println!("{}", serde_json::to_string_pretty(&vacancies)?);
    Ok(())
}

/// Open a headed browser, let the user log in, then save the session.
async fn run_login(config: Config, timeout: u64) -> Result<(), Box<dyn std::error::Error>> {
    let store = SessionStore::new(ConfigLoader::expand_path(&config.session.file));

    // Login needs a visible browser regardless of the configured mode.
    let launch = LaunchConfig {
        debug_port: config.browser.debug_port,
        headless: false,
        profile_dir: config.browser.profile_dir.clone(),
        chrome_path: config.browser.chrome_path.clone(),
    };

    let browser = Browser::launch(launch).await?;
    let result = login_on(&browser, &config, &store, timeout).await;
    browser.shutdown().await;
    result?;

    println!("Session saved to {}", store.path().display());
    Ok(())
}

async fn login_on(
    browser: &Browser,
    config: &Config,
    store: &SessionStore,
    timeout: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = browser.new_page().await?;
    let page = CdpPage::new(session);

    let login_url = format!("{}/account/login", config.search.base_url);
    page.goto(&login_url, Duration::from_secs(90)).await?;

    println!("Log in to the site in the opened browser window.");
    println!("Waiting up to {} seconds for the login to complete...", timeout);

    // The resume link only renders for authenticated users.
    page.wait_for(
        &selectors::login_resume_link(),
        Duration::from_secs(timeout),
    )
    .await?;
    info!("Login detected, capturing session");

    let state = page.session().capture_storage_state().await?;
    store.save(&state)?;
    Ok(())
}
