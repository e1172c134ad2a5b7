//! Vacancy search flow.
//!
//! Builds the search URL, scrapes the result cards in one script pass, then
//! visits each vacancy for its full description. Per-vacancy failures are
//! logged and skipped rather than aborting the whole search.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{DriverError, EngineError};
use crate::page::PageDriver;
use crate::selectors;
use crate::types::Vacancy;

/// Search defaults, normally sourced from configuration.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub base_url: String,
    /// Region code the site expects in the `area` query parameter.
    pub area: String,
    pub items_on_page: u32,
    pub default_text: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            base_url: "https://hh.ru".to_string(),
            area: "113".to_string(),
            items_on_page: 20,
            default_text: "Frontend".to_string(),
        }
    }
}

/// Bounded waits used by the search flow.
#[derive(Debug, Clone)]
pub struct SearchTimings {
    pub navigation: Duration,
    pub results_wait: Duration,
    pub description_wait: Duration,
}

impl Default for SearchTimings {
    fn default() -> Self {
        Self {
            navigation: Duration::from_secs(15),
            results_wait: Duration::from_secs(10),
            description_wait: Duration::from_secs(10),
        }
    }
}

impl SearchTimings {
    pub fn zero() -> Self {
        Self {
            navigation: Duration::ZERO,
            results_wait: Duration::ZERO,
            description_wait: Duration::ZERO,
        }
    }
}

/// One scraped result card, before the description visit.
#[derive(Debug, Deserialize)]
struct SerpItem {
    title: String,
    url: String,
    employer: String,
}

/// Extracts every result card in a single pass so cards with missing
/// sub-elements cannot desynchronize parallel selector lists.
const SERP_EXTRACT_JS: &str = r#"
Array.from(document.querySelectorAll("[data-qa='vacancy-serp__vacancy']")).map(card => {
    const title = card.querySelector("[data-qa='serp-item__title']");
    const employer = card.querySelector("[data-qa='vacancy-serp__vacancy-employer']");
    return {
        title: title ? title.innerText.trim() : "",
        url: title ? title.href : "",
        employer: employer ? employer.innerText.trim() : "Unknown",
    };
}).filter(item => item.url !== "")
"#;

/// Scrapes vacancy search results through a [`PageDriver`].
pub struct SearchEngine {
    settings: SearchSettings,
    timings: SearchTimings,
}

impl SearchEngine {
    pub fn new(settings: SearchSettings, timings: SearchTimings) -> Self {
        Self { settings, timings }
    }

    /// Build the search URL for a query and zero-based result page.
    pub fn search_url(&self, query: &str, page_num: u32) -> Result<Url, EngineError> {
        let mut url = Url::parse(&self.settings.base_url)
            .map_err(|e| DriverError::Navigation(e.to_string()))?;
        url.set_path("/search/vacancy");
        url.query_pairs_mut()
            .append_pair("text", query)
            .append_pair("area", &self.settings.area)
            .append_pair("items_on_page", &self.settings.items_on_page.to_string())
            .append_pair("page", &page_num.to_string());
        Ok(url)
    }

    /// Search vacancies and fetch each full description.
    pub async fn search<P: PageDriver + ?Sized>(
        &self,
        page: &P,
        query: Option<&str>,
        page_num: u32,
    ) -> Result<Vec<Vacancy>, EngineError> {
        let query = query.unwrap_or(&self.settings.default_text);
        let url = self.search_url(query, page_num)?;
        info!(%url, "Searching vacancies");

        page.goto(url.as_str(), self.timings.navigation).await?;

        if self.bot_protection_triggered(page).await? {
            return Err(EngineError::BotProtection);
        }

        page.wait_for(&selectors::serp_card(), self.timings.results_wait)
            .await?;

        let raw = page.evaluate(SERP_EXTRACT_JS).await?;
        let items: Vec<SerpItem> = serde_json::from_value(raw)
            .map_err(|e| DriverError::Script(format!("serp extraction: {}", e)))?;
        debug!("Extracted {} result cards", items.len());

        let mut vacancies = Vec::with_capacity(items.len());
        for item in items {
            let description = self.fetch_description(page, &item.url).await;
            vacancies.push(Vacancy {
                title: item.title,
                url: item.url,
                employer: item.employer,
                description,
            });
        }

        Ok(vacancies)
    }

    async fn bot_protection_triggered<P: PageDriver + ?Sized>(
        &self,
        page: &P,
    ) -> Result<bool, DriverError> {
        if page.title().await?.to_lowercase().contains("captcha") {
            return Ok(true);
        }
        Ok(page.content().await?.to_lowercase().contains("robot"))
    }

    /// Visit a vacancy page and pull its full description. Failures degrade
    /// to an empty description so one broken card cannot sink the search.
    async fn fetch_description<P: PageDriver + ?Sized>(&self, page: &P, url: &str) -> String {
        let result: Result<Option<String>, DriverError> = async {
            page.goto(url, self.timings.navigation).await?;
            page.wait_for(
                &selectors::vacancy_description(),
                self.timings.description_wait,
            )
            .await?;
            page.text_of(&selectors::vacancy_description()).await
        }
        .await;

        match result {
            Ok(Some(text)) => text.trim().to_string(),
            Ok(None) => String::new(),
            Err(e) => {
                warn!("Failed to get description for {}: {}", url, e);
                String::new()
            }
        }
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
