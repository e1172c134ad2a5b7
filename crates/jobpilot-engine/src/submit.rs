//! The application submission state machine.
//!
//! An explicit ordered decision list replaces the cascading probes the site
//! forces on a manual user. Branch precedence, top to bottom:
//!
//! 1. already-applied marker (wins over every other affordance)
//! 2. letter-first path (write-letter link + non-empty letter)
//! 3. standard apply control, with a best-effort dropdown-with-letter detour
//! 4. post-apply letter screen
//! 5. status confirmation, else a diagnostic snapshot and "status unclear"
//!
//! Every wait is bounded. Failures in primary paths terminate the flow as
//! `Failed`; failures inside the dropdown detour degrade to the plain click.

use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::DriverError;
use crate::outcome::SubmissionOutcome;
use crate::page::PageDriver;
use crate::selectors;
use crate::types::{CoverLetter, PostingReference};

/// Bounded waits used by the submission flow.
#[derive(Debug, Clone)]
pub struct FlowTimings {
    /// Navigation to the vacancy page.
    pub navigation: Duration,
    /// Wait for the response popup after opening it.
    pub modal_wait: Duration,
    /// Settle before filling the popup letter field.
    pub pre_fill_settle: Duration,
    /// Settle after clicking a popup submit control.
    pub post_submit_settle: Duration,
    /// Settle after opening the split-button dropdown.
    pub dropdown_settle: Duration,
    /// Settle after activating the primary apply control.
    pub post_click_settle: Duration,
}

impl Default for FlowTimings {
    fn default() -> Self {
        Self {
            navigation: Duration::from_secs(90),
            modal_wait: Duration::from_secs(5),
            pre_fill_settle: Duration::from_secs(1),
            post_submit_settle: Duration::from_secs(3),
            dropdown_settle: Duration::from_millis(500),
            post_click_settle: Duration::from_secs(2),
        }
    }
}

impl FlowTimings {
    /// All-zero timings, useful when the page under the driver does not need
    /// real settle periods.
    pub fn zero() -> Self {
        Self {
            navigation: Duration::ZERO,
            modal_wait: Duration::ZERO,
            pre_fill_settle: Duration::ZERO,
            post_submit_settle: Duration::ZERO,
            dropdown_settle: Duration::ZERO,
            post_click_settle: Duration::ZERO,
        }
    }
}

/// Drives one vacancy page to a terminal [`SubmissionOutcome`].
pub struct SubmissionEngine {
    timings: FlowTimings,
    /// Where to write the page HTML when the outcome is unclear.
    snapshot_path: Option<PathBuf>,
}

impl SubmissionEngine {
    pub fn new(timings: FlowTimings, snapshot_path: Option<PathBuf>) -> Self {
        Self {
            timings,
            snapshot_path,
        }
    }

    /// Submit an application on the given page.
    ///
    /// Never raises: every failure is folded into
    /// [`SubmissionOutcome::Failed`]. The caller owns the page exclusively
    /// for the duration of the call and is responsible for releasing it.
    pub async fn submit<P: PageDriver + ?Sized>(
        &self,
        page: &P,
        posting: &PostingReference,
        letter: &CoverLetter,
    ) -> SubmissionOutcome {
        info!(
            posting = %posting,
            letter_len = letter.text().len(),
            "Submitting application"
        );

        match self.run(page, posting, letter).await {
            Ok(outcome) => {
                info!(?outcome, "Submission finished");
                outcome
            }
            Err(e) => {
                warn!("Submission failed: {}", e);
                SubmissionOutcome::Failed(e.to_string())
            }
        }
    }

    async fn run<P: PageDriver + ?Sized>(
        &self,
        page: &P,
        posting: &PostingReference,
        letter: &CoverLetter,
    ) -> Result<SubmissionOutcome, DriverError> {
        page.goto(posting.as_str(), self.timings.navigation).await?;

        // Must run before any other probe: some layouts render a disabled
        // apply control next to the marker.
        if page.probe(&selectors::already_applied()).await? {
            debug!("Already-applied marker present");
            return Ok(SubmissionOutcome::AlreadyApplied);
        }

        if letter.has_text() && page.probe(&selectors::cover_letter_link()).await? {
            debug!("Write-letter link present, taking letter-first path");
            page.click(&selectors::cover_letter_link()).await?;
            return self.fill_letter_modal(page, letter).await;
        }

        self.standard_path(page, letter).await
    }

    /// Wait for the response popup, fill the letter and submit.
    ///
    /// Shared by the letter-first path and the dropdown detour. Driver errors
    /// propagate; the callers decide whether they are terminal.
    async fn fill_letter_modal<P: PageDriver + ?Sized>(
        &self,
        page: &P,
        letter: &CoverLetter,
    ) -> Result<SubmissionOutcome, DriverError> {
        page.wait_for(&selectors::response_popup(), self.timings.modal_wait)
            .await?;
        tokio::time::sleep(self.timings.pre_fill_settle).await;

        if page.probe(&selectors::popup_letter_input()).await? {
            debug!("Filling cover letter ({} chars)", letter.text().len());
            page.fill(&selectors::popup_letter_input(), letter.text())
                .await?;
        } else {
            warn!("Letter field not found in response popup");
        }

        if page.probe(&selectors::popup_submit()).await? {
            page.click(&selectors::popup_submit()).await?;
            tokio::time::sleep(self.timings.post_submit_settle).await;
            Ok(SubmissionOutcome::SubmittedWithLetter)
        } else {
            Ok(SubmissionOutcome::Failed("submit control missing".to_string()))
        }
    }

    async fn standard_path<P: PageDriver + ?Sized>(
        &self,
        page: &P,
        letter: &CoverLetter,
    ) -> Result<SubmissionOutcome, DriverError> {
        let apply = if page.probe(&selectors::apply_link_top()).await? {
            selectors::apply_link_top()
        } else if page.probe(&selectors::apply_link_bottom()).await? {
            selectors::apply_link_bottom()
        } else {
            return Ok(SubmissionOutcome::Failed("apply control not found".to_string()));
        };
        debug!(control = %apply, "Apply control located");

        if letter.has_text() && page.probe(&selectors::apply_dropdown()).await? {
            if let Some(outcome) = self.dropdown_detour(page, letter).await {
                return Ok(outcome);
            }
            // Best effort only: any incomplete detour falls back to the
            // plain activation below.
        }

        page.click(&apply).await?;
        tokio::time::sleep(self.timings.post_click_settle).await;

        if letter.has_text() && page.probe(&selectors::bare_textarea()).await? {
            debug!("Post-apply letter screen present");
            page.fill(&selectors::bare_textarea(), letter.text()).await?;
            if page.probe(&selectors::send_button()).await? {
                page.click(&selectors::send_button()).await?;
                tokio::time::sleep(self.timings.post_submit_settle).await;
                return Ok(SubmissionOutcome::SubmittedWithLetter);
            }
        }

        self.confirm_status(page).await
    }

    /// Try to apply with a letter through the split-button dropdown.
    ///
    /// Returns `None` when the detour did not complete for any reason; the
    /// caller then degrades to the plain activation.
    async fn dropdown_detour<P: PageDriver + ?Sized>(
        &self,
        page: &P,
        letter: &CoverLetter,
    ) -> Option<SubmissionOutcome> {
        match self.try_dropdown(page, letter).await {
            Ok(Some(outcome)) => Some(outcome),
            Ok(None) => {
                debug!("Dropdown detour incomplete, falling back to plain apply");
                None
            }
            Err(e) => {
                warn!("Dropdown detour failed, falling back to plain apply: {}", e);
                None
            }
        }
    }

    async fn try_dropdown<P: PageDriver + ?Sized>(
        &self,
        page: &P,
        letter: &CoverLetter,
    ) -> Result<Option<SubmissionOutcome>, DriverError> {
        page.click(&selectors::apply_dropdown()).await?;
        tokio::time::sleep(self.timings.dropdown_settle).await;

        if !page.probe(&selectors::with_letter_option()).await? {
            return Ok(None);
        }
        page.click(&selectors::with_letter_option()).await?;

        match self.fill_letter_modal(page, letter).await? {
            SubmissionOutcome::SubmittedWithLetter => {
                Ok(Some(SubmissionOutcome::SubmittedWithLetter))
            }
            // A missing submit control is not terminal here.
            _ => Ok(None),
        }
    }

    async fn confirm_status<P: PageDriver + ?Sized>(
        &self,
        page: &P,
    ) -> Result<SubmissionOutcome, DriverError> {
        for phrase in selectors::CONFIRMATION_PHRASES {
            if page.probe(&crate::Locator::text(phrase)).await? {
                debug!(phrase, "Confirmation phrase found");
                return Ok(SubmissionOutcome::SubmittedWithoutLetter);
            }
        }

        warn!("No confirmation phrase found, saving page snapshot");
        self.write_snapshot(page).await;
        Ok(SubmissionOutcome::SubmittedStatusUnclear)
    }

    /// Persist the rendered page for offline inspection. Best effort.
    async fn write_snapshot<P: PageDriver + ?Sized>(&self, page: &P) {
        let Some(path) = &self.snapshot_path else {
            return;
        };
        match page.content().await {
            Ok(html) => {
                if let Err(e) = tokio::fs::write(path, html).await {
                    warn!("Failed to write page snapshot to {}: {}", path.display(), e);
                }
            }
            Err(e) => warn!("Failed to capture page content: {}", e),
        }
    }
}

#[cfg(test)]
#[path = "submit_tests.rs"]
mod tests;
