//! # JobPilot Engine
//!
//! Core automation flows for the hh.ru vacancy site, expressed against the
//! [`PageDriver`] capability trait so any browser backend (or a scripted fake)
//! can drive them.
//!
//! The heart of the crate is [`SubmissionEngine`]: an ordered decision list
//! that navigates a vacancy page through whichever apply path the UI currently
//! exposes and classifies the result into a single [`SubmissionOutcome`].

mod error;
#[cfg(test)]
mod fake_page;
mod outcome;
mod page;
mod search;
mod submit;
mod types;

pub mod selectors;

pub use error::{DriverError, EngineError};
pub use outcome::SubmissionOutcome;
pub use page::{Locator, PageDriver};
pub use search::{SearchEngine, SearchSettings, SearchTimings};
pub use submit::{FlowTimings, SubmissionEngine};
pub use types::{CoverLetter, PostingReference, Vacancy};
