//! Submission outcome classification.

/// Terminal result of one submission attempt.
///
/// Exactly one outcome is produced per invocation; no flow path returns
/// without one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The page already carries the applied marker; nothing was clicked.
    AlreadyApplied,
    /// An application with cover letter text was submitted.
    SubmittedWithLetter,
    /// A plain application was submitted and a confirmation phrase was seen.
    SubmittedWithoutLetter,
    /// The apply control was activated but no known confirmation appeared.
    /// The underlying application may still have succeeded.
    SubmittedStatusUnclear,
    /// The flow could not complete.
    Failed(String),
}

impl SubmissionOutcome {
    /// Gateway status field: "error", "skipped" or "success".
    pub fn status(&self) -> &'static str {
        match self {
            SubmissionOutcome::Failed(_) => "error",
            SubmissionOutcome::AlreadyApplied => "skipped",
            SubmissionOutcome::SubmittedWithLetter
            | SubmissionOutcome::SubmittedWithoutLetter
            | SubmissionOutcome::SubmittedStatusUnclear => "success",
        }
    }

    /// Human-readable message for the gateway response.
    pub fn message(&self) -> String {
        match self {
            SubmissionOutcome::AlreadyApplied => "Already applied".to_string(),
            SubmissionOutcome::SubmittedWithLetter => "Applied with cover letter".to_string(),
            SubmissionOutcome::SubmittedWithoutLetter => "Applied successfully".to_string(),
            SubmissionOutcome::SubmittedStatusUnclear => "Applied (status unclear)".to_string(),
            SubmissionOutcome::Failed(reason) => reason.clone(),
        }
    }
}
