//! Flow controller for one audit session.
//!
//! The session moves through four screens:
//!
//! ```text
//! landing --submit_url--> analyzing --finish_analysis--> lead_capture
//!    ^                                                        |
//!    +---------- start_over ---- report <---- submit_lead ----+
//! ```
//!
//! Each state carries exactly the data its screen needs, so a lead capture
//! screen without a report, or a report screen without a lead, cannot be
//! constructed. Any other action is rejected with
//! [`FlowError::InvalidTransition`] and leaves the state untouched.

use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::watch;
use tracing::info;
use uuid::Uuid;

use crate::error::FlowError;
use crate::model::{AuditReport, LeadForm, LeadInfo};
use crate::sequencer::{AnalysisSequencer, Pacer, Progress, SequenceOutcome};
use crate::synth;
use crate::validate;

/// Which screen the session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKind {
    Landing,
    Analyzing,
    LeadCapture,
    Report,
}

impl StateKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Landing => "landing",
            Self::Analyzing => "analyzing",
            Self::LeadCapture => "leadCapture",
            Self::Report => "report",
        }
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session state together with the data stored so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    Landing,
    Analyzing {
        url: String,
    },
    LeadCapture {
        url: String,
        report: AuditReport,
    },
    Report {
        url: String,
        report: AuditReport,
        lead: LeadInfo,
    },
}

impl FlowState {
    #[must_use]
    pub fn kind(&self) -> StateKind {
        match self {
            Self::Landing => StateKind::Landing,
            Self::Analyzing { .. } => StateKind::Analyzing,
            Self::LeadCapture { .. } => StateKind::LeadCapture,
            Self::Report { .. } => StateKind::Report,
        }
    }
}

/// Borrowed view of a screen that displays a report.
///
/// Only the lead capture and report screens have one. Renderers match on
/// [`FlowController::screen`] and draw nothing when it is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen<'a> {
    /// Locked preview of the report.
    Preview { url: &'a str, report: &'a AuditReport },
    /// Unlocked report for a captured lead.
    Unlocked {
        url: &'a str,
        report: &'a AuditReport,
        lead: &'a LeadInfo,
    },
}

/// Owns the state of one browsing session.
pub struct FlowController {
    session_id: Uuid,
    state: FlowState,
    rng: StdRng,
}

impl FlowController {
    /// A new session on the landing screen.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_rng(&mut rand::rng()))
    }

    /// A session whose reports are drawn from a seeded RNG.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            state: FlowState::Landing,
            rng,
        }
    }

    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    #[must_use]
    pub fn state(&self) -> &FlowState {
        &self.state
    }

    #[must_use]
    pub fn kind(&self) -> StateKind {
        self.state.kind()
    }

    /// The normalized URL, once one has been submitted.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match &self.state {
            FlowState::Landing => None,
            FlowState::Analyzing { url }
            | FlowState::LeadCapture { url, .. }
            | FlowState::Report { url, .. } => Some(url),
        }
    }

    /// The generated report, once analysis has finished.
    #[must_use]
    pub fn report(&self) -> Option<&AuditReport> {
        match &self.state {
            FlowState::LeadCapture { report, .. } | FlowState::Report { report, .. } => {
                Some(report)
            }
            _ => None,
        }
    }

    /// The captured lead, on the report screen only.
    #[must_use]
    pub fn lead(&self) -> Option<&LeadInfo> {
        match &self.state {
            FlowState::Report { lead, .. } => Some(lead),
            _ => None,
        }
    }

    /// View of the current screen, or `None` when it shows no report.
    #[must_use]
    pub fn screen(&self) -> Option<Screen<'_>> {
        match &self.state {
            FlowState::Landing | FlowState::Analyzing { .. } => None,
            FlowState::LeadCapture { url, report } => Some(Screen::Preview { url, report }),
            FlowState::Report { url, report, lead } => Some(Screen::Unlocked { url, report, lead }),
        }
    }

    /// `landing -> analyzing`.
    ///
    /// # Errors
    ///
    /// - [`FlowError::InvalidTransition`] if not on the landing screen.
    /// - [`FlowError::InvalidUrl`] if the input fails URL validation.
    pub fn submit_url(&mut self, input: &str) -> Result<(), FlowError> {
        if !matches!(self.state, FlowState::Landing) {
            return Err(self.invalid("submit a URL"));
        }

        let url = validate::normalize_url(input)?;
        info!(session = %self.session_id, url = %url, "url submitted, analysis started");
        self.state = FlowState::Analyzing { url };
        Ok(())
    }

    /// `analyzing -> lead_capture`. Synthesizes the report for the stored URL.
    ///
    /// # Errors
    ///
    /// [`FlowError::InvalidTransition`] if not analyzing. A second call after
    /// a successful one therefore fails.
    pub fn finish_analysis(&mut self) -> Result<(), FlowError> {
        let FlowState::Analyzing { url } = &self.state else {
            return Err(self.invalid("finish analysis"));
        };

        let url = url.clone();
        let report = synth::synthesize_with(&url, &mut self.rng);
        info!(
            session = %self.session_id,
            overall = report.overall_score,
            "analysis finished, awaiting lead"
        );
        self.state = FlowState::LeadCapture { url, report };
        Ok(())
    }

    /// `lead_capture -> report`.
    ///
    /// # Errors
    ///
    /// - [`FlowError::InvalidTransition`] if not on the lead capture screen.
    /// - [`FlowError::InvalidLead`] with per-field messages if validation fails.
    pub fn submit_lead(&mut self, form: &LeadForm) -> Result<(), FlowError> {
        if !matches!(self.state, FlowState::LeadCapture { .. }) {
            return Err(self.invalid("submit a lead"));
        }
        let lead = validate::validate_lead(form)?;

        match std::mem::replace(&mut self.state, FlowState::Landing) {
            FlowState::LeadCapture { url, report } => {
                // Email stays out of the logs.
                info!(
                    session = %self.session_id,
                    business_type = %lead.business_type,
                    "lead captured, report unlocked"
                );
                self.state = FlowState::Report { url, report, lead };
                Ok(())
            }
            other => {
                self.state = other;
                Err(self.invalid("submit a lead"))
            }
        }
    }

    /// `report -> landing`. Drops the URL, report and lead together.
    ///
    /// # Errors
    ///
    /// [`FlowError::InvalidTransition`] if not on the report screen.
    pub fn start_over(&mut self) -> Result<(), FlowError> {
        if !matches!(self.state, FlowState::Report { .. }) {
            return Err(self.invalid("start over"));
        }
        self.state = FlowState::Landing;
        info!(session = %self.session_id, "session reset");
        Ok(())
    }

    /// Drive the analysis sequence and finish the analysis if it completes.
    ///
    /// On [`SequenceOutcome::Cancelled`] the controller stays in
    /// `analyzing` and no report is generated.
    ///
    /// # Errors
    ///
    /// [`FlowError::InvalidTransition`] if not analyzing.
    pub async fn run_analysis<P, F>(
        &mut self,
        sequencer: &AnalysisSequencer<P>,
        cancel: watch::Receiver<bool>,
        on_progress: F,
    ) -> Result<SequenceOutcome, FlowError>
    where
        P: Pacer,
        F: FnMut(Progress) + Send,
    {
        if !matches!(self.state, FlowState::Analyzing { .. }) {
            return Err(self.invalid("run analysis"));
        }

        let outcome = sequencer.run(cancel, on_progress).await;
        if outcome == SequenceOutcome::Completed {
            self.finish_analysis()?;
        }
        Ok(outcome)
    }

    fn invalid(&self, action: &'static str) -> FlowError {
        FlowError::InvalidTransition {
            state: self.kind().as_str(),
            action,
        }
    }
}

impl Default for FlowController {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FlowController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowController")
            .field("session_id", &self.session_id)
            .field("state", &self.kind())
            .finish_non_exhaustive()
    }
}
