//! Analysis phase sequencer.
//!
//! Walks a fixed table of labeled phases, pausing for each phase's duration
//! and reporting progress after every step. Nothing is analyzed: this only
//! paces the "analyzing" screen.
//!
//! # Cancellation
//!
//! A run races every pause against a `watch::Receiver<bool>`. Sending `true`
//! or dropping the sender cancels the run, and a cancelled run never reports
//! completion. The flow controller only moves on after
//! [`SequenceOutcome::Completed`].

use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, warn};

/// One labeled step of the analysis animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phase {
    pub label: &'static str,
    pub duration: Duration,
}

const fn phase(label: &'static str, millis: u64) -> Phase {
    Phase {
        label,
        duration: Duration::from_millis(millis),
    }
}

/// The analysis phases, in display order.
pub const PHASES: [Phase; 8] = [
    phase("Connecting to website...", 800),
    phase("Analyzing SEO structure...", 1000),
    phase("Measuring page speed...", 900),
    phase("Testing mobile responsiveness...", 800),
    phase("Evaluating UX & design...", 900),
    phase("Checking conversion elements...", 800),
    phase("Assessing trust signals...", 700),
    phase("Generating report...", 600),
];

/// Snapshot of a running sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    /// Label of the phase now running, `None` once all phases are done.
    pub current: Option<&'static str>,
}

impl Progress {
    /// Completed phases over total phases, in `[0.0, 1.0]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.completed >= self.total
    }
}

/// How a sequence run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceOutcome {
    /// Every phase elapsed. The only outcome that may advance the flow.
    Completed,
    /// Cancelled after `completed` phases.
    Cancelled { completed: usize },
}

/// Source of the delay between phases.
///
/// The default [`TokioPacer`] sleeps on the tokio timer. Tests substitute a
/// pacer that returns immediately.
#[async_trait::async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, duration: Duration);
}

/// Sleeps with [`tokio::time::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

#[async_trait::async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Runs the phase table with a given pacer and pace multiplier.
pub struct AnalysisSequencer<P: Pacer = TokioPacer> {
    phases: Vec<Phase>,
    pacer: P,
    pace: f64,
}

impl AnalysisSequencer<TokioPacer> {
    /// The standard phase table at real-time pace.
    #[must_use]
    pub fn new() -> Self {
        Self::with_pacer(TokioPacer)
    }
}

impl Default for AnalysisSequencer<TokioPacer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Pacer> AnalysisSequencer<P> {
    #[must_use]
    pub fn with_pacer(pacer: P) -> Self {
        Self {
            phases: PHASES.to_vec(),
            pacer,
            pace: 1.0,
        }
    }

    /// Scale every phase delay. `0.0` runs without waiting; negative or
    /// non-finite values are treated as `1.0`.
    #[must_use]
    pub fn pace(mut self, pace: f64) -> Self {
        self.pace = if pace.is_finite() && pace >= 0.0 { pace } else { 1.0 };
        self
    }

    /// Replace the phase table.
    #[must_use]
    pub fn phases(mut self, phases: Vec<Phase>) -> Self {
        self.phases = phases;
        self
    }

    #[must_use]
    pub fn phase_table(&self) -> &[Phase] {
        &self.phases
    }

    /// Delay actually waited for `phase` at the configured pace.
    #[must_use]
    pub fn scaled(&self, phase: &Phase) -> Duration {
        phase.duration.mul_f64(self.pace)
    }

    /// Total time a full run waits at the configured pace.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.phases.iter().map(|p| self.scaled(p)).sum()
    }

    /// Run every phase in order.
    ///
    /// `on_progress` is called before each phase starts and once more when
    /// the last phase has elapsed. Nothing is reported after cancellation.
    pub async fn run<F>(&self, mut cancel: watch::Receiver<bool>, mut on_progress: F) -> SequenceOutcome
    where
        F: FnMut(Progress) + Send,
    {
        let total = self.phases.len();

        for (completed, phase) in self.phases.iter().enumerate() {
            if is_cancelled(&cancel) {
                warn!(completed, total, "analysis cancelled");
                return SequenceOutcome::Cancelled { completed };
            }

            on_progress(Progress {
                completed,
                total,
                current: Some(phase.label),
            });
            debug!(phase = phase.label, index = completed, "analysis phase started");

            tokio::select! {
                () = self.pacer.pause(self.scaled(phase)) => {}
                () = cancelled(&mut cancel) => {
                    warn!(completed, total, "analysis cancelled");
                    return SequenceOutcome::Cancelled { completed };
                }
            }
        }

        on_progress(Progress {
            completed: total,
            total,
            current: None,
        });
        SequenceOutcome::Completed
    }
}

impl<P: Pacer> std::fmt::Debug for AnalysisSequencer<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisSequencer")
            .field("phases", &self.phases.len())
            .field("pace", &self.pace)
            .finish_non_exhaustive()
    }
}

fn is_cancelled(rx: &watch::Receiver<bool>) -> bool {
    *rx.borrow() || rx.has_changed().is_err()
}

/// Resolves once cancellation is requested or the sender is gone.
async fn cancelled(rx: &mut watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            return;
        }
    }
}
