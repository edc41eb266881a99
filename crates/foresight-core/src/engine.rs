//! The simulation engine: the per-run state machine and month loop.
//!
//! One run advances a [`WorldState`] from its initial condition until a
//! stopping condition: the configured horizon, a terminal outcome (when
//! early exit is enabled), or a fatal phase failure. Each tick is one
//! simulated month:
//!
//! 1. The registry executes every phase in order against the shared
//!    state and the run's single RNG stream.
//! 2. The returned events are stamped with the current month and
//!    appended to the run log.
//! 3. The month counter advances by exactly one.
//! 4. The classifier inspects the state.
//! 5. The caller's observer, if any, sees a read-only view of the state.
//! 6. The engine decides whether to continue.
//!
//! The engine is the only owner of the RNG stream and the month counter.
//! A tick either completes or fails entirely; there is no mid-month
//! cancellation, since a partially mutated month would leave the state
//! in a non-reproducible condition.

use foresight_types::{EventLog, Outcome};
use foresight_world::WorldState;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::classifier::OutcomeClassifier;
use crate::registry::{PhaseRegistry, PhaseRunError};
use crate::rng::RunRng;

/// Errors that abort a run.
///
/// Fatal errors are distinct values, never folded into [`Outcome`]. On
/// failure the caller's state reflects every fully completed month, and
/// re-running with the same seed reproduces the failure exactly -- that
/// reproducibility is what makes phase failures debuggable.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// `max_months` was zero.
    #[error("run horizon must be at least one month")]
    InvalidHorizon,

    /// The month counter would overflow `u64`.
    #[error("month counter overflow")]
    MonthOverflow,

    /// A phase failed during execution.
    #[error(transparent)]
    Phase(#[from] PhaseRunError),
}

/// Read-only per-month observer invoked after each completed tick.
pub type MonthObserver = Box<dyn FnMut(&WorldState)>;

/// Options for a single run.
pub struct RunOptions {
    /// Seed for the run's single RNG stream.
    pub seed: u64,

    /// Horizon: the run stops once `current_month` reaches this value.
    /// Must be at least 1.
    pub max_months: u64,

    /// Whether a terminal [`Outcome`] stops the run before the horizon.
    pub early_exit_on_outcome: bool,

    /// Optional observer invoked with a read-only view of the state
    /// after every completed month.
    pub on_month_end: Option<MonthObserver>,
}

impl RunOptions {
    /// Options with the given seed and horizon, early exit disabled, and
    /// no observer.
    pub const fn new(seed: u64, max_months: u64) -> Self {
        Self {
            seed,
            max_months,
            early_exit_on_outcome: false,
            on_month_end: None,
        }
    }

    /// Enable or disable early exit on a terminal outcome.
    #[must_use]
    pub const fn with_early_exit(mut self, enabled: bool) -> Self {
        self.early_exit_on_outcome = enabled;
        self
    }

    /// Attach a per-month observer.
    ///
    /// The observer receives a shared reference; it must treat the state
    /// as immutable and must not retain it beyond the call.
    #[must_use]
    pub fn with_observer(mut self, observer: impl FnMut(&WorldState) + 'static) -> Self {
        self.on_month_end = Some(Box::new(observer));
        self
    }
}

impl core::fmt::Debug for RunOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RunOptions")
            .field("seed", &self.seed)
            .field("max_months", &self.max_months)
            .field("early_exit_on_outcome", &self.early_exit_on_outcome)
            .field("has_observer", &self.on_month_end.is_some())
            .finish()
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Completion {
    /// The configured horizon was reached.
    HorizonReached,
    /// A terminal outcome was detected with early exit enabled.
    OutcomeReached,
}

/// Headline numbers for a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Months actually completed.
    pub total_months: u64,

    /// The final classified outcome (latched once terminal).
    pub final_outcome: Outcome,

    /// Why the run stopped.
    pub completion: Completion,
}

/// The product of a completed run.
///
/// The caller retains the world state it lent to `run`; this result
/// carries the summary and the full event log. Built once at the end of
/// a run and immutable afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Headline numbers.
    pub summary: RunSummary,

    /// Every event emitted during the run, in emission order.
    pub log: EventLog,
}

impl RunResult {
    /// Months actually completed.
    pub const fn total_months(&self) -> u64 {
        self.summary.total_months
    }

    /// The final classified outcome.
    pub const fn final_outcome(&self) -> Outcome {
        self.summary.final_outcome
    }

    /// Iterate over the events stamped with the given month.
    pub fn events_for_month(&self, month: u64) -> impl Iterator<Item = &foresight_types::Event> {
        self.log.events_for_month(month)
    }
}

/// Owns the registry and classifier and drives runs to completion.
pub struct SimulationEngine {
    registry: PhaseRegistry,
    classifier: Box<dyn OutcomeClassifier>,
}

impl SimulationEngine {
    /// Create an engine from a populated registry and a classifier.
    pub const fn new(registry: PhaseRegistry, classifier: Box<dyn OutcomeClassifier>) -> Self {
        Self {
            registry,
            classifier,
        }
    }

    /// The phase registry this engine executes.
    pub const fn registry(&self) -> &PhaseRegistry {
        &self.registry
    }

    /// Advance the given world to a stopping condition.
    ///
    /// The state is borrowed exclusively for the duration of the run and
    /// is normally at month 0; on success it is the final state, and on
    /// failure it reflects every fully completed month, so a failing run
    /// can be inspected and replayed under the same seed.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidHorizon`] if `options.max_months` is zero;
    /// [`EngineError::Phase`] if any phase fails;
    /// [`EngineError::MonthOverflow`] if the month counter would wrap.
    pub fn run(
        &self,
        state: &mut WorldState,
        mut options: RunOptions,
    ) -> Result<RunResult, EngineError> {
        if options.max_months == 0 {
            return Err(EngineError::InvalidHorizon);
        }

        let mut rng = RunRng::new(options.seed);
        let mut outcome = Outcome::Ongoing;
        let completion;

        info!(
            seed = options.seed,
            max_months = options.max_months,
            phases = self.registry.len(),
            "run started"
        );

        loop {
            let month = state.current_month();
            let log_len_before = state.log().len();

            let events = match self.registry.execute_month(state, &mut rng) {
                Ok(events) => events,
                Err(err) => {
                    warn!(phase = %err.phase_id, month, "phase failed, aborting run");
                    return Err(EngineError::Phase(err));
                }
            };

            let emitted = events.len();
            for mut event in events {
                event.month = month;
                state.record(event);
            }

            let new_month = state.advance_month().ok_or(EngineError::MonthOverflow)?;
            debug_assert_eq!(
                Some(new_month),
                month.checked_add(1),
                "month counter must advance by exactly 1 per tick"
            );
            debug_assert!(
                state.log().len() >= log_len_before,
                "the event log must only grow"
            );

            let classified = self.classifier.classify(state);
            if !outcome.is_terminal() {
                // One-way latch: once terminal, the run's outcome never
                // reverts even if the classifier later reports ongoing.
                outcome = classified;
            }

            info!(month, events = emitted, outcome = %outcome, "month completed");

            if let Some(observer) = options.on_month_end.as_mut() {
                observer(state);
            }

            if new_month >= options.max_months {
                completion = Completion::HorizonReached;
                break;
            }
            if options.early_exit_on_outcome && outcome.is_terminal() {
                completion = Completion::OutcomeReached;
                break;
            }
        }

        let summary = RunSummary {
            total_months: state.current_month(),
            final_outcome: outcome,
            completion,
        };

        info!(
            total_months = summary.total_months,
            outcome = %summary.final_outcome,
            rng_draws = rng.draws(),
            "run finished"
        );

        Ok(RunResult {
            summary,
            log: state.log().clone(),
        })
    }
}

impl core::fmt::Debug for SimulationEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SimulationEngine")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
