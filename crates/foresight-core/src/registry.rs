//! The phase registry and month orchestrator.
//!
//! The registry owns every registered [`Phase`] and executes them, once
//! per simulated month, in ascending `(order, registration_index)` order
//! with a stable sort. Phases are deliberately not isolated from one
//! another: phase N's writes are visible to phase N+1 within the same
//! month, so the registry must never reorder or parallelize execution
//! within a month.

use foresight_types::Event;
use foresight_world::WorldState;
use tracing::debug;

use crate::phase::{Phase, PhaseError};
use crate::rng::RunRng;

/// Errors raised when registering a phase.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A phase with the same id is already registered.
    #[error("duplicate phase id: '{id}'")]
    DuplicateId {
        /// The offending id.
        id: String,
    },

    /// The phase's order is NaN or infinite.
    #[error("phase '{id}' has non-finite order {order}")]
    NonFiniteOrder {
        /// The offending phase's id.
        id: String,
        /// The rejected order value.
        order: f64,
    },
}

/// A phase execution failure, annotated with which phase failed and when.
///
/// Wraps the [`PhaseError`] the phase raised; propagates through the
/// engine as a fatal run error.
#[derive(Debug, thiserror::Error)]
#[error("phase '{phase_id}' failed in month {month}: {source}")]
pub struct PhaseRunError {
    /// Id of the failing phase.
    pub phase_id: String,

    /// The month being simulated when the failure occurred.
    pub month: u64,

    /// The underlying phase error.
    #[source]
    pub source: PhaseError,
}

/// A registered phase together with its tie-break position.
struct RegisteredPhase {
    phase: Box<dyn Phase>,
    registration_index: usize,
}

/// Owns registered phases and executes them in order each month.
///
/// Registration order is preserved and used as the deterministic
/// tie-break for equal orders. Orders are never compacted or reassigned;
/// fractional insertion is the supported extension mechanism.
#[derive(Default)]
pub struct PhaseRegistry {
    phases: Vec<RegisteredPhase>,
}

impl PhaseRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self { phases: Vec::new() }
    }

    /// Number of registered phases.
    pub const fn len(&self) -> usize {
        self.phases.len()
    }

    /// Whether no phases are registered.
    pub const fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Register a phase.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateId`] if a phase with the same id
    /// is already registered, or [`RegistryError::NonFiniteOrder`] if the
    /// phase's order is NaN or infinite.
    pub fn register(&mut self, phase: Box<dyn Phase>) -> Result<(), RegistryError> {
        let order = phase.order();
        if !order.is_finite() {
            return Err(RegistryError::NonFiniteOrder {
                id: phase.id().to_owned(),
                order,
            });
        }
        if self.phases.iter().any(|p| p.phase.id() == phase.id()) {
            return Err(RegistryError::DuplicateId {
                id: phase.id().to_owned(),
            });
        }
        let registration_index = self.phases.len();
        self.phases.push(RegisteredPhase {
            phase,
            registration_index,
        });
        Ok(())
    }

    /// The ids of all registered phases in execution order.
    pub fn execution_order(&self) -> Vec<&str> {
        self.sorted()
            .into_iter()
            .map(|p| p.phase.id())
            .collect()
    }

    /// Execute every registered phase against the given state and RNG
    /// stream, strictly in `(order, registration_index)` order.
    ///
    /// Each phase sees the same mutable state and the same stream; its
    /// events are concatenated, in phase order, into the month's event
    /// list. Returned events are not yet month-stamped -- the engine
    /// stamps them when appending to the run log.
    ///
    /// # Errors
    ///
    /// Returns [`PhaseRunError`] if any phase fails; phases after the
    /// failing one do not execute.
    pub fn execute_month(
        &self,
        state: &mut WorldState,
        rng: &mut RunRng,
    ) -> Result<Vec<Event>, PhaseRunError> {
        let month = state.current_month();
        let mut events = Vec::new();

        for registered in self.sorted() {
            let phase = registered.phase.as_ref();
            debug!(
                phase = phase.id(),
                order = phase.order(),
                month,
                "executing phase"
            );
            let result = phase.execute(state, rng).map_err(|source| PhaseRunError {
                phase_id: phase.id().to_owned(),
                month,
                source,
            })?;
            events.extend(result.events);
        }

        Ok(events)
    }

    /// Registered phases sorted by `(order, registration_index)`.
    ///
    /// `sort_by` is stable and the backing vector is in registration
    /// order, so equal orders keep their registration sequence. Orders
    /// are finite by construction, making `total_cmp` a plain numeric
    /// comparison here.
    fn sorted(&self) -> Vec<&RegisteredPhase> {
        let mut sorted: Vec<&RegisteredPhase> = self.phases.iter().collect();
        sorted.sort_by(|a, b| a.phase.order().total_cmp(&b.phase.order()));
        debug_assert!(
            sorted
                .windows(2)
                .all(|w| match w {
                    [a, b] => a.phase.order() < b.phase.order()
                        || a.registration_index < b.registration_index,
                    _ => true,
                }),
            "stable sort violated (order, registration_index) ordering"
        );
        sorted
    }
}

impl core::fmt::Debug for PhaseRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let ids: Vec<&str> = self.phases.iter().map(|p| p.phase.id()).collect();
        f.debug_struct("PhaseRegistry")
            .field("phases", &ids)
            .finish()
    }
}
