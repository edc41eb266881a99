//! The phase contract: the unit of per-month behavior.
//!
//! A [`Phase`] is an independently authored, named unit of domain logic
//! with a fixed fractional execution order. Phases are stateless: all
//! persistent state lives in the shared [`WorldState`], which each phase
//! borrows mutably for the duration of one `execute` call. Whatever a
//! phase wants reported goes into the returned [`PhaseResult`]; anything
//! it wants remembered goes into the world.
//!
//! Orders are rational numbers on purpose. A new phase slots between two
//! existing ones (6.5 and 6.7, say, or at 20.45) without renumbering
//! anything else -- that is the system's extensibility mechanism, and
//! orders must never be compacted into sequential integers.

use foresight_types::Event;
use foresight_world::WorldState;

use crate::rng::RunRng;

/// What a phase reports back for one simulated month.
#[derive(Debug, Default)]
pub struct PhaseResult {
    /// Events emitted this month, in the order the phase produced them.
    pub events: Vec<Event>,
}

impl PhaseResult {
    /// A result with no events. Most months, most phases report nothing.
    pub const fn empty() -> Self {
        Self { events: Vec::new() }
    }

    /// A result carrying the given events.
    pub const fn with_events(events: Vec<Event>) -> Self {
        Self { events }
    }

    /// A result carrying a single event.
    pub fn single(event: Event) -> Self {
        Self {
            events: vec![event],
        }
    }
}

/// An error raised inside a phase's `execute`.
///
/// Phase failures are fatal to the run: the engine never retries or
/// skips a failing phase, since skipping would silently desynchronize
/// the state from what later phases assume has already happened.
#[derive(Debug, thiserror::Error)]
pub enum PhaseError {
    /// The phase's domain logic failed.
    #[error("{message}")]
    Failed {
        /// Description of the failure.
        message: String,
    },
}

impl PhaseError {
    /// Create a failure with the given message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }
}

/// A named, ordered unit of per-month behavior.
///
/// Implementations must draw all randomness from the provided [`RunRng`]
/// and are responsible for clamping their own numeric outputs: the
/// kernel never inspects or repairs phase-produced values.
pub trait Phase {
    /// Unique identifier within a registry.
    fn id(&self) -> &str;

    /// Human-readable name, used for logging only.
    fn name(&self) -> &str;

    /// Execution order within a month. Fractional values are expected;
    /// ties are broken by registration order.
    fn order(&self) -> f64;

    /// Advance this phase's slice of the world by one month.
    ///
    /// Mutations made here are visible to every later-ordered phase in
    /// the same month.
    ///
    /// # Errors
    ///
    /// Returns [`PhaseError`] on unrecoverable domain failure; the error
    /// propagates through the orchestrator and aborts the run.
    fn execute(&self, state: &mut WorldState, rng: &mut RunRng) -> Result<PhaseResult, PhaseError>;
}

/// Type of the closure wrapped by [`FnPhase`].
type PhaseFn = dyn Fn(&mut WorldState, &mut RunRng) -> Result<PhaseResult, PhaseError>;

/// A [`Phase`] built from a closure.
///
/// Handy for tests and for thin content phases that do not warrant a
/// named struct.
pub struct FnPhase {
    id: String,
    name: String,
    order: f64,
    func: Box<PhaseFn>,
}

impl FnPhase {
    /// Wrap a closure as a phase.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        order: f64,
        func: impl Fn(&mut WorldState, &mut RunRng) -> Result<PhaseResult, PhaseError> + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            order,
            func: Box::new(func),
        }
    }
}

impl Phase for FnPhase {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn order(&self) -> f64 {
        self.order
    }

    fn execute(&self, state: &mut WorldState, rng: &mut RunRng) -> Result<PhaseResult, PhaseError> {
        (self.func)(state, rng)
    }
}

impl core::fmt::Debug for FnPhase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FnPhase")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use foresight_types::{EventCategory, Severity};

    use super::*;

    #[test]
    fn fn_phase_exposes_descriptor_fields() {
        let phase = FnPhase::new("noop", "No-op", 6.5, |_, _| Ok(PhaseResult::empty()));
        assert_eq!(phase.id(), "noop");
        assert_eq!(phase.name(), "No-op");
        assert_eq!(phase.order(), 6.5);
    }

    #[test]
    fn fn_phase_mutates_state_and_reports_events() {
        let phase = FnPhase::new("growth", "Growth", 1.0, |state, _| {
            state.economy.gross_output_trillions += 1.0;
            Ok(PhaseResult::single(Event::new(
                EventCategory::Economy,
                Severity::Info,
                "output grew",
            )))
        });

        let mut state = WorldState::new();
        let mut rng = RunRng::new(0);
        let result = phase.execute(&mut state, &mut rng).unwrap();
        assert_eq!(result.events.len(), 1);
        assert_eq!(state.economy.gross_output_trillions, 106.0);
    }

    #[test]
    fn fn_phase_propagates_errors() {
        let phase = FnPhase::new("broken", "Broken", 1.0, |_, _| {
            Err(PhaseError::failed("division by zero in hazard model"))
        });
        let mut state = WorldState::new();
        let mut rng = RunRng::new(0);
        let err = phase.execute(&mut state, &mut rng).unwrap_err();
        assert!(err.to_string().contains("division by zero"));
    }
}
