//! The outcome classifier seam between kernel and content layer.
//!
//! After all phases have executed for a month, the engine asks the
//! classifier whether the world has reached a terminal condition. From
//! the kernel's perspective the predicate is opaque: the thresholds that
//! define "ongoing" versus a terminal outcome are supplied by the
//! content layer.

use foresight_types::Outcome;
use foresight_world::WorldState;

/// Classifies the world state at the end of each simulated month.
///
/// `classify` must be a pure function of the state: it is called once
/// per month, must not mutate anything, and must return exactly one
/// [`Outcome`]. When several terminal conditions are simultaneously
/// true, implementations pick one via a fixed priority order of their
/// own definition.
pub trait OutcomeClassifier {
    /// Classify the current world state.
    fn classify(&self, state: &WorldState) -> Outcome;
}

/// A classifier that never terminates the run.
///
/// Useful for fixed-horizon studies where the caller wants every run to
/// execute all the way to `max_months`, and for exercising the engine
/// in tests without any content-layer thresholds.
#[derive(Debug, Clone, Copy, Default)]
pub struct OngoingClassifier;

impl OngoingClassifier {
    /// Create a new always-ongoing classifier.
    pub const fn new() -> Self {
        Self
    }
}

impl OutcomeClassifier for OngoingClassifier {
    fn classify(&self, _state: &WorldState) -> Outcome {
        Outcome::Ongoing
    }
}
