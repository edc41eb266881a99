//! Threshold-based outcome classification.

use foresight_core::OutcomeClassifier;
use foresight_types::Outcome;
use foresight_world::WorldState;

/// Classifies the world against fixed thresholds.
///
/// Checks run in severity order: extinction first, then dystopia, then
/// utopia. A world matching several conditions reports the most severe
/// one.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdClassifier {
    /// Population (billions) below which the run is extinct.
    pub extinction_floor_billions: f64,

    /// Capability level above which a negative alignment margin means
    /// an unrecoverable lock-in.
    pub lock_in_capability: f64,

    /// Stability level below which institutions have collapsed.
    pub collapse_stability: f64,

    /// Minimum wellbeing for a utopia verdict.
    pub utopia_wellbeing: f64,

    /// Minimum stability for a utopia verdict.
    pub utopia_stability: f64,

    /// Minimum alignment margin for a utopia verdict.
    pub utopia_alignment: f64,
}

impl Default for ThresholdClassifier {
    fn default() -> Self {
        Self {
            extinction_floor_billions: 0.01,
            lock_in_capability: 50.0,
            collapse_stability: 0.05,
            utopia_wellbeing: 0.95,
            utopia_stability: 0.9,
            utopia_alignment: 0.5,
        }
    }
}

impl OutcomeClassifier for ThresholdClassifier {
    fn classify(&self, state: &WorldState) -> Outcome {
        if state.population.total_billions < self.extinction_floor_billions {
            return Outcome::Extinction;
        }

        let misaligned_lock_in = state.ai.alignment_margin < 0.0
            && state.ai.capability_index > self.lock_in_capability;
        let institutional_collapse = state.society.stability_index < self.collapse_stability;
        if misaligned_lock_in || institutional_collapse {
            return Outcome::Dystopia;
        }

        if state.population.wellbeing_index >= self.utopia_wellbeing
            && state.society.stability_index >= self.utopia_stability
            && state.ai.alignment_margin >= self.utopia_alignment
        {
            return Outcome::Utopia;
        }

        Outcome::Ongoing
    }
}
