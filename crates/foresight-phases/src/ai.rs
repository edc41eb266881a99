//! AI capability growth and alignment drift phases.
//!
//! These two phases are deliberately adjacent in the monthly order:
//! capability moves at 6.5 and alignment drift at 6.7, so the drift
//! computation always sees the capability level deployed *this* month.
//! A future interpretability phase would slot between them at 6.6
//! without renumbering anything.

use foresight_core::{Phase, PhaseError, PhaseResult, RunRng};
use foresight_types::{Event, EventCategory, Severity};
use foresight_world::WorldState;

/// Ceiling on the capability index; growth above this is meaningless to
/// the rest of the model.
const CAPABILITY_CEILING: f64 = 1.0e6;

/// Monthly compute-driven growth of the aggregate capability index.
#[derive(Debug, Clone, PartialEq)]
pub struct AiCapabilityPhase {
    /// Baseline monthly capability growth (fraction).
    pub base_monthly_growth: f64,

    /// Half-width of the uniform jitter applied to the growth rate.
    pub growth_jitter: f64,

    /// Probability of a discontinuous research breakthrough in a month.
    pub breakthrough_chance: f64,

    /// Multiplier applied to capability in a breakthrough month.
    pub breakthrough_multiplier: f64,
}

impl Default for AiCapabilityPhase {
    fn default() -> Self {
        Self {
            base_monthly_growth: 0.010,
            growth_jitter: 0.003,
            breakthrough_chance: 0.01,
            breakthrough_multiplier: 1.15,
        }
    }
}

impl AiCapabilityPhase {
    /// Execution order within a month.
    pub const ORDER: f64 = 6.5;
}

impl Phase for AiCapabilityPhase {
    fn id(&self) -> &str {
        "ai_capability"
    }

    fn name(&self) -> &str {
        "AI capability growth"
    }

    fn order(&self) -> f64 {
        Self::ORDER
    }

    fn execute(&self, state: &mut WorldState, rng: &mut RunRng) -> Result<PhaseResult, PhaseError> {
        let jitter = rng.range(-self.growth_jitter, self.growth_jitter);
        let mut growth = self.base_monthly_growth + jitter;
        let mut events = Vec::new();

        if rng.chance(self.breakthrough_chance) {
            growth += self.breakthrough_multiplier - 1.0;
            events.push(
                Event::new(
                    EventCategory::AiCapability,
                    Severity::Major,
                    "research breakthrough accelerates capability",
                )
                .with_impact(growth),
            );
        }

        let ai = &mut state.ai;
        ai.capability_index = (ai.capability_index * (1.0 + growth)).clamp(0.0, CAPABILITY_CEILING);

        // Automation share chases a saturating function of capability.
        let target = ai.capability_index / (ai.capability_index + 20.0);
        ai.automation_share =
            (ai.automation_share + 0.1 * (target - ai.automation_share)).clamp(0.0, 1.0);

        Ok(PhaseResult::with_events(events))
    }
}

/// Monthly erosion of the alignment margin under capability pressure.
///
/// Runs at order 6.7 and reads the capability index the capability phase
/// wrote earlier in the same month.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentDriftPhase {
    /// Baseline monthly erosion of the alignment margin.
    pub erosion_rate: f64,

    /// Probability of a control-technique advance in a month.
    pub safety_advance_chance: f64,

    /// Margin recovered by a control-technique advance.
    pub safety_advance_gain: f64,
}

impl Default for AlignmentDriftPhase {
    fn default() -> Self {
        Self {
            erosion_rate: 0.004,
            safety_advance_chance: 0.02,
            safety_advance_gain: 0.05,
        }
    }
}

impl AlignmentDriftPhase {
    /// Execution order within a month.
    pub const ORDER: f64 = 6.7;
}

impl Phase for AlignmentDriftPhase {
    fn id(&self) -> &str {
        "alignment_drift"
    }

    fn name(&self) -> &str {
        "Alignment drift"
    }

    fn order(&self) -> f64 {
        Self::ORDER
    }

    fn execute(&self, state: &mut WorldState, rng: &mut RunRng) -> Result<PhaseResult, PhaseError> {
        // Capability already reflects this month's growth (order 6.5).
        let capability = state.ai.capability_index;
        let pressure = (capability / 100.0).min(1.0);

        let mut events = Vec::new();
        let mut margin = state.ai.alignment_margin - self.erosion_rate * (0.5 + pressure);

        if rng.chance(self.safety_advance_chance) {
            margin += self.safety_advance_gain;
            events.push(
                Event::new(
                    EventCategory::Alignment,
                    Severity::Notable,
                    "control technique advance recovers margin",
                )
                .with_impact(self.safety_advance_gain),
            );
        }

        let crossed_zero = state.ai.alignment_margin >= 0.0 && margin < 0.0;
        state.ai.alignment_margin = margin.clamp(-1.0, 1.0);

        if crossed_zero {
            events.push(
                Event::new(
                    EventCategory::Alignment,
                    Severity::Critical,
                    "deployed capability has outrun control techniques",
                )
                .with_impact(state.ai.alignment_margin),
            );
        }

        Ok(PhaseResult::with_events(events))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn capability_grows_and_stays_clamped() {
        let phase = AiCapabilityPhase::default();
        let mut state = WorldState::new();
        let mut rng = RunRng::new(42);

        let before = state.ai.capability_index;
        for _ in 0..120 {
            phase.execute(&mut state, &mut rng).unwrap();
        }
        assert!(state.ai.capability_index > before);
        assert!(state.ai.capability_index <= CAPABILITY_CEILING);
        assert!((0.0..=1.0).contains(&state.ai.automation_share));
    }

    #[test]
    fn drift_reads_same_month_capability() {
        let capability = AiCapabilityPhase::default();
        let drift = AlignmentDriftPhase::default();
        let mut state = WorldState::new();
        state.ai.capability_index = 90.0;
        let mut rng = RunRng::new(1);

        capability.execute(&mut state, &mut rng).unwrap();
        let seen = state.ai.capability_index;
        let margin_before = state.ai.alignment_margin;
        drift.execute(&mut state, &mut rng).unwrap();

        // Erosion used the updated capability, so the margin moved by at
        // least the pressure implied by the post-growth value.
        let min_erosion = drift.erosion_rate * (0.5 + (seen / 100.0).min(1.0));
        assert!(
            state.ai.alignment_margin
                <= margin_before - min_erosion + drift.safety_advance_gain
        );
    }

    #[test]
    fn crossing_zero_emits_a_critical_event() {
        let drift = AlignmentDriftPhase {
            erosion_rate: 0.2,
            safety_advance_chance: 0.0,
            safety_advance_gain: 0.0,
        };
        let mut state = WorldState::new();
        state.ai.alignment_margin = 0.05;
        let mut rng = RunRng::new(1);

        let result = drift.execute(&mut state, &mut rng).unwrap();
        assert!(state.ai.alignment_margin < 0.0);
        assert!(
            result
                .events
                .iter()
                .any(|e| e.severity == Severity::Critical)
        );

        // Already below zero: no second crossing event.
        let result = drift.execute(&mut state, &mut rng).unwrap();
        assert!(result.events.is_empty());
    }

    #[test]
    fn margin_is_clamped_to_unit_band() {
        let drift = AlignmentDriftPhase {
            erosion_rate: 10.0,
            safety_advance_chance: 0.0,
            safety_advance_gain: 0.0,
        };
        let mut state = WorldState::new();
        let mut rng = RunRng::new(1);
        drift.execute(&mut state, &mut rng).unwrap();
        assert!(state.ai.alignment_margin >= -1.0);
    }
}
