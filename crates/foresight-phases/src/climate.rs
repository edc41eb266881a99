//! Climate drift phase.

use foresight_core::{Phase, PhaseError, PhaseResult, RunRng};
use foresight_types::{Event, EventCategory, Severity};
use foresight_world::WorldState;

/// Reference output level used to scale the emissions proxy.
const BASELINE_OUTPUT_TRILLIONS: f64 = 105.0;

/// Monthly warming drift driven by economic output, offset by
/// coordination-funded mitigation, with severe-event draws whose odds
/// rise with the anomaly.
#[derive(Debug, Clone, PartialEq)]
pub struct ClimatePhase {
    /// Baseline monthly warming in degrees Celsius at reference output.
    pub baseline_warming_c: f64,

    /// Warming offset per unit of coordination index.
    pub mitigation_strength: f64,

    /// Severe-event probability per degree of anomaly.
    pub severe_event_scale: f64,
}

impl Default for ClimatePhase {
    fn default() -> Self {
        Self {
            baseline_warming_c: 0.0015,
            mitigation_strength: 0.0010,
            severe_event_scale: 0.02,
        }
    }
}

impl ClimatePhase {
    /// Execution order within a month.
    pub const ORDER: f64 = 20.45;
}

impl Phase for ClimatePhase {
    fn id(&self) -> &str {
        "climate"
    }

    fn name(&self) -> &str {
        "Climate drift"
    }

    fn order(&self) -> f64 {
        Self::ORDER
    }

    fn execute(&self, state: &mut WorldState, rng: &mut RunRng) -> Result<PhaseResult, PhaseError> {
        let coordination = state.society.coordination_index;
        let emissions = (state.economy.gross_output_trillions / BASELINE_OUTPUT_TRILLIONS)
            .clamp(0.2, 3.0);

        let delta = self.baseline_warming_c * emissions - self.mitigation_strength * coordination
            + rng.range(-0.0002, 0.0002);
        state.climate.temperature_anomaly_c =
            (state.climate.temperature_anomaly_c + delta).clamp(-1.0, 10.0);

        let pressure =
            (self.severe_event_scale * state.climate.temperature_anomaly_c).clamp(0.0, 0.5);
        state.climate.severe_event_pressure = pressure;

        let mut events = Vec::new();
        if rng.chance(pressure) {
            events.push(
                Event::new(
                    EventCategory::Climate,
                    Severity::Major,
                    "severe climate event",
                )
                .with_impact(state.climate.temperature_anomaly_c),
            );
            state.population.wellbeing_index =
                (state.population.wellbeing_index - 0.01).clamp(0.0, 1.0);
            state.society.stability_index =
                (state.society.stability_index - 0.005).clamp(0.0, 1.0);
        }

        Ok(PhaseResult::with_events(events))
    }
}
