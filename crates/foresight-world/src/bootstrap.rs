//! Baseline world construction from configurable initial conditions.
//!
//! Runs usually start from the same present-day baseline, varied only by
//! the handful of parameters a study actually sweeps. [`WorldParams`]
//! carries those parameters; everything else takes the sub-state
//! defaults.

use serde::{Deserialize, Serialize};

use crate::state::WorldState;

/// Initial conditions a caller can vary between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldParams {
    /// Starting population in billions.
    pub initial_population_billions: f64,

    /// Annualised baseline population growth rate.
    pub baseline_growth_rate: f64,

    /// Starting gross world output in trillions.
    pub initial_output_trillions: f64,

    /// Starting temperature anomaly in degrees Celsius.
    pub initial_temperature_anomaly_c: f64,

    /// Starting AI capability index.
    pub initial_capability_index: f64,
}

impl Default for WorldParams {
    fn default() -> Self {
        Self {
            initial_population_billions: 8.1,
            baseline_growth_rate: 0.008,
            initial_output_trillions: 105.0,
            initial_temperature_anomaly_c: 1.3,
            initial_capability_index: 1.0,
        }
    }
}

/// Build a month-0 world from the given parameters.
///
/// Sub-state fields not covered by [`WorldParams`] take their defaults.
pub fn create_baseline_world(params: &WorldParams) -> WorldState {
    let mut world = WorldState::new();
    world.population.total_billions = params.initial_population_billions;
    world.population.annual_growth_rate = params.baseline_growth_rate;
    world.economy.gross_output_trillions = params.initial_output_trillions;
    world.climate.temperature_anomaly_c = params.initial_temperature_anomaly_c;
    world.ai.capability_index = params.initial_capability_index;
    world
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn baseline_world_reflects_params() {
        let params = WorldParams {
            initial_population_billions: 2.0,
            baseline_growth_rate: -0.01,
            initial_output_trillions: 50.0,
            initial_temperature_anomaly_c: 2.4,
            initial_capability_index: 5.0,
        };
        let world = create_baseline_world(&params);
        assert_eq!(world.population.total_billions, 2.0);
        assert_eq!(world.population.annual_growth_rate, -0.01);
        assert_eq!(world.economy.gross_output_trillions, 50.0);
        assert_eq!(world.climate.temperature_anomaly_c, 2.4);
        assert_eq!(world.ai.capability_index, 5.0);
        assert_eq!(world.current_month(), 0);
    }

    #[test]
    fn default_params_match_substate_defaults() {
        let world = create_baseline_world(&WorldParams::default());
        assert_eq!(world, WorldState::new());
    }
}
