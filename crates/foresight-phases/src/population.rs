//! Population dynamics phase.

use foresight_core::{Phase, PhaseError, PhaseResult, RunRng};
use foresight_types::{Event, EventCategory, Severity};
use foresight_world::WorldState;

/// Monthly population drift from the annual growth rate, climate drag
/// and wellbeing, with a periodic census event.
///
/// Runs last in the reference order (250.0) so it sees everything the
/// month did to wellbeing and climate.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationPhase {
    /// Annual growth lost per degree of positive temperature anomaly.
    pub climate_drag: f64,

    /// Monthly growth gained per unit of wellbeing above 0.5.
    pub wellbeing_gain: f64,

    /// Probability of a sudden mortality shock in a month.
    pub shock_chance: f64,

    /// Fraction of the population lost in a shock month.
    pub shock_loss: f64,

    /// Months between census events.
    pub census_interval_months: u64,
}

impl Default for PopulationPhase {
    fn default() -> Self {
        Self {
            climate_drag: 0.0003,
            wellbeing_gain: 0.0002,
            shock_chance: 0.002,
            shock_loss: 0.01,
            census_interval_months: 12,
        }
    }
}

impl PopulationPhase {
    /// Execution order within a month.
    pub const ORDER: f64 = 250.0;
}

impl Phase for PopulationPhase {
    fn id(&self) -> &str {
        "population"
    }

    fn name(&self) -> &str {
        "Population dynamics"
    }

    fn order(&self) -> f64 {
        Self::ORDER
    }

    fn execute(&self, state: &mut WorldState, rng: &mut RunRng) -> Result<PhaseResult, PhaseError> {
        let anomaly = state.climate.temperature_anomaly_c.max(0.0);
        let wellbeing = state.population.wellbeing_index;

        let monthly_rate = state.population.annual_growth_rate / 12.0
            - self.climate_drag * anomaly
            + self.wellbeing_gain * (wellbeing - 0.5);

        let pop = &mut state.population;
        pop.total_billions = (pop.total_billions * (1.0 + monthly_rate)).max(0.0);

        let mut events = Vec::new();
        if rng.chance(self.shock_chance) {
            let lost = pop.total_billions * self.shock_loss;
            pop.total_billions = (pop.total_billions - lost).max(0.0);
            events.push(
                Event::new(
                    EventCategory::Population,
                    Severity::Major,
                    "sudden mortality shock",
                )
                .with_impact(-lost),
            );
        }

        // Census lands on the month being completed, every interval.
        if self.census_interval_months > 0
            && state
                .current_month()
                .checked_add(1)
                .is_some_and(|m| m.is_multiple_of(self.census_interval_months))
        {
            events.push(
                Event::new(EventCategory::Population, Severity::Info, "annual census")
                    .with_impact(state.population.total_billions),
            );
        }

        Ok(PhaseResult::with_events(events))
    }
}
