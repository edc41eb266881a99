//! Economic output phase.

use foresight_core::{Phase, PhaseError, PhaseResult, RunRng};
use foresight_types::{Event, EventCategory, Severity};
use foresight_world::WorldState;

/// Monthly growth of gross world output, with recession cycles and the
/// productivity boost from automation.
#[derive(Debug, Clone, PartialEq)]
pub struct EconomyPhase {
    /// Baseline monthly output growth (fraction).
    pub base_monthly_growth: f64,

    /// Half-width of the uniform jitter applied to growth.
    pub growth_jitter: f64,

    /// Extra monthly growth at full automation.
    pub automation_boost: f64,

    /// Probability a recession begins in a month that is not already in
    /// one.
    pub recession_chance: f64,

    /// How many months a recession lasts.
    pub recession_months: u32,

    /// Growth drag while in recession.
    pub recession_drag: f64,
}

impl Default for EconomyPhase {
    fn default() -> Self {
        Self {
            base_monthly_growth: 0.0025,
            growth_jitter: 0.002,
            automation_boost: 0.004,
            recession_chance: 0.01,
            recession_months: 6,
            recession_drag: 0.01,
        }
    }
}

impl EconomyPhase {
    /// Execution order within a month.
    pub const ORDER: f64 = 10.0;
}

impl Phase for EconomyPhase {
    fn id(&self) -> &str {
        "economy"
    }

    fn name(&self) -> &str {
        "Economic output"
    }

    fn order(&self) -> f64 {
        Self::ORDER
    }

    fn execute(&self, state: &mut WorldState, rng: &mut RunRng) -> Result<PhaseResult, PhaseError> {
        let automation = state.ai.automation_share;
        let mut events = Vec::new();

        let mut growth = self.base_monthly_growth
            + self.automation_boost * automation
            + rng.range(-self.growth_jitter, self.growth_jitter);

        let econ = &mut state.economy;
        if econ.months_in_recession > 0 {
            growth -= self.recession_drag;
            econ.months_in_recession = econ.months_in_recession.saturating_sub(1);
            if econ.months_in_recession == 0 {
                events.push(Event::new(
                    EventCategory::Economy,
                    Severity::Info,
                    "recession ended",
                ));
            }
        } else if rng.chance(self.recession_chance) {
            econ.months_in_recession = self.recession_months;
            growth -= self.recession_drag;
            events.push(
                Event::new(EventCategory::Economy, Severity::Notable, "recession began")
                    .with_impact(-self.recession_drag),
            );
        }

        econ.growth_rate = growth.clamp(-0.2, 0.2);
        econ.gross_output_trillions = (econ.gross_output_trillions * (1.0 + econ.growth_rate)).max(0.0);

        // Automation concentrates returns; inequality drifts with it.
        econ.inequality = (econ.inequality + 0.001 * (automation - 0.2)).clamp(0.0, 1.0);
        let inequality = econ.inequality;
        let growth_rate = econ.growth_rate;

        // Wellbeing tracks growth, discounted by inequality.
        state.population.wellbeing_index = (state.population.wellbeing_index
            + 0.2 * growth_rate
            - 0.005 * (inequality - 0.38))
            .clamp(0.0, 1.0);

        Ok(PhaseResult::with_events(events))
    }
}
