//! The mutable world state advanced one simulated month at a time.
//!
//! Sub-states are plain data with public fields: phases mutate them
//! directly, and a phase ordered later in the month is written assuming
//! earlier phases' writes are already visible. The month counter and the
//! event log are engine-managed -- phases observe both through read
//! accessors but never mutate them.

use foresight_types::{Event, EventLog};
use serde::{Deserialize, Serialize};

/// Demographic sub-state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationState {
    /// Total human population in billions.
    pub total_billions: f64,

    /// Annualised growth rate (fraction per year; negative means decline).
    pub annual_growth_rate: f64,

    /// Aggregate wellbeing index in `[0, 1]`.
    pub wellbeing_index: f64,
}

impl Default for PopulationState {
    fn default() -> Self {
        Self {
            total_billions: 8.1,
            annual_growth_rate: 0.008,
            wellbeing_index: 0.6,
        }
    }
}

/// Economic sub-state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomyState {
    /// Gross world output in trillions (constant currency).
    pub gross_output_trillions: f64,

    /// Monthly output growth rate applied by the economy phase.
    pub growth_rate: f64,

    /// Income inequality index in `[0, 1]` (Gini-like).
    pub inequality: f64,

    /// Remaining months of the current recession; 0 when not in one.
    pub months_in_recession: u32,
}

impl Default for EconomyState {
    fn default() -> Self {
        Self {
            gross_output_trillions: 105.0,
            growth_rate: 0.0025,
            inequality: 0.38,
            months_in_recession: 0,
        }
    }
}

/// Climate sub-state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateState {
    /// Global mean temperature anomaly in degrees Celsius above the
    /// pre-industrial baseline.
    pub temperature_anomaly_c: f64,

    /// Accumulated pressure toward severe climate events, in `[0, 1]`.
    pub severe_event_pressure: f64,
}

impl Default for ClimateState {
    fn default() -> Self {
        Self {
            temperature_anomaly_c: 1.3,
            severe_event_pressure: 0.05,
        }
    }
}

/// AI capability and control sub-state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiState {
    /// Aggregate capability index (1.0 at run start; unbounded above).
    pub capability_index: f64,

    /// Margin between control/alignment techniques and deployed
    /// capability. Negative means capability has outrun control.
    pub alignment_margin: f64,

    /// Share of economic output produced by automated systems, `[0, 1]`.
    pub automation_share: f64,
}

impl Default for AiState {
    fn default() -> Self {
        Self {
            capability_index: 1.0,
            alignment_margin: 0.5,
            automation_share: 0.05,
        }
    }
}

/// Societal cohesion sub-state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocietyState {
    /// Institutional stability index in `[0, 1]`.
    pub stability_index: f64,

    /// Capacity for international coordination in `[0, 1]`.
    pub coordination_index: f64,
}

impl Default for SocietyState {
    fn default() -> Self {
        Self {
            stability_index: 0.7,
            coordination_index: 0.5,
        }
    }
}

/// The single mutable aggregate representing the simulated world.
///
/// Created once by the caller before a run, mutated in place by every
/// phase every month, and borrowed exclusively by the executing run.
/// The month counter and event log are engine-managed: phases read them
/// via [`current_month`](Self::current_month) and [`log`](Self::log) but
/// must never advance or append to them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    /// Completed months since run start. Advanced only by the engine.
    current_month: u64,

    /// Demographics.
    pub population: PopulationState,

    /// Economy.
    pub economy: EconomyState,

    /// Climate.
    pub climate: ClimateState,

    /// AI capability and control.
    pub ai: AiState,

    /// Societal cohesion.
    pub society: SocietyState,

    /// Running log of every event emitted so far. Appended only by the
    /// engine.
    log: EventLog,
}

impl WorldState {
    /// Create a world at month 0 with default sub-states.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of completed months since run start.
    ///
    /// During a tick, phases observe the month being simulated; the
    /// counter advances after all phases have executed.
    pub const fn current_month(&self) -> u64 {
        self.current_month
    }

    /// Advance the month counter by one. Returns the new value, or
    /// `None` on overflow.
    ///
    /// Engine-only: phases must never call this.
    pub const fn advance_month(&mut self) -> Option<u64> {
        match self.current_month.checked_add(1) {
            Some(next) => {
                self.current_month = next;
                Some(next)
            }
            None => None,
        }
    }

    /// The running event log.
    pub const fn log(&self) -> &EventLog {
        &self.log
    }

    /// Append an event to the running log.
    ///
    /// Engine-only: phases return events from `execute` instead of
    /// writing to the log directly.
    pub fn record(&mut self, event: Event) {
        self.log.push(event);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use foresight_types::{EventCategory, Severity};

    use super::*;

    #[test]
    fn new_world_starts_at_month_zero() {
        let world = WorldState::new();
        assert_eq!(world.current_month(), 0);
        assert!(world.log().is_empty());
    }

    #[test]
    fn advance_month_increments_by_one() {
        let mut world = WorldState::new();
        assert_eq!(world.advance_month(), Some(1));
        assert_eq!(world.advance_month(), Some(2));
        assert_eq!(world.current_month(), 2);
    }

    #[test]
    fn advance_month_detects_overflow() {
        let mut world = WorldState::new();
        // Force the counter to the edge via repeated advances is
        // impractical; round-trip through serde instead.
        let json = serde_json::to_string(&world).unwrap();
        let patched = json.replace("\"current_month\":0", &format!("\"current_month\":{}", u64::MAX));
        let mut world: WorldState = serde_json::from_str(&patched).unwrap();
        assert_eq!(world.advance_month(), None);
        assert_eq!(world.current_month(), u64::MAX);
    }

    #[test]
    fn record_appends_to_log() {
        let mut world = WorldState::new();
        world.record(Event::new(
            EventCategory::Social,
            Severity::Info,
            "something happened",
        ));
        assert_eq!(world.log().len(), 1);
    }

    #[test]
    fn default_substates_are_plausible() {
        let world = WorldState::new();
        assert!(world.population.total_billions > 0.0);
        assert!(world.economy.gross_output_trillions > 0.0);
        assert!(world.ai.capability_index == 1.0);
        assert!((0.0..=1.0).contains(&world.society.stability_index));
    }
}
