//! Reference domain content for the Foresight simulation.
//!
//! Five phases cover the modelled drivers, each at a fixed fractional
//! order within the month:
//!
//! - 6.5   [`AiCapabilityPhase`]
//! - 6.7   [`AlignmentDriftPhase`]
//! - 10.0  [`EconomyPhase`]
//! - 20.45 [`ClimatePhase`]
//! - 250.0 [`PopulationPhase`]
//!
//! [`ThresholdClassifier`] maps the resulting state to a run outcome.
//! The kernel in `foresight-core` knows nothing about any of this; these
//! are ordinary [`Phase`](foresight_core::Phase) implementations a caller
//! could replace wholesale.

mod ai;
mod classifier;
mod climate;
mod economy;
mod population;

pub use ai::{AiCapabilityPhase, AlignmentDriftPhase};
pub use classifier::ThresholdClassifier;
pub use climate::ClimatePhase;
pub use economy::EconomyPhase;
pub use population::PopulationPhase;

use foresight_core::{PhaseRegistry, RegistryError, SimulationEngine};

/// Register the five reference phases, with default parameters, into
/// `registry`.
pub fn register_reference_phases(registry: &mut PhaseRegistry) -> Result<(), RegistryError> {
    registry.register(Box::new(AiCapabilityPhase::default()))?;
    registry.register(Box::new(AlignmentDriftPhase::default()))?;
    registry.register(Box::new(EconomyPhase::default()))?;
    registry.register(Box::new(ClimatePhase::default()))?;
    registry.register(Box::new(PopulationPhase::default()))?;
    Ok(())
}

/// Build an engine with the reference phases and the threshold
/// classifier.
pub fn reference_engine() -> Result<SimulationEngine, RegistryError> {
    let mut registry = PhaseRegistry::new();
    register_reference_phases(&mut registry)?;
    Ok(SimulationEngine::new(
        registry,
        Box::new(ThresholdClassifier::default()),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn reference_phases_register_cleanly() {
        let mut registry = PhaseRegistry::new();
        register_reference_phases(&mut registry).unwrap();
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn reference_order_is_capability_first_population_last() {
        let mut registry = PhaseRegistry::new();
        register_reference_phases(&mut registry).unwrap();
        let ids: Vec<&str> = registry.execution_order();
        assert_eq!(
            ids,
            vec![
                "ai_capability",
                "alignment_drift",
                "economy",
                "climate",
                "population"
            ]
        );
    }
}
