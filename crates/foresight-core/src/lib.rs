//! Phase orchestration, RNG stream, and run loop for the Foresight
//! simulation.
//!
//! This crate is the temporal kernel: it advances one mutable
//! [`WorldState`] one simulated month at a time by executing the
//! registered phases in a fixed fractional order, threading one
//! reproducible random stream through all of them, collecting the events
//! they emit, and stopping on the horizon or on a detected terminal
//! outcome. The domain content of each phase is a replaceable module;
//! what this crate guarantees is deterministic, ordered composition.
//!
//! # Modules
//!
//! - [`classifier`] -- [`OutcomeClassifier`] trait and the always-ongoing
//!   stub.
//! - [`config`] -- Typed YAML configuration loading.
//! - [`engine`] -- [`SimulationEngine`]: the per-run month loop and
//!   stopping rules.
//! - [`phase`] -- The [`Phase`] contract, [`PhaseResult`], and the
//!   closure adapter [`FnPhase`].
//! - [`registry`] -- [`PhaseRegistry`]: stable-ordered phase execution.
//! - [`rng`] -- [`RunRng`]: the single deterministic stream per run.
//!
//! [`WorldState`]: foresight_world::WorldState

pub mod classifier;
pub mod config;
pub mod engine;
pub mod phase;
pub mod registry;
pub mod rng;

// Re-export the kernel surface at crate root.
pub use classifier::{OngoingClassifier, OutcomeClassifier};
pub use config::{ConfigError, LoggingConfig, RunConfig, SimulationConfig, WorldBootstrapConfig};
pub use engine::{
    Completion, EngineError, MonthObserver, RunOptions, RunResult, RunSummary, SimulationEngine,
};
pub use phase::{FnPhase, Phase, PhaseError, PhaseResult};
pub use registry::{PhaseRegistry, PhaseRunError, RegistryError};
pub use rng::RunRng;
