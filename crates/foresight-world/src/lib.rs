//! World state aggregate for the Foresight simulation.
//!
//! This crate models the single large mutable object a run advances one
//! month at a time: the month counter, the domain sub-states that phases
//! read and write, and the running event log. Exactly one [`WorldState`]
//! is live per run; phases borrow it for the duration of one `execute`
//! call and never retain a copy.
//!
//! # Modules
//!
//! - [`state`] -- [`WorldState`] and the domain sub-states (population,
//!   economy, climate, AI capability, society).
//! - [`bootstrap`] -- [`WorldParams`] and the baseline world constructor
//!   used to start a run from configurable initial conditions.

pub mod bootstrap;
pub mod state;

// Re-export primary types at crate root.
pub use bootstrap::{WorldParams, create_baseline_world};
pub use state::{AiState, ClimateState, EconomyState, PopulationState, SocietyState, WorldState};
