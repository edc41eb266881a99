//! Shared type definitions for the Foresight simulation kernel.
//!
//! This crate is the single source of truth for types that cross crate
//! boundaries in the Foresight workspace: the event records phases emit,
//! the append-only event log the engine accumulates, and the terminal
//! outcome classification.
//!
//! # Modules
//!
//! - [`events`] -- [`Event`] records, categories, severities, and the
//!   append-only [`EventLog`].
//! - [`outcome`] -- The [`Outcome`] classification produced once per
//!   simulated month.

pub mod events;
pub mod outcome;

// Re-export all public types at crate root for convenience.
pub use events::{Event, EventCategory, EventLog, Severity};
pub use outcome::Outcome;
