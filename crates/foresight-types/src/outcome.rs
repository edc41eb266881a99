//! Terminal and non-terminal classification of the world state.
//!
//! The outcome classifier inspects the world once per simulated month,
//! after all phases have executed, and reports one [`Outcome`]. A run
//! starts [`Outcome::Ongoing`]; once the engine observes a terminal
//! outcome it latches for the remainder of the run.

use serde::{Deserialize, Serialize};

/// The classification of the world state at the end of a month.
///
/// The kernel only distinguishes terminal from non-terminal; what the
/// individual terminal variants mean is content-layer vocabulary. When
/// several terminal conditions hold simultaneously the classifier must
/// pick exactly one via a fixed, content-defined priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No terminal condition has been reached; the run may continue.
    Ongoing,
    /// A stable, broadly flourishing end state.
    Utopia,
    /// An irreversible lock-in of a broadly bad end state.
    Dystopia,
    /// Human population has collapsed past the point of recovery.
    Extinction,
}

impl Outcome {
    /// Whether this outcome ends the run when early exit is enabled.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Ongoing)
    }
}

impl core::fmt::Display for Outcome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            Self::Ongoing => "ongoing",
            Self::Utopia => "utopia",
            Self::Dystopia => "dystopia",
            Self::Extinction => "extinction",
        };
        write!(f, "{label}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_ongoing_is_non_terminal() {
        assert!(!Outcome::Ongoing.is_terminal());
        assert!(Outcome::Utopia.is_terminal());
        assert!(Outcome::Dystopia.is_terminal());
        assert!(Outcome::Extinction.is_terminal());
    }

    #[test]
    fn display_labels() {
        assert_eq!(Outcome::Ongoing.to_string(), "ongoing");
        assert_eq!(Outcome::Extinction.to_string(), "extinction");
    }
}
