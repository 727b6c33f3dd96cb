//! Session mode state machine.
//!
//! Controls whether the chain is being authored (joints added, moved,
//! removed) or driven by the solver (target moves trigger solves).

/// Active session mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RigMode {
    /// Chain authoring. The solver is not involved; the chain is mutated
    /// only through the edit operations.
    #[default]
    Editing,
    /// Target-driven posing. The chain is mutated only by the solver's
    /// materialization step.
    Simulating,
}

impl RigMode {
    /// Human-readable label for UI display.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Editing => "Editing",
            Self::Simulating => "Simulating",
        }
    }

    /// Whether target moves are accepted in this mode.
    pub const fn is_simulating(self) -> bool {
        matches!(self, Self::Simulating)
    }
}
