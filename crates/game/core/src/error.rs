//! Common error infrastructure for battle-core.
//!
//! Domain-specific errors (e.g. `PlayError`, `EffectParseError`) are defined in
//! the modules that produce them. This module holds the shared severity
//! classification and the trait every error enum implements.
//!
//! # Error taxonomy
//!
//! - **Malformed data strings** (effect values, requirements, behavior rules)
//!   never escape the interpreter. They are logged and degrade to a no-op or
//!   to the fail-open / fail-closed default of the grammar.
//! - **Invalid player actions** (wrong phase, card not in hand, not enough
//!   action points) are returned to the caller without mutating state.
//! - **Referential gaps** (missing target, empty piles) degrade to a logged
//!   no-op.
//! - **Structural invariants** (duplicate buff ids, a card in two piles) are
//!   prevented by construction and have no runtime error.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the caller can retry later or choose another action.
    ///
    /// Examples: not enough action points, not the player's turn
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: card not in hand, malformed effect value
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - the battle cannot continue.
    ///
    /// Examples: battle already finished
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all battle-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classification() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert!(ErrorSeverity::Internal.is_internal());
        assert_eq!(ErrorSeverity::Validation.as_str(), "validation");
    }
}
