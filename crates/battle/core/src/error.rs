//! Common error infrastructure for battle-core.
//!
//! The engine has no recoverable external failure modes: it performs no I/O
//! and parses nothing beyond the string boundary for action and strategy ids.
//! What remains are precondition violations, which are reported through the
//! small error types below and classified with [`ErrorSeverity`].
//!
//! Invariant violations (HP outside `[0, max_hp]`, an audience that does not
//! sum to one) are never reported as errors; every producing function clamps
//! or renormalizes before it returns.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative input.
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown action id, malformed tuning parameters
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - battle state corrupted, cannot continue.
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
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait BattleError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// An action id that does not name an action of the active rule-set.
///
/// Raised at the string boundary only; typed actions cannot be invalid.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("unknown {ruleset} action '{id}'")]
pub struct InvalidActionError {
    pub ruleset: String,
    pub id: String,
}

impl InvalidActionError {
    pub fn new(ruleset: &str, id: &str) -> Self {
        Self {
            ruleset: ruleset.to_owned(),
            id: id.to_owned(),
        }
    }
}

impl BattleError for InvalidActionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "INVALID_ACTION"
    }
}

/// A strategy id that names no AI strategy.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("unknown AI strategy '{id}'")]
pub struct UnknownStrategyError {
    pub id: String,
}

impl BattleError for UnknownStrategyError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "UNKNOWN_STRATEGY"
    }
}
