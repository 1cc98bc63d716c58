//! Unified error type surfaced by the session API.
//!
//! Wraps engine precondition failures and command parsing errors so front
//! ends can bubble them up with consistent context.
use battle_core::{
    BattleError, ErrorSeverity, InvalidActionError, ParamsError, UnknownStrategyError,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("empty command")]
    EmptyCommand,

    #[error("unrecognized command '{input}' (expected `act`, `auto` or `restart`)")]
    InvalidCommand { input: String },

    #[error(transparent)]
    Action(#[from] InvalidActionError),

    #[error(transparent)]
    Strategy(#[from] UnknownStrategyError),

    #[error(transparent)]
    Params(#[from] ParamsError),

    #[error("battle still active after {max_turns} turns")]
    TurnCapReached { max_turns: u32 },

    #[error("failed to encode battle state for digest")]
    Digest(#[source] bincode::Error),
}

impl BattleError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EmptyCommand | Self::InvalidCommand { .. } => ErrorSeverity::Recoverable,
            Self::Action(err) => err.severity(),
            Self::Strategy(err) => err.severity(),
            Self::Params(err) => err.severity(),
            Self::TurnCapReached { .. } => ErrorSeverity::Validation,
            Self::Digest(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyCommand => "RUNTIME_EMPTY_COMMAND",
            Self::InvalidCommand { .. } => "RUNTIME_INVALID_COMMAND",
            Self::Action(err) => err.error_code(),
            Self::Strategy(err) => err.error_code(),
            Self::Params(err) => err.error_code(),
            Self::TurnCapReached { .. } => "RUNTIME_TURN_CAP_REACHED",
            Self::Digest(_) => "RUNTIME_DIGEST",
        }
    }
}
