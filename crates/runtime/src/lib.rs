//! Session layer for the deterministic battle engine.
//!
//! This crate wraps `battle-core` into something a front end can drive with
//! plain text: a [`BattleSession`] owns the tuning parameters, the RNG oracle
//! and the current state, and turns commands such as `act rage` or `restart`
//! into engine calls. [`SessionHandle`] erases the rule-set so callers can pick
//! one at runtime.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the generic session and its turn summaries
//! - [`handle`] selects a rule-set at runtime
//! - [`providers`] supply player actions when none is given
//! - [`command`] parses the text command surface
//! - [`config`] describes how a session is built
pub mod command;
pub mod config;
pub mod error;
pub mod handle;
pub mod providers;
pub mod session;

pub use command::Command;
pub use config::SessionConfig;
pub use error::{Result, RuntimeError};
pub use handle::SessionHandle;
pub use providers::{ActionProvider, RandomProvider, ScriptedProvider};
pub use session::{BattleSession, Outcome, TurnSummary};
