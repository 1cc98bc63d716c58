//! Combat resolution system.
//!
//! This module provides pure functions for resolving a matchup and the damage
//! that follows from it. All combat logic is deterministic and side-effect free.
//!
//! # Core Functions
//!
//! - `judge`: Win/lose/draw over a matchup cycle
//! - `compute_damage`: Final integer damage, floored once
//! - `fan_rate_bonus`: Step-function damage tier from the fan rate
//! - `apply_damage` / `apply_healing`: HP updates clamped to `[0, max_hp]`

pub mod damage;
pub mod judgement;

pub use damage::{apply_damage, apply_healing, compute_damage, fan_rate_bonus};
pub use judgement::{CycleAction, Judgement, counter, judge};
