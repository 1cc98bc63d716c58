//! Data-driven battle content and loaders.
//!
//! This crate houses the data a battle is configured from and provides
//! loaders for the TOML/RON files that carry it:
//! - Tuning parameters (TOML, partial files override defaults)
//! - Named line-ups: rule-set, enemy strategy, scripted player moves (RON)
//!
//! Content is consumed by the runtime and never appears in battle state.

pub mod lineup;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use lineup::Lineup;

#[cfg(feature = "loaders")]
pub use loaders::{ContentFactory, LineupLoader, LoadResult, ParamsLoader};
