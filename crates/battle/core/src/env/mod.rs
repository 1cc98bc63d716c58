//! Read-only inputs shared by every engine call.
//!
//! The [`BattleEnv`] aggregate bundles the tuning parameters and the RNG
//! oracle so the engine can reach both without hard coupling to concrete
//! implementations or to any global.
mod rng;

pub use rng::{PcgRng, RngOracle, RollContext, compute_seed};

use crate::config::TuningParams;

/// Aggregates the read-only collaborators required by the engine.
#[derive(Clone, Copy)]
pub struct BattleEnv<'a> {
    params: &'a TuningParams,
    rng: &'a dyn RngOracle,
}

impl<'a> BattleEnv<'a> {
    pub fn new(params: &'a TuningParams, rng: &'a dyn RngOracle) -> Self {
        Self { params, rng }
    }

    pub fn params(&self) -> &'a TuningParams {
        self.params
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }
}

impl core::fmt::Debug for BattleEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BattleEnv")
            .field("params", self.params)
            .finish_non_exhaustive()
    }
}
