//! Content digest of a battle state.

use sha2::{Digest, Sha256};

use crate::ruleset::Ruleset;

use super::BattleState;

impl<R: Ruleset> BattleState<R> {
    /// SHA-256 over the bincode encoding of the whole state, history included.
    ///
    /// Two battles replayed from the same seed and inputs produce the same
    /// digest, which makes this a cheap reproducibility check.
    pub fn digest(&self) -> Result<[u8; 32], bincode::Error> {
        let bytes = bincode::serialize(self)?;
        Ok(Sha256::digest(&bytes).into())
    }
}
