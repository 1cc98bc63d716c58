//! RNG oracle for deterministic random number generation.
//!
//! Randomness only enters a battle through explicit generation steps (audience
//! commands, comment arrivals, randomized AI picks). Each step derives a seed
//! from the battle seed, the turn number and a [`RollContext`], so the same
//! battle seed always replays the same battle.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a d100 (1-100 inclusive).
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32(seed) % range)
    }

    /// Returns true with the given percent probability.
    fn chance(&self, seed: u64, percent: u32) -> bool {
        self.roll_d100(seed) <= percent
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// This implementation uses PCG-XSH-RR, which produces 32-bit output from
/// 64-bit state. It is stateless: the caller supplies the seed for every draw.
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Distinguishes independent random draws made during the same turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum RollContext {
    CommandTarget = 1,
    CommandKind = 2,
    CommentEmotion = 3,
    CommentSuperchat = 4,
    AiChoice = 5,
}

impl RollContext {
    /// Packs the context with an item index so per-item draws stay independent.
    pub const fn with_index(self, index: u32) -> u32 {
        ((self as u32) << 16) | (index & 0xFFFF)
    }
}

/// Compute deterministic seed from battle components.
///
/// * `battle_seed` - Base seed set at battle start
/// * `nonce` - Turn number the draw belongs to
/// * `actor_id` - Side performing the draw
/// * `context` - Distinguishes multiple rolls in the same turn
pub fn compute_seed(battle_seed: u64, nonce: u64, actor_id: u32, context: u32) -> u64 {
    // SplitMix64 / FxHash multipliers
    let mut hash = battle_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_value() {
        let rng = PcgRng;
        let seed = compute_seed(42, 3, 1, RollContext::AiChoice as u32);
        assert_eq!(rng.next_u32(seed), rng.next_u32(seed));
    }

    #[test]
    fn contexts_produce_distinct_seeds() {
        let a = compute_seed(42, 1, 0, RollContext::CommentEmotion.with_index(0));
        let b = compute_seed(42, 1, 0, RollContext::CommentEmotion.with_index(1));
        let c = compute_seed(42, 1, 0, RollContext::CommentSuperchat.with_index(0));
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn range_is_inclusive_and_bounded() {
        let rng = PcgRng;
        for nonce in 0..200 {
            let value = rng.range(compute_seed(7, nonce, 0, 0), 2, 5);
            assert!((2..=5).contains(&value));
        }
        assert_eq!(rng.range(1, 9, 9), 9);
    }

    #[test]
    fn chance_extremes() {
        let rng = PcgRng;
        for nonce in 0..50 {
            let seed = compute_seed(1, nonce, 0, 0);
            assert!(!rng.chance(seed, 0));
            assert!(rng.chance(seed, 100));
        }
    }
}
