//! Comment pool: the emotion rule-set's resource.
//!
//! The pool is ordered oldest first. Every helper here returns a new pool;
//! none of them mutate their input.

use crate::action::Emotion;
use crate::combat::CycleAction;
use crate::env::{BattleEnv, RollContext, compute_seed};

/// Actor id used when the chat rolls new comments.
const CHAT_ACTOR: u32 = 3;

/// What a comment counts toward when consumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommentKind {
    /// Consumed only by the matching emotion.
    Emotion(Emotion),
    /// Wildcard consumed by any emotion.
    Superchat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Comment {
    /// Monotonically increasing over a battle.
    pub id: u64,
    pub kind: CommentKind,
}

impl Comment {
    pub const fn new(id: u64, kind: CommentKind) -> Self {
        Self { id, kind }
    }

    pub const fn is_superchat(&self) -> bool {
        matches!(self.kind, CommentKind::Superchat)
    }

    /// Whether choosing `emotion` consumes this comment.
    pub fn consumed_by(&self, emotion: Emotion) -> bool {
        match self.kind {
            CommentKind::Emotion(tag) => tag == emotion,
            CommentKind::Superchat => true,
        }
    }
}

/// Comments removed from the pool by one consumption.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsumedComments {
    pub regular: u32,
    pub superchats: u32,
}

impl ConsumedComments {
    /// Bonus units: each superchat is worth `superchat_weight` regular comments.
    pub fn units(&self, superchat_weight: u32) -> u32 {
        self.regular
            .saturating_add(self.superchats.saturating_mul(superchat_weight))
    }

    pub fn total(&self) -> u32 {
        self.regular + self.superchats
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Consumption {
    pub remaining: Vec<Comment>,
    pub consumed: ConsumedComments,
}

/// Rolls `count` new comments for `turn`, numbered from `first_id`.
pub fn generate(
    env: &BattleEnv<'_>,
    battle_seed: u64,
    turn: u32,
    first_id: u64,
    count: u32,
) -> Vec<Comment> {
    let params = env.params();
    let rng = env.rng();

    (0..count)
        .map(|index| {
            let superchat_seed = compute_seed(
                battle_seed,
                turn as u64,
                CHAT_ACTOR,
                RollContext::CommentSuperchat.with_index(index),
            );
            let kind = if rng.chance(superchat_seed, params.superchat_chance_percent) {
                CommentKind::Superchat
            } else {
                let emotion_seed = compute_seed(
                    battle_seed,
                    turn as u64,
                    CHAT_ACTOR,
                    RollContext::CommentEmotion.with_index(index),
                );
                let cycle = Emotion::CYCLE;
                let index = rng.range(emotion_seed, 0, cycle.len() as u32 - 1) as usize;
                CommentKind::Emotion(cycle[index])
            };
            Comment::new(first_id + index as u64, kind)
        })
        .collect()
}

/// Appends `items` to `pool`, evicting the oldest comments beyond `cap`.
pub fn add_to_pool(pool: &[Comment], items: &[Comment], cap: usize) -> Vec<Comment> {
    let mut merged = Vec::with_capacity(pool.len() + items.len());
    merged.extend_from_slice(pool);
    merged.extend_from_slice(items);
    let overflow = merged.len().saturating_sub(cap);
    merged.drain(..overflow);
    merged
}

/// Removes every comment tagged `emotion` and every superchat.
pub fn consume(pool: &[Comment], emotion: Emotion) -> Consumption {
    let mut consumed = ConsumedComments::default();
    let remaining = pool
        .iter()
        .filter(|comment| {
            if !comment.consumed_by(emotion) {
                return true;
            }
            if comment.is_superchat() {
                consumed.superchats += 1;
            } else {
                consumed.regular += 1;
            }
            false
        })
        .copied()
        .collect();

    Consumption {
        remaining,
        consumed,
    }
}

/// Drops the `count` oldest comments.
pub fn scatter(pool: &[Comment], count: usize) -> Vec<Comment> {
    pool.iter().skip(count).copied().collect()
}

/// Tagged comments per emotion, indexed by cycle position. Superchats are not counted.
pub fn tally(pool: &[Comment]) -> [u32; Emotion::COUNT] {
    let mut counts = [0; Emotion::COUNT];
    for comment in pool {
        if let CommentKind::Emotion(emotion) = comment.kind {
            counts[emotion.position()] += 1;
        }
    }
    counts
}
