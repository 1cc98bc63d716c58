//! Battle state types.
//!
//! A [`BattleState`] is a value: the engine never mutates one in place, it
//! builds the next state from the previous one and a [`TurnResult`].
mod combatant;
#[cfg(feature = "serde")]
mod digest;
mod turn;

pub use combatant::{Combatant, Vitals};
pub use turn::{TurnChanges, TurnResult};

pub(crate) use turn::narrate;

use crate::economy::AudienceComposition;
use crate::ruleset::Ruleset;

/// One of the two combatants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    /// Actor id fed into seed derivation.
    pub const fn actor_id(self) -> u32 {
        match self {
            Self::Player => 0,
            Self::Enemy => 1,
        }
    }

    pub const fn opponent(self) -> Self {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }
}

/// Outcome of the battle as a whole.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Winner {
    Player,
    Enemy,
    Draw,
    /// Battle still running.
    #[default]
    None,
}

/// Lifecycle view of a state. "Not started" is the absence of a state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BattlePhase {
    Active,
    Ended(Winner),
}

/// Complete battle state for one rule-set.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = ""))]
pub struct BattleState<R: Ruleset> {
    pub is_active: bool,
    /// Number of resolved turns.
    pub current_turn: u32,
    pub winner: Winner,
    pub player: R::Combatant,
    pub enemy: R::Combatant,
    pub audience: AudienceComposition,
    /// Rule-set specific shared state: outstanding commands or the comment pool.
    pub arena: R::Arena,
    /// Append-only, one entry per resolved turn.
    pub history: Vec<TurnResult<R>>,
    pub seed: u64,
}

impl<R: Ruleset> BattleState<R> {
    pub fn phase(&self) -> BattlePhase {
        if self.is_active {
            BattlePhase::Active
        } else {
            BattlePhase::Ended(self.winner)
        }
    }

    pub fn combatant(&self, side: Side) -> &R::Combatant {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    pub fn last_turn(&self) -> Option<&TurnResult<R>> {
        self.history.last()
    }

    pub fn last_player_action(&self) -> Option<R::Action> {
        self.last_turn().map(|turn| turn.player_action)
    }

    /// Player actions of the most recent `count` turns, oldest first.
    pub fn recent_player_actions(&self, count: usize) -> impl Iterator<Item = R::Action> + '_ {
        let skip = self.history.len().saturating_sub(count);
        self.history.iter().skip(skip).map(|turn| turn.player_action)
    }
}
