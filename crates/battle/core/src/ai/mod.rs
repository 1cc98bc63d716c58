//! Opponent action selection.
//!
//! The enemy picks its action from the visible battle state and a
//! [`Strategy`] tag. Only [`Strategy::Normal`] is randomized, and its roll is
//! derived from the battle seed, so a replayed battle makes the same choices.
//!
//! | Strategy     | Choice                                                  |
//! |--------------|---------------------------------------------------------|
//! | `normal`     | weighted pick favoring counters to recent player moves  |
//! | `adaptive`   | counter to the predicted player action                  |
//! | `mirror`     | repeat the player's previous action                     |
//! | `aggressive` | highest estimated damage                                |

pub mod scoring;

pub use scoring::{ActionScorer, Scored};

use crate::combat::{CycleAction, counter};
use crate::env::{BattleEnv, RollContext, compute_seed};
use crate::error::UnknownStrategyError;
use crate::ruleset::Ruleset;
use crate::state::{BattleState, Side};

/// How many past player actions the normal strategy weighs.
pub const HISTORY_WINDOW: usize = 5;

/// AI strategy tag.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Strategy {
    #[default]
    Normal,
    Adaptive,
    Mirror,
    Aggressive,
}

impl Strategy {
    /// Parses a strategy id at the string boundary.
    pub fn parse(id: &str) -> Result<Self, UnknownStrategyError> {
        id.trim().parse().map_err(|_| UnknownStrategyError {
            id: id.to_owned(),
        })
    }
}

/// Chooses the enemy's action for the next turn.
pub fn decide<R: Ruleset>(
    state: &BattleState<R>,
    strategy: Strategy,
    env: &BattleEnv<'_>,
) -> R::Action {
    let first = R::Action::CYCLE[0];
    let action = match strategy {
        Strategy::Normal => {
            let candidates = ActionScorer::score_all(|candidate| {
                ActionScorer::favorability(candidate, state.recent_player_actions(HISTORY_WINDOW))
            });
            let seed = compute_seed(
                state.seed,
                (state.current_turn + 1) as u64,
                Side::Enemy.actor_id(),
                RollContext::AiChoice as u32,
            );
            let roll = env.rng().next_u32(seed);
            ActionScorer::select_weighted(&candidates, roll).unwrap_or(first)
        }
        Strategy::Adaptive => R::predict_player(state)
            .or_else(|| state.last_player_action())
            .map_or(first, counter),
        Strategy::Mirror => state.last_player_action().unwrap_or(first),
        Strategy::Aggressive => {
            let params = env.params();
            let candidates =
                ActionScorer::score_all(|candidate| R::estimate_damage(state, candidate, params));
            ActionScorer::select_best(&candidates).map_or(first, |best| best.action)
        }
    };

    tracing::debug!(
        ruleset = R::NAME,
        %strategy,
        turn = state.current_turn + 1,
        "AI chose {action:?}"
    );
    action
}

/// Uniform seeded pick for `side`'s next action.
///
/// Used to pilot a side that has no strategy of its own, e.g. the player in
/// a headless run. The roll is keyed by the side's actor id, so it never
/// collides with the enemy's [`Strategy::Normal`] roll for the same turn.
pub fn random_action<R: Ruleset>(
    state: &BattleState<R>,
    side: Side,
    env: &BattleEnv<'_>,
) -> R::Action {
    let cycle = R::Action::CYCLE;
    let seed = compute_seed(
        state.seed,
        (state.current_turn + 1) as u64,
        side.actor_id(),
        RollContext::AiChoice as u32,
    );
    let index = env.rng().range(seed, 0, cycle.len() as u32 - 1) as usize;
    cycle[index]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ClassicAction, Emotion};
    use crate::config::TuningParams;
    use crate::engine::BattleEngine;
    use crate::env::PcgRng;
    use crate::ruleset::{ClassicRules, EmotionRules};

    #[test]
    fn parses_strategy_ids() {
        assert_eq!(Strategy::parse("Adaptive"), Ok(Strategy::Adaptive));
        assert_eq!(
            Strategy::parse("berserk"),
            Err(UnknownStrategyError {
                id: "berserk".into()
            })
        );
    }

    #[test]
    fn mirror_repeats_the_player() {
        let params = TuningParams::default();
        let rng = PcgRng;
        let env = BattleEnv::new(&params, &rng);
        let engine = BattleEngine::<ClassicRules>::new(env).with_strategy(Strategy::Mirror);
        let state = engine.init().unwrap();
        assert_eq!(decide(&state, Strategy::Mirror, &env), ClassicAction::Attack);

        let state = engine.execute_action(&state, ClassicAction::Guard, None);
        assert_eq!(decide(&state, Strategy::Mirror, &env), ClassicAction::Guard);
    }

    #[test]
    fn adaptive_counters_the_pool_favorite() {
        let params = TuningParams {
            initial_comments: 0,
            ..TuningParams::default()
        };
        let rng = PcgRng;
        let env = BattleEnv::new(&params, &rng);
        let mut state = BattleEngine::<EmotionRules>::new(env).init().unwrap();
        state.arena.comments = (0..3)
            .map(|id| {
                crate::economy::Comment::new(
                    id,
                    crate::economy::CommentKind::Emotion(Emotion::Grief),
                )
            })
            .collect();
        // terror beats grief
        assert_eq!(decide(&state, Strategy::Adaptive, &env), Emotion::Terror);
    }

    #[test]
    fn aggressive_picks_strongest_action() {
        let params = TuningParams::default();
        let rng = PcgRng;
        let env = BattleEnv::new(&params, &rng);
        let state = BattleEngine::<EmotionRules>::new(env).init().unwrap();
        assert_eq!(decide(&state, Strategy::Aggressive, &env), Emotion::Rage);

        let state = BattleEngine::<ClassicRules>::new(env).init().unwrap();
        assert_eq!(
            decide(&state, Strategy::Aggressive, &env),
            ClassicAction::Attack
        );
    }

    #[test]
    fn random_action_varies_by_turn() {
        let params = TuningParams::default();
        let rng = PcgRng;
        let env = BattleEnv::new(&params, &rng);
        let mut state = BattleEngine::<EmotionRules>::new(env).init().unwrap();

        let first = random_action(&state, Side::Player, &env);
        assert_eq!(random_action(&state, Side::Player, &env), first);

        let mut seen = Vec::new();
        for turn in 0..40 {
            state.current_turn = turn;
            let action = random_action(&state, Side::Player, &env);
            if !seen.contains(&action) {
                seen.push(action);
            }
        }
        assert!(seen.len() > 1);
    }

    #[test]
    fn normal_is_reproducible() {
        let params = TuningParams::default();
        let rng = PcgRng;
        let env = BattleEnv::new(&params, &rng);
        let state = BattleEngine::<EmotionRules>::new(env).init().unwrap();
        let first = decide(&state, Strategy::Normal, &env);
        for _ in 0..10 {
            assert_eq!(decide(&state, Strategy::Normal, &env), first);
        }
    }
}
