//! Battle lifecycle: init, turn execution and win evaluation.
//!
//! The [`BattleEngine`] is the authoritative reducer for [`BattleState`]. It
//! never mutates a state in place: every call returns a new value built from
//! the previous one.
//!
//! ```text
//! (no state) --init--> Active --execute_action--> Active | Ended(winner)
//! ```
//!
//! A turn runs the same pipeline for both rule-sets:
//! generation step → AI choice (if needed) → rule-set turn → history → win check.

use core::marker::PhantomData;

use crate::ai::{self, Strategy};
use crate::config::{ParamsError, TuningParams};
use crate::economy::AudienceComposition;
use crate::env::BattleEnv;
use crate::error::InvalidActionError;
use crate::ruleset::{Ruleset, parse_action};
use crate::state::{BattleState, Combatant, Side, Winner};

/// Drives one battle under rule-set `R`.
pub struct BattleEngine<'a, R: Ruleset> {
    env: BattleEnv<'a>,
    strategy: Strategy,
    _rules: PhantomData<R>,
}

impl<'a, R: Ruleset> BattleEngine<'a, R> {
    /// Creates an engine with the default AI strategy.
    pub fn new(env: BattleEnv<'a>) -> Self {
        Self {
            env,
            strategy: Strategy::default(),
            _rules: PhantomData,
        }
    }

    /// Sets the strategy used when no enemy action is supplied.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn env(&self) -> BattleEnv<'a> {
        self.env
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn params(&self) -> &'a TuningParams {
        self.env.params()
    }

    /// Builds the turn-0 state.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError`] if the tuning parameters are inconsistent.
    pub fn init(&self) -> Result<BattleState<R>, ParamsError> {
        let params = self.params();
        params.validate()?;

        let state = BattleState {
            is_active: true,
            current_turn: 0,
            winner: Winner::None,
            player: R::spawn(Side::Player, params),
            enemy: R::spawn(Side::Enemy, params),
            audience: AudienceComposition::new(
                params.initial_player_fans,
                params.initial_enemy_fans,
            ),
            arena: R::open(&self.env),
            history: Vec::new(),
            seed: params.seed,
        };

        tracing::info!(ruleset = R::NAME, seed = state.seed, "battle started");
        Ok(state)
    }

    /// Identical to [`Self::init`].
    pub fn reset(&self) -> Result<BattleState<R>, ParamsError> {
        self.init()
    }

    /// Resolves one turn.
    ///
    /// An inactive state is returned unchanged. When `enemy_action` is
    /// `None` the configured AI strategy picks it.
    pub fn execute_action(
        &self,
        state: &BattleState<R>,
        player_action: R::Action,
        enemy_action: Option<R::Action>,
    ) -> BattleState<R> {
        if !state.is_active {
            tracing::debug!(ruleset = R::NAME, "ignoring action on an ended battle");
            return state.clone();
        }

        let params = self.params();
        let enemy_action =
            enemy_action.unwrap_or_else(|| ai::decide(state, self.strategy, &self.env));
        let arrivals = R::draw(state, &self.env);
        let result = R::process_turn(state, player_action, enemy_action, params, &arrivals);

        tracing::debug!(
            ruleset = R::NAME,
            turn = result.turn,
            judgement = %result.judgement,
            damage_to_enemy = result.damage_to_enemy,
            damage_to_player = result.damage_to_player,
            "{}",
            result.message
        );

        let winner = evaluate_winner(&result.player, &result.enemy, result.turn, params.turn_limit);
        let mut next = BattleState {
            is_active: winner == Winner::None,
            current_turn: result.turn,
            winner,
            player: result.player.clone(),
            enemy: result.enemy.clone(),
            audience: result.audience,
            arena: result.arena.clone(),
            history: Vec::with_capacity(state.history.len() + 1),
            seed: state.seed,
        };
        next.history.extend_from_slice(&state.history);
        next.history.push(result);

        if !next.is_active {
            tracing::info!(
                ruleset = R::NAME,
                turn = next.current_turn,
                winner = %next.winner,
                "battle ended"
            );
        }
        next
    }

    /// String-boundary variant of [`Self::execute_action`].
    ///
    /// # Errors
    ///
    /// Returns [`InvalidActionError`] if either id names no action of `R`.
    pub fn execute_command(
        &self,
        state: &BattleState<R>,
        player_action: &str,
        enemy_action: Option<&str>,
    ) -> Result<BattleState<R>, InvalidActionError> {
        let player_action = parse_action::<R>(player_action)?;
        let enemy_action = enemy_action.map(parse_action::<R>).transpose()?;
        Ok(self.execute_action(state, player_action, enemy_action))
    }
}

/// True once the battle has ended or either side is out of HP.
pub fn is_battle_over<R: Ruleset>(state: &BattleState<R>) -> bool {
    !state.is_active || state.player.is_down() || state.enemy.is_down()
}

/// Winner after `turn` has been resolved.
///
/// A knock-out decides first; a double knock-out is a draw. Otherwise, once
/// a non-zero `turn_limit` is reached, the higher HP ratio wins and equal
/// ratios draw.
pub fn evaluate_winner<C: Combatant>(player: &C, enemy: &C, turn: u32, turn_limit: u32) -> Winner {
    match (player.is_down(), enemy.is_down()) {
        (true, true) => Winner::Draw,
        (false, true) => Winner::Player,
        (true, false) => Winner::Enemy,
        (false, false) if turn_limit > 0 && turn >= turn_limit => {
            // compare hp / max_hp without floats
            let player_ratio = player.hp() as u64 * enemy.max_hp() as u64;
            let enemy_ratio = enemy.hp() as u64 * player.max_hp() as u64;
            match player_ratio.cmp(&enemy_ratio) {
                core::cmp::Ordering::Greater => Winner::Player,
                core::cmp::Ordering::Less => Winner::Enemy,
                core::cmp::Ordering::Equal => Winner::Draw,
            }
        }
        (false, false) => Winner::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ClassicAction, Emotion};
    use crate::env::PcgRng;
    use crate::ruleset::{ClassicRules, EmotionRules};
    use crate::state::{BattlePhase, Vitals};

    #[test]
    fn init_produces_turn_zero() {
        let params = TuningParams::default();
        let rng = PcgRng;
        let engine = BattleEngine::<ClassicRules>::new(BattleEnv::new(&params, &rng));
        let state = engine.init().unwrap();
        assert!(state.is_active);
        assert_eq!(state.current_turn, 0);
        assert_eq!(state.winner, Winner::None);
        assert_eq!(state.player.hp(), params.player_max_hp);
        assert!(state.history.is_empty());
        assert_eq!(state.arena.commands.len(), params.commands_per_turn as usize);
    }

    #[test]
    fn init_rejects_bad_params() {
        let params = TuningParams {
            player_base_power: 0,
            ..TuningParams::default()
        };
        let rng = PcgRng;
        let engine = BattleEngine::<EmotionRules>::new(BattleEnv::new(&params, &rng));
        assert!(matches!(
            engine.init(),
            Err(ParamsError::MustBePositive { .. })
        ));
    }

    #[test]
    fn turns_append_history() {
        let params = TuningParams::default();
        let rng = PcgRng;
        let engine = BattleEngine::<EmotionRules>::new(BattleEnv::new(&params, &rng));
        let state = engine.init().unwrap();
        let state = engine.execute_action(&state, Emotion::Rage, Some(Emotion::Grief));
        let state = engine.execute_action(&state, Emotion::Terror, None);
        assert_eq!(state.current_turn, 2);
        assert_eq!(state.history.len(), 2);
        assert_eq!(state.history[0].turn, 1);
        assert_eq!(state.history[1].turn, 2);
    }

    #[test]
    fn command_boundary_rejects_unknown_ids() {
        let params = TuningParams::default();
        let rng = PcgRng;
        let engine = BattleEngine::<ClassicRules>::new(BattleEnv::new(&params, &rng));
        let state = engine.init().unwrap();
        let err = engine
            .execute_command(&state, "dance", Some("attack"))
            .unwrap_err();
        assert_eq!(err.id, "dance");
        assert!(engine.execute_command(&state, "attack", Some("rage")).is_err());

        let next = engine.execute_command(&state, "ATTACK", Some("appeal")).unwrap();
        assert_eq!(next.history[0].player_action, ClassicAction::Attack);
    }

    #[test]
    fn knockout_ends_the_battle() {
        let params = TuningParams {
            enemy_max_hp: 100,
            ..TuningParams::default()
        };
        let rng = PcgRng;
        let engine = BattleEngine::<ClassicRules>::new(BattleEnv::new(&params, &rng));
        let state = engine.init().unwrap();
        let state =
            engine.execute_action(&state, ClassicAction::Attack, Some(ClassicAction::Appeal));
        assert_eq!(state.enemy.hp(), 0);
        assert_eq!(state.phase(), BattlePhase::Ended(Winner::Player));
        assert!(is_battle_over(&state));

        let after = engine.execute_action(&state, ClassicAction::Attack, None);
        assert_eq!(after, state);
    }

    #[test]
    fn turn_limit_compares_ratios() {
        let full = Vitals::new(1000, 100);
        let half = Vitals {
            hp: 250,
            max_hp: 500,
            base_power: 100,
        };
        let player = crate::ruleset::EmotionCombatant {
            vitals: full.damaged(400),
            effects: Default::default(),
        };
        let enemy = crate::ruleset::EmotionCombatant {
            vitals: half,
            effects: Default::default(),
        };
        assert_eq!(evaluate_winner(&player, &enemy, 5, 0), Winner::None);
        assert_eq!(evaluate_winner(&player, &enemy, 4, 5), Winner::None);
        assert_eq!(evaluate_winner(&player, &enemy, 5, 5), Winner::Player);

        let even = crate::ruleset::EmotionCombatant {
            vitals: full.damaged(500),
            effects: Default::default(),
        };
        assert_eq!(evaluate_winner(&even, &enemy, 5, 5), Winner::Draw);
    }

    #[test]
    fn double_knockout_draws() {
        let down = crate::ruleset::ClassicCombatant {
            vitals: Vitals::new(10, 1).damaged(10),
            fan_rate: 0.0,
            anti_gauge: Default::default(),
        };
        assert_eq!(evaluate_winner(&down, &down, 3, 0), Winner::Draw);
    }
}
