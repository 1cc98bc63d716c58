//! Sources of player intent.
//!
//! The enemy is always driven by a [`battle_core::Strategy`]; the player side
//! takes its actions from an [`ActionProvider`] whenever a turn is requested
//! without an explicit player action (`auto` commands, auto-play).
use battle_core::{
    BattleEnv, BattleState, InvalidActionError, Ruleset, Side, parse_action, random_action,
};

/// Trait for providing the player's action based on the current battle state.
///
/// Implementations must be deterministic: a provider is consulted again
/// after a restart and must make the same choices for the same state.
pub trait ActionProvider<R: Ruleset> {
    fn provide_action(&self, state: &BattleState<R>, env: &BattleEnv<'_>) -> R::Action;
}

/// Plays a fixed list of actions, repeating it from the start when exhausted.
#[derive(Clone, Debug)]
pub struct ScriptedProvider<R: Ruleset> {
    actions: Vec<R::Action>,
}

impl<R: Ruleset> ScriptedProvider<R> {
    /// An empty script always plays the first action of the cycle.
    pub fn new(actions: Vec<R::Action>) -> Self {
        Self { actions }
    }

    /// Parses a script of action ids of rule-set `R`.
    pub fn parse<S: AsRef<str>>(ids: &[S]) -> Result<Self, InvalidActionError> {
        let actions = ids
            .iter()
            .map(|id| parse_action::<R>(id.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(actions))
    }

    pub fn actions(&self) -> &[R::Action] {
        &self.actions
    }
}

impl<R: Ruleset> ActionProvider<R> for ScriptedProvider<R> {
    fn provide_action(&self, state: &BattleState<R>, _env: &BattleEnv<'_>) -> R::Action {
        use battle_core::CycleAction;

        if self.actions.is_empty() {
            return R::Action::CYCLE[0];
        }
        self.actions[state.current_turn as usize % self.actions.len()]
    }
}

/// Seeded uniform pick, reproducible from the battle seed.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomProvider;

impl<R: Ruleset> ActionProvider<R> for RandomProvider {
    fn provide_action(&self, state: &BattleState<R>, env: &BattleEnv<'_>) -> R::Action {
        random_action(state, Side::Player, env)
    }
}

/// Provider for a script of action ids: scripted when non-empty, random otherwise.
pub fn from_script<R: Ruleset, S: AsRef<str>>(
    ids: &[S],
) -> Result<Box<dyn ActionProvider<R>>, InvalidActionError> {
    if ids.is_empty() {
        Ok(Box::new(RandomProvider))
    } else {
        Ok(Box::new(ScriptedProvider::<R>::parse(ids)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{BattleEngine, ClassicAction, ClassicRules, PcgRng, TuningParams};

    #[test]
    fn script_repeats_in_order() {
        let params = TuningParams::default();
        let rng = PcgRng;
        let env = BattleEnv::new(&params, &rng);
        let mut state = BattleEngine::<ClassicRules>::new(env).init().unwrap();
        let provider = ScriptedProvider::<ClassicRules>::parse(&["appeal", "Guard"]).unwrap();

        let picks: Vec<_> = (0..4)
            .map(|turn| {
                state.current_turn = turn;
                provider.provide_action(&state, &env)
            })
            .collect();
        assert_eq!(
            picks,
            [
                ClassicAction::Appeal,
                ClassicAction::Guard,
                ClassicAction::Appeal,
                ClassicAction::Guard
            ]
        );
    }

    #[test]
    fn script_rejects_foreign_actions() {
        let err = ScriptedProvider::<ClassicRules>::parse(&["attack", "rage"]).unwrap_err();
        assert_eq!(err.id, "rage");
    }

    #[test]
    fn empty_script_means_random() {
        let params = TuningParams::default();
        let rng = PcgRng;
        let env = BattleEnv::new(&params, &rng);
        let state = BattleEngine::<ClassicRules>::new(env).init().unwrap();
        let provider = from_script::<ClassicRules, &str>(&[]).unwrap();
        assert_eq!(
            provider.provide_action(&state, &env),
            random_action(&state, Side::Player, &env)
        );
    }
}
