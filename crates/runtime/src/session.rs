//! Battle session: owns the state and turns commands into engine calls.
use battle_core::{
    BattleEngine, BattleEnv, BattleState, Combatant, Judgement, PcgRng, Ruleset, Strategy,
    TuningParams, TurnResult, Winner, parse_action,
};

use crate::command::Command;
use crate::error::{Result, RuntimeError};
use crate::providers::ActionProvider;

/// Rule-set independent view of one resolved turn.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnSummary {
    pub turn: u32,
    pub player_action: String,
    pub enemy_action: String,
    pub judgement: Judgement,
    pub damage_to_enemy: u32,
    pub damage_to_player: u32,
    pub player_hp: u32,
    pub enemy_hp: u32,
    pub player_fans: f64,
    pub enemy_fans: f64,
    pub message: String,
    /// Battle winner after this turn; [`Winner::None`] while it goes on.
    pub winner: Winner,
}

impl TurnSummary {
    fn new<R: Ruleset>(result: &TurnResult<R>, winner: Winner) -> Self {
        Self {
            turn: result.turn,
            player_action: result.player_action.to_string(),
            enemy_action: result.enemy_action.to_string(),
            judgement: result.judgement,
            damage_to_enemy: result.damage_to_enemy,
            damage_to_player: result.damage_to_player,
            player_hp: result.player.hp(),
            enemy_hp: result.enemy.hp(),
            player_fans: result.audience.player_fans,
            enemy_fans: result.audience.enemy_fans,
            message: result.message.clone(),
            winner,
        }
    }
}

/// What a command did to the session.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Turn(TurnSummary),
    Restarted,
    /// The battle had already ended; nothing changed.
    Ignored,
}

/// One battle under rule-set `R`.
///
/// The session is the only owner of the [`BattleState`]; every command
/// replaces it with the engine's next state.
pub struct BattleSession<R: Ruleset> {
    params: TuningParams,
    rng: PcgRng,
    strategy: Strategy,
    provider: Box<dyn ActionProvider<R>>,
    state: BattleState<R>,
}

impl<R: Ruleset> BattleSession<R> {
    /// Starts a battle.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Params`] if `params` fail validation.
    pub fn new(
        params: TuningParams,
        strategy: Strategy,
        provider: Box<dyn ActionProvider<R>>,
    ) -> Result<Self> {
        let rng = PcgRng;
        let state = BattleEngine::<R>::new(BattleEnv::new(&params, &rng))
            .with_strategy(strategy)
            .init()?;
        Ok(Self {
            params,
            rng,
            strategy,
            provider,
            state,
        })
    }

    fn engine(&self) -> BattleEngine<'_, R> {
        BattleEngine::new(BattleEnv::new(&self.params, &self.rng)).with_strategy(self.strategy)
    }

    pub fn state(&self) -> &BattleState<R> {
        &self.state
    }

    pub fn params(&self) -> &TuningParams {
        &self.params
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn current_turn(&self) -> u32 {
        self.state.current_turn
    }

    pub fn winner(&self) -> Winner {
        self.state.winner
    }

    pub fn is_over(&self) -> bool {
        battle_core::is_battle_over(&self.state)
    }

    /// Parses and executes one text command.
    ///
    /// # Errors
    ///
    /// Malformed commands and unknown action ids are rejected; the state is
    /// left untouched in that case.
    pub fn dispatch(&mut self, input: &str) -> Result<Outcome> {
        let command = input.parse::<Command>().inspect_err(|err| {
            tracing::warn!(ruleset = R::NAME, input, "rejected command: {err}");
        })?;
        self.execute(command)
    }

    /// Executes an already parsed command.
    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        match command {
            Command::Act { player, enemy } => {
                let parsed = parse_action::<R>(&player).and_then(|player| {
                    let enemy = enemy.as_deref().map(parse_action::<R>).transpose()?;
                    Ok((player, enemy))
                });
                let (player, enemy) = parsed.inspect_err(|err| {
                    tracing::warn!(ruleset = R::NAME, "rejected command: {err}");
                })?;
                Ok(self.play(player, enemy))
            }
            Command::Auto => Ok(self.step()),
            Command::Restart => {
                self.restart()?;
                Ok(Outcome::Restarted)
            }
        }
    }

    /// Resolves one turn with explicit actions; the AI picks a missing enemy action.
    pub fn play(&mut self, player: R::Action, enemy: Option<R::Action>) -> Outcome {
        if !self.state.is_active {
            tracing::warn!(
                ruleset = R::NAME,
                winner = %self.state.winner,
                "battle already over, ignoring turn"
            );
            return Outcome::Ignored;
        }

        let next = self.engine().execute_action(&self.state, player, enemy);
        self.state = next;

        match self.state.last_turn() {
            Some(result) => Outcome::Turn(TurnSummary::new(result, self.state.winner)),
            None => Outcome::Ignored,
        }
    }

    /// Resolves one turn with the player's action taken from the provider.
    pub fn step(&mut self) -> Outcome {
        let env = BattleEnv::new(&self.params, &self.rng);
        let player = self.provider.provide_action(&self.state, &env);
        self.play(player, None)
    }

    /// Discards the battle and starts again from the same parameters.
    pub fn restart(&mut self) -> Result<()> {
        let state = self.engine().reset()?;
        self.state = state;
        tracing::info!(ruleset = R::NAME, "session restarted");
        Ok(())
    }

    /// Plays provider turns until the battle ends.
    ///
    /// `on_turn` sees every resolved turn in order.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::TurnCapReached`] if the battle is still active
    /// after `max_turns` turns from the current one.
    pub fn auto_play(
        &mut self,
        max_turns: u32,
        mut on_turn: impl FnMut(&TurnSummary),
    ) -> Result<Winner> {
        let start = self.state.current_turn;
        while self.state.is_active {
            if self.state.current_turn - start >= max_turns {
                return Err(RuntimeError::TurnCapReached { max_turns });
            }
            if let Outcome::Turn(summary) = self.step() {
                on_turn(&summary);
            }
        }
        Ok(self.state.winner)
    }

    /// SHA-256 digest of the current state, history included.
    pub fn digest(&self) -> Result<[u8; 32]> {
        self.state.digest().map_err(RuntimeError::Digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{RandomProvider, ScriptedProvider};
    use battle_core::{ClassicAction, ClassicRules, EmotionRules};

    fn classic(script: &[&str]) -> BattleSession<ClassicRules> {
        BattleSession::new(
            TuningParams::default(),
            Strategy::Mirror,
            Box::new(ScriptedProvider::<ClassicRules>::parse(script).unwrap()),
        )
        .unwrap()
    }

    #[test]
    fn act_resolves_a_turn() {
        let mut session = classic(&["attack"]);
        let Outcome::Turn(summary) = session.dispatch("act attack appeal").unwrap() else {
            panic!("expected a turn");
        };
        assert_eq!(summary.turn, 1);
        assert_eq!(summary.player_action, "attack");
        assert_eq!(summary.enemy_action, "appeal");
        assert_eq!(summary.judgement, Judgement::Win);
        assert_eq!(summary.damage_to_enemy, 120);
        assert_eq!(summary.enemy_hp, 880);
        assert_eq!(summary.winner, Winner::None);
    }

    #[test]
    fn rejected_commands_leave_state_untouched() {
        let mut session = classic(&["attack"]);
        let before = session.state().clone();
        assert!(matches!(
            session.dispatch("act rage"),
            Err(RuntimeError::Action(_))
        ));
        assert!(matches!(
            session.dispatch("dance"),
            Err(RuntimeError::InvalidCommand { .. })
        ));
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn restart_returns_to_turn_zero() {
        let mut session = classic(&["attack"]);
        let fresh = session.state().clone();
        session.dispatch("auto").unwrap();
        session.dispatch("auto").unwrap();
        assert_eq!(session.current_turn(), 2);

        assert_eq!(session.dispatch("restart").unwrap(), Outcome::Restarted);
        assert_eq!(session.state(), &fresh);
    }

    #[test]
    fn ended_battle_ignores_turns() {
        let mut session = classic(&["attack"]);
        let winner = session.auto_play(100, |_| {}).unwrap();
        assert_ne!(winner, Winner::None);
        assert!(session.is_over());

        let before = session.state().clone();
        assert_eq!(session.play(ClassicAction::Attack, None), Outcome::Ignored);
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn auto_play_stops_at_the_cap() {
        let mut session = BattleSession::<EmotionRules>::new(
            TuningParams::default(),
            Strategy::Normal,
            Box::new(RandomProvider),
        )
        .unwrap();
        let mut seen = 0;
        let err = session.auto_play(1, |_| seen += 1).unwrap_err();
        assert!(matches!(err, RuntimeError::TurnCapReached { max_turns: 1 }));
        assert_eq!(seen, 1);
        assert_eq!(session.current_turn(), 1);
    }

    #[test]
    fn invalid_params_fail_to_start() {
        let params = TuningParams {
            player_max_hp: 0,
            ..TuningParams::default()
        };
        let result =
            BattleSession::<ClassicRules>::new(params, Strategy::Normal, Box::new(RandomProvider));
        assert!(matches!(result, Err(RuntimeError::Params(_))));
    }
}
