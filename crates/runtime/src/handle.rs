//! Rule-set selection at runtime.
use battle_core::{ClassicRules, EmotionRules, Ruleset, RulesetKind, Strategy, Winner};

use crate::config::SessionConfig;
use crate::error::Result;
use crate::providers;
use crate::session::{BattleSession, Outcome, TurnSummary};

/// A [`BattleSession`] under whichever rule-set the configuration names.
pub enum SessionHandle {
    Classic(BattleSession<ClassicRules>),
    Emotion(BattleSession<EmotionRules>),
}

macro_rules! with_session {
    ($handle:expr, $session:ident => $body:expr) => {
        match $handle {
            SessionHandle::Classic($session) => $body,
            SessionHandle::Emotion($session) => $body,
        }
    };
}

impl SessionHandle {
    /// Builds a session from `config`.
    ///
    /// # Errors
    ///
    /// Fails if the parameters are invalid or the script names an action the
    /// configured rule-set does not have.
    pub fn new(config: &SessionConfig) -> Result<Self> {
        let handle = match config.ruleset {
            RulesetKind::Classic => Self::Classic(build::<ClassicRules>(config)?),
            RulesetKind::Emotion => Self::Emotion(build::<EmotionRules>(config)?),
        };
        tracing::info!(
            ruleset = %config.ruleset,
            strategy = %config.strategy,
            seed = config.params.seed,
            scripted = !config.script.is_empty(),
            "session created"
        );
        Ok(handle)
    }

    pub fn kind(&self) -> RulesetKind {
        match self {
            Self::Classic(_) => RulesetKind::Classic,
            Self::Emotion(_) => RulesetKind::Emotion,
        }
    }

    pub fn strategy(&self) -> Strategy {
        with_session!(self, session => session.strategy())
    }

    pub fn current_turn(&self) -> u32 {
        with_session!(self, session => session.current_turn())
    }

    pub fn winner(&self) -> Winner {
        with_session!(self, session => session.winner())
    }

    pub fn is_over(&self) -> bool {
        with_session!(self, session => session.is_over())
    }

    /// See [`BattleSession::dispatch`].
    pub fn dispatch(&mut self, input: &str) -> Result<Outcome> {
        with_session!(self, session => session.dispatch(input))
    }

    /// See [`BattleSession::step`].
    pub fn step(&mut self) -> Outcome {
        with_session!(self, session => session.step())
    }

    /// See [`BattleSession::auto_play`].
    pub fn auto_play(
        &mut self,
        max_turns: u32,
        on_turn: impl FnMut(&TurnSummary),
    ) -> Result<Winner> {
        with_session!(self, session => session.auto_play(max_turns, on_turn))
    }

    pub fn digest(&self) -> Result<[u8; 32]> {
        with_session!(self, session => session.digest())
    }
}

fn build<R: Ruleset>(config: &SessionConfig) -> Result<BattleSession<R>> {
    let provider = providers::from_script::<R, _>(config.script.as_slice())?;
    BattleSession::new(config.params.clone(), config.strategy, provider)
}
