//! Session configuration.
use battle_content::Lineup;
use battle_core::{RulesetKind, Strategy, TuningParams};

/// Everything needed to build a [`crate::SessionHandle`].
#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    pub ruleset: RulesetKind,
    /// Enemy AI strategy.
    pub strategy: Strategy,
    /// Player action ids, repeated in order. Empty means a seeded random pick.
    pub script: Vec<String>,
    pub params: TuningParams,
    /// Safety cap for auto-play, in turns.
    pub max_turns: u32,
}

impl SessionConfig {
    pub const DEFAULT_MAX_TURNS: u32 = 500;

    /// Session settings for a named line-up on top of `params`.
    pub fn from_lineup(lineup: &Lineup, params: &TuningParams) -> Self {
        Self {
            ruleset: lineup.ruleset,
            strategy: lineup.enemy,
            script: lineup.script.clone(),
            params: lineup.tune(params),
            max_turns: Self::DEFAULT_MAX_TURNS,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ruleset: RulesetKind::default(),
            strategy: Strategy::default(),
            script: Vec::new(),
            params: TuningParams::default(),
            max_turns: Self::DEFAULT_MAX_TURNS,
        }
    }
}
