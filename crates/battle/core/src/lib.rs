//! Deterministic battle resolution shared by every front end.
//!
//! `battle-core` holds the canonical rules for both rule-sets and exposes pure
//! APIs: a turn is a function of the previous [`BattleState`], the two chosen
//! actions and the seeded generation step. All state transitions flow through
//! [`engine::BattleEngine`]; the runtime and client crates depend on the types
//! re-exported here.
pub mod action;
pub mod ai;
pub mod combat;
pub mod config;
pub mod economy;
pub mod effects;
pub mod engine;
pub mod env;
pub mod error;
pub mod ruleset;
pub mod state;

pub use action::{ClassicAction, Emotion};
pub use ai::{Strategy, decide, random_action};
pub use combat::{CycleAction, Judgement, compute_damage, counter, judge};
pub use config::{ParamsError, TuningParams};
pub use economy::{
    AntiGauge, AudienceCommand, AudienceComposition, Comment, CommentKind, ConsumedComments,
};
pub use effects::{ActiveEffects, EffectKind, SpecialEffect, TickOutcome};
pub use engine::{BattleEngine, evaluate_winner, is_battle_over};
pub use env::{BattleEnv, PcgRng, RngOracle};
pub use error::{BattleError, ErrorSeverity, InvalidActionError, UnknownStrategyError};
pub use ruleset::{
    ClassicArena, ClassicCombatant, ClassicDetail, ClassicRules, EmotionArena, EmotionCombatant,
    EmotionDetail, EmotionRules, Ruleset, RulesetKind, parse_action,
};
pub use state::{
    BattlePhase, BattleState, Combatant, Side, TurnChanges, TurnResult, Vitals, Winner,
};
