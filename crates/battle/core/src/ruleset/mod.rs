//! Rule-set hooks for the generic battle engine.
//!
//! Both rule-sets share one engine: judgement over an N-cycle, damage, turn
//! bookkeeping and win evaluation are generic, while the resource economy and
//! turn pipeline are supplied by a [`Ruleset`] implementation.
//!
//! - [`ClassicRules`]: attack/appeal/guard with fans, anti-gauge and audience commands
//! - [`EmotionRules`]: rage/terror/grief/ecstasy with the comment pool and special effects

pub mod classic;
pub mod emotion;

pub use classic::{ClassicArena, ClassicCombatant, ClassicDetail, ClassicRules};
pub use emotion::{AppliedRule, EmotionArena, EmotionCombatant, EmotionDetail, EmotionRules};

use core::fmt::{Debug, Display};
use core::hash::Hash;
use core::str::FromStr;

use crate::combat::CycleAction;
use crate::config::TuningParams;
use crate::env::BattleEnv;
use crate::error::InvalidActionError;
use crate::state::{BattleState, Combatant, Side, TurnResult};

/// Bounds every piece of rule-set data stored in a [`BattleState`] must meet.
#[cfg(feature = "serde")]
pub trait RulesetData:
    Clone + Debug + PartialEq + serde::Serialize + serde::de::DeserializeOwned
{
}

#[cfg(feature = "serde")]
impl<T> RulesetData for T where
    T: Clone + Debug + PartialEq + serde::Serialize + serde::de::DeserializeOwned
{
}

/// Bounds every piece of rule-set data stored in a [`BattleState`] must meet.
#[cfg(not(feature = "serde"))]
pub trait RulesetData: Clone + Debug + PartialEq {}

#[cfg(not(feature = "serde"))]
impl<T> RulesetData for T where T: Clone + Debug + PartialEq {}

/// A complete set of battle rules.
///
/// Implementations are zero-sized markers; all state lives in the associated
/// types. Every hook is a pure function of its arguments.
pub trait Ruleset: Clone + Copy + Debug + Default + PartialEq + Send + Sync + 'static {
    /// Id used in logs and error messages.
    const NAME: &'static str;

    type Action: CycleAction + Hash + Display + FromStr + RulesetData;
    type Combatant: Combatant + RulesetData;
    /// Shared per-battle resources outside the combatants.
    type Arena: RulesetData;
    /// Output of the per-turn generation step.
    type Arrivals: Clone + Debug;
    /// Rule-set specific part of a [`TurnResult`].
    type Detail: RulesetData;

    /// Fresh combatant for `side`.
    fn spawn(side: Side, params: &TuningParams) -> Self::Combatant;

    /// Arena at turn 0, generated from the battle seed.
    fn open(env: &BattleEnv<'_>) -> Self::Arena;

    /// Generation step for the turn about to be resolved.
    ///
    /// This is the only place randomness enters a turn; everything downstream
    /// is a pure function of the state, the actions and these arrivals.
    fn draw(state: &BattleState<Self>, env: &BattleEnv<'_>) -> Self::Arrivals;

    /// Resolves one turn from the pre-turn `state`.
    fn process_turn(
        state: &BattleState<Self>,
        player_action: Self::Action,
        enemy_action: Self::Action,
        params: &TuningParams,
        arrivals: &Self::Arrivals,
    ) -> TurnResult<Self>;

    /// Base damage multiplier of an action.
    fn action_multiplier(action: Self::Action, params: &TuningParams) -> f64;

    /// Best guess at the player's next action from visible state.
    fn predict_player(state: &BattleState<Self>) -> Option<Self::Action>;

    /// Damage the enemy would expect to deal with `action`, ignoring the
    /// player's unknown choice.
    fn estimate_damage(
        state: &BattleState<Self>,
        action: Self::Action,
        params: &TuningParams,
    ) -> u32;
}

/// Rule-set selector used at the string boundary (config files, env vars).
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
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RulesetKind {
    #[default]
    Classic,
    Emotion,
}

/// Parses an action id of rule-set `R` (snake_case, case-insensitive).
pub fn parse_action<R: Ruleset>(id: &str) -> Result<R::Action, InvalidActionError> {
    id.trim()
        .parse()
        .map_err(|_| InvalidActionError::new(R::NAME, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ClassicAction, Emotion};

    #[test]
    fn parses_through_the_ruleset() {
        assert_eq!(
            parse_action::<ClassicRules>(" Guard "),
            Ok(ClassicAction::Guard)
        );
        assert_eq!(parse_action::<EmotionRules>("GRIEF"), Ok(Emotion::Grief));
    }

    #[test]
    fn kind_ids_match_ruleset_names() {
        assert_eq!(RulesetKind::Classic.as_ref(), ClassicRules::NAME);
        assert_eq!(RulesetKind::Emotion.as_ref(), EmotionRules::NAME);
        assert_eq!("EMOTION".parse::<RulesetKind>(), Ok(RulesetKind::Emotion));
    }

    #[test]
    fn rejects_ids_from_the_other_ruleset() {
        let err = parse_action::<ClassicRules>("rage").unwrap_err();
        assert_eq!(err, InvalidActionError::new("classic", "rage"));
        assert!(parse_action::<EmotionRules>("attack").is_err());
    }
}
