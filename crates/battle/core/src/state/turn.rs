//! Immutable record of one resolved turn.

use bitflags::bitflags;

use crate::combat::Judgement;
use crate::economy::AudienceComposition;
use crate::ruleset::Ruleset;

bitflags! {
    /// Which resources a turn touched, so a presentation layer knows what to animate.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TurnChanges: u8 {
        const PLAYER_HP = 1 << 0;
        const ENEMY_HP  = 1 << 1;
        const FANS      = 1 << 2;
        const ANTI      = 1 << 3;
        const EFFECTS   = 1 << 4;
        const COMMENTS  = 1 << 5;
        const COMMANDS  = 1 << 6;
    }
}

/// One entry of the battle history.
///
/// Carries the inputs, every computed amount and full post-turn snapshots, so
/// a turn can be displayed without looking at any other state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = ""))]
pub struct TurnResult<R: Ruleset> {
    pub turn: u32,
    pub player_action: R::Action,
    pub enemy_action: R::Action,
    /// Player's perspective.
    pub judgement: Judgement,
    pub damage_to_enemy: u32,
    pub damage_to_player: u32,
    pub player_fan_delta: f64,
    pub enemy_fan_delta: f64,
    pub detail: R::Detail,
    pub changes: TurnChanges,
    pub message: String,

    pub player: R::Combatant,
    pub enemy: R::Combatant,
    pub audience: AudienceComposition,
    pub arena: R::Arena,
}

/// One-line narration of a turn's matchup and damage.
pub(crate) fn narrate(
    turn: u32,
    player_action: &dyn core::fmt::Display,
    enemy_action: &dyn core::fmt::Display,
    judgement: Judgement,
    damage_to_enemy: u32,
    damage_to_player: u32,
) -> String {
    let verdict = match judgement {
        Judgement::Win => "player wins the exchange",
        Judgement::Lose => "enemy wins the exchange",
        Judgement::Draw => "even exchange",
    };
    format!(
        "turn {turn}: {player_action} vs {enemy_action}, {verdict} \
         (enemy -{damage_to_enemy} hp, player -{damage_to_player} hp)"
    )
}
