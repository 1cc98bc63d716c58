//! Action identifiers for both rule-sets.
//!
//! Actions parse from case-insensitive snake_case ids at the presentation
//! boundary; everything past that point is typed.

use crate::combat::CycleAction;

/// Classic rule-set actions: attack ≻ appeal ≻ guard ≻ attack.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ClassicAction {
    /// Direct strike; strongest damage, raises the anti-gauge.
    Attack,
    /// Performance for the crowd; wins fans, calms the anti-gauge.
    Appeal,
    /// Defensive stance; deals nothing, shrinks incoming damage.
    Guard,
}

impl CycleAction for ClassicAction {
    const CYCLE: &'static [Self] = &[Self::Attack, Self::Appeal, Self::Guard];

    fn position(self) -> usize {
        self as usize
    }
}

/// Emotion rule-set actions: rage ≻ terror ≻ grief ≻ ecstasy ≻ rage.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Emotion {
    Rage,
    Terror,
    Grief,
    Ecstasy,
}

impl Emotion {
    pub const COUNT: usize = 4;
}

impl CycleAction for Emotion {
    const CYCLE: &'static [Self] = &[Self::Rage, Self::Terror, Self::Grief, Self::Ecstasy];

    fn position(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parses_case_insensitive_ids() {
        assert_eq!(ClassicAction::from_str("ATTACK"), Ok(ClassicAction::Attack));
        assert_eq!(Emotion::from_str("ecstasy"), Ok(Emotion::Ecstasy));
        assert!(Emotion::from_str("joy").is_err());
    }

    #[test]
    fn positions_match_cycle_order() {
        for (index, action) in ClassicAction::CYCLE.iter().enumerate() {
            assert_eq!(action.position(), index);
        }
        for (index, emotion) in Emotion::CYCLE.iter().enumerate() {
            assert_eq!(emotion.position(), index);
        }
    }
}
