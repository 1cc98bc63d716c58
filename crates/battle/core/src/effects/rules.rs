//! Per-emotion effect rules.
//!
//! Each emotion maps to a short list of hooks that fire after direct damage
//! when the emotion did not lose its matchup. Magnitudes and durations come
//! from [`TuningParams`].

use arrayvec::ArrayVec;

use crate::action::Emotion;
use crate::config::TuningParams;

use super::EffectKind;

pub type RuleList = ArrayVec<EffectRule, { TuningParams::MAX_RULES_PER_ACTION }>;

/// Who an applied effect lands on, relative to the side whose rule fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectTarget {
    Own,
    Opponent,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectRule {
    /// Attach a timed effect.
    Apply {
        target: EffectTarget,
        kind: EffectKind,
        magnitude: f64,
        duration: u32,
    },
    /// Remove the oldest comments from the pool.
    ScatterComments { count: u32 },
    /// Heal a percentage of the damage dealt this turn.
    Drain { percent: f64 },
    /// Remove the owner's harmful effects.
    Cleanse,
}

/// Rules fired by `emotion`, in application order.
pub fn rules_for(emotion: Emotion, params: &TuningParams) -> RuleList {
    let mut rules = RuleList::new();
    match emotion {
        Emotion::Rage => {
            rules.push(EffectRule::Apply {
                target: EffectTarget::Own,
                kind: EffectKind::Buff,
                magnitude: params.rage_buff_magnitude,
                duration: params.rage_buff_turns,
            });
            rules.push(EffectRule::Apply {
                target: EffectTarget::Opponent,
                kind: EffectKind::DamageAmp,
                magnitude: params.rage_amp_magnitude,
                duration: params.rage_amp_turns,
            });
        }
        Emotion::Terror => {
            rules.push(EffectRule::Apply {
                target: EffectTarget::Opponent,
                kind: EffectKind::Debuff,
                magnitude: params.terror_debuff_magnitude,
                duration: params.terror_debuff_turns,
            });
            rules.push(EffectRule::ScatterComments {
                count: params.terror_scatter,
            });
        }
        Emotion::Grief => {
            rules.push(EffectRule::Apply {
                target: EffectTarget::Opponent,
                kind: EffectKind::Poison,
                magnitude: params.grief_poison_magnitude,
                duration: params.grief_poison_turns,
            });
            rules.push(EffectRule::Apply {
                target: EffectTarget::Opponent,
                kind: EffectKind::Curse,
                magnitude: params.grief_curse_magnitude,
                duration: params.grief_curse_turns,
            });
        }
        Emotion::Ecstasy => {
            rules.push(EffectRule::Drain {
                percent: params.ecstasy_drain_percent,
            });
            rules.push(EffectRule::Apply {
                target: EffectTarget::Own,
                kind: EffectKind::Regen,
                magnitude: params.ecstasy_regen_magnitude,
                duration: params.ecstasy_regen_turns,
            });
            rules.push(EffectRule::Cleanse);
        }
    }
    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::CycleAction;

    #[test]
    fn every_emotion_has_rules() {
        let params = TuningParams::default();
        for &emotion in Emotion::CYCLE {
            assert!(!rules_for(emotion, &params).is_empty());
        }
    }

    #[test]
    fn rage_buffs_self_and_amplifies_opponent() {
        let params = TuningParams::default();
        let rules = rules_for(Emotion::Rage, &params);
        assert_eq!(
            rules[0],
            EffectRule::Apply {
                target: EffectTarget::Own,
                kind: EffectKind::Buff,
                magnitude: 25.0,
                duration: 3,
            }
        );
        assert_eq!(
            rules[1],
            EffectRule::Apply {
                target: EffectTarget::Opponent,
                kind: EffectKind::DamageAmp,
                magnitude: 10.0,
                duration: 2,
            }
        );
    }

    #[test]
    fn ecstasy_drains_regens_and_cleanses() {
        let params = TuningParams::default();
        let rules = rules_for(Emotion::Ecstasy, &params);
        assert_eq!(rules.len(), 3);
        assert!(matches!(rules[0], EffectRule::Drain { percent } if percent == 30.0));
        assert_eq!(rules[2], EffectRule::Cleanse);
    }
}
