//! Timed special effects for the emotion rule-set.
//!
//! An effect is created when an emotion's rule fires, stays active while its
//! duration is positive, and is pruned once the duration reaches zero or a
//! cleanse removes it.
//!
//! # Turn Lifecycle
//!
//! 1. Rules fire for non-losing actions ([`rules::rules_for`])
//! 2. Ticks resolve (poison, curse, regen) via [`ActiveEffects::resolve_ticks`]
//! 3. Every duration is decremented and expired entries pruned
//!    ([`ActiveEffects::advance`])

pub mod rules;

pub use rules::{EffectRule, EffectTarget, RuleList, rules_for};

use arrayvec::ArrayVec;

use crate::action::Emotion;
use crate::combat::{apply_damage, apply_healing};
use crate::config::TuningParams;

/// Types of special effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EffectKind {
    /// Owner's outgoing damage × (1 + m/100).
    Buff,
    /// Owner's outgoing damage × (1 − m/100).
    Debuff,
    /// Owner's incoming damage × (1 + m/100).
    DamageAmp,
    /// Owner loses `m` HP per tick.
    Poison,
    /// Owner loses `floor(max_hp × m / 100)` HP per tick.
    Curse,
    /// Owner heals `m` HP per tick.
    Regen,
}

impl EffectKind {
    /// Kinds removed by a cleanse.
    pub const fn is_harmful(self) -> bool {
        matches!(self, Self::Debuff | Self::Poison | Self::Curse)
    }
}

/// A single effect instance.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpecialEffect {
    pub kind: EffectKind,
    pub magnitude: f64,
    /// Turns remaining.
    pub duration: u32,
    /// Emotion whose rule created the effect.
    pub source: Emotion,
}

impl SpecialEffect {
    pub const fn new(kind: EffectKind, magnitude: f64, duration: u32, source: Emotion) -> Self {
        Self {
            kind,
            magnitude,
            duration,
            source,
        }
    }

    pub const fn is_expired(&self) -> bool {
        self.duration == 0
    }
}

/// HP movement caused by one round of ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickOutcome {
    /// HP actually lost to poison and curse.
    pub damage: u32,
    /// HP actually restored by regen.
    pub healing: u32,
}

impl TickOutcome {
    pub const fn is_empty(&self) -> bool {
        self.damage == 0 && self.healing == 0
    }
}

/// Effects currently attached to one combatant.
///
/// Several instances of the same kind coexist and stack. The list has a fixed
/// capacity; effects added beyond it are dropped.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffects {
    effects: ArrayVec<SpecialEffect, { TuningParams::MAX_ACTIVE_EFFECTS }>,
}

impl ActiveEffects {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpecialEffect> {
        self.effects.iter()
    }

    pub fn as_slice(&self) -> &[SpecialEffect] {
        &self.effects
    }

    pub fn count(&self, kind: EffectKind) -> usize {
        self.effects.iter().filter(|e| e.kind == kind).count()
    }

    /// Attaches an effect. Returns false if it was dropped (list full or zero duration).
    pub fn add(&mut self, effect: SpecialEffect) -> bool {
        if effect.is_expired() {
            return false;
        }
        self.effects.try_push(effect).is_ok()
    }

    /// Multiplier on the owner's outgoing damage: Buff and Debuff.
    pub fn outgoing_multiplier(&self) -> f64 {
        self.amplification(EffectKind::Buff) * self.reduction(EffectKind::Debuff)
    }

    /// Multiplier on the owner's incoming damage: DamageAmp.
    pub fn incoming_multiplier(&self) -> f64 {
        self.amplification(EffectKind::DamageAmp)
    }

    /// Product of `(1 + m/100)` over every instance of `kind`.
    fn amplification(&self, kind: EffectKind) -> f64 {
        self.effects
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| 1.0 + e.magnitude / 100.0)
            .product()
    }

    /// Product of `(1 − m/100)` over every instance of `kind`, floored at zero.
    fn reduction(&self, kind: EffectKind) -> f64 {
        let factor: f64 = self
            .effects
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| (1.0 - e.magnitude / 100.0).max(0.0))
            .product();
        factor.max(0.0)
    }

    /// Resolves one round of ticks against `hp`.
    ///
    /// Damage (poison, curse) lands first. Regen then heals up to `max_hp`,
    /// unless the damage left the owner at zero HP.
    pub fn resolve_ticks(&self, hp: u32, max_hp: u32) -> (u32, TickOutcome) {
        let mut raw_damage: u32 = 0;
        let mut raw_healing: u32 = 0;
        for effect in &self.effects {
            let amount = match effect.kind {
                EffectKind::Poison | EffectKind::Regen => effect.magnitude,
                EffectKind::Curse => max_hp as f64 * effect.magnitude / 100.0,
                _ => continue,
            };
            let amount = if amount.is_finite() && amount > 0.0 {
                amount.floor() as u32
            } else {
                0
            };
            if effect.kind == EffectKind::Regen {
                raw_healing = raw_healing.saturating_add(amount);
            } else {
                raw_damage = raw_damage.saturating_add(amount);
            }
        }

        let damaged = apply_damage(hp, raw_damage);
        let healed = if damaged == 0 {
            0
        } else {
            apply_healing(damaged, raw_healing, max_hp)
        };

        let outcome = TickOutcome {
            damage: hp - damaged,
            healing: healed.saturating_sub(damaged),
        };
        (healed, outcome)
    }

    /// Decrements every duration and prunes expired effects.
    ///
    /// Returns how many effects expired.
    pub fn advance(&mut self) -> u32 {
        for effect in &mut self.effects {
            effect.duration = effect.duration.saturating_sub(1);
        }
        let before = self.effects.len();
        self.effects.retain(|e| !e.is_expired());
        (before - self.effects.len()) as u32
    }

    /// Removes every harmful effect. Returns how many were removed.
    pub fn cleanse(&mut self) -> u32 {
        let before = self.effects.len();
        self.effects.retain(|e| !e.kind.is_harmful());
        (before - self.effects.len()) as u32
    }
}
