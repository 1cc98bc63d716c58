//! Combatant vitals shared by both rule-sets.

use crate::combat::{apply_damage, apply_healing};

/// HP and power of one combatant.
///
/// `hp` never leaves `[0, max_hp]`; every transition clamps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vitals {
    pub hp: u32,
    pub max_hp: u32,
    pub base_power: u32,
}

impl Vitals {
    /// Full-health vitals.
    pub const fn new(max_hp: u32, base_power: u32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            base_power,
        }
    }

    #[must_use]
    pub fn damaged(self, amount: u32) -> Self {
        Self {
            hp: apply_damage(self.hp, amount),
            ..self
        }
    }

    #[must_use]
    pub fn healed(self, amount: u32) -> Self {
        Self {
            hp: apply_healing(self.hp, amount, self.max_hp),
            ..self
        }
    }

    pub const fn is_down(&self) -> bool {
        self.hp == 0
    }
}

/// Read access to the vitals embedded in a rule-set's combatant state.
pub trait Combatant {
    fn vitals(&self) -> &Vitals;

    fn hp(&self) -> u32 {
        self.vitals().hp
    }

    fn max_hp(&self) -> u32 {
        self.vitals().max_hp
    }

    fn base_power(&self) -> u32 {
        self.vitals().base_power
    }

    fn is_down(&self) -> bool {
        self.vitals().is_down()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hp_stays_in_bounds() {
        let vitals = Vitals::new(100, 10);
        assert_eq!(vitals.damaged(150).hp, 0);
        assert!(vitals.damaged(150).is_down());
        assert_eq!(vitals.damaged(30).healed(500).hp, 100);
    }
}
