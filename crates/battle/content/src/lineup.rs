//! Named battle line-ups.

use battle_core::{RulesetKind, Strategy, TuningParams};

/// A preset match: which rules apply, how the enemy plays and, optionally,
/// a fixed script for the player.
///
/// Script entries are action ids of the line-up's rule-set; they are
/// validated when a session is built from the line-up.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lineup {
    pub name: String,
    pub ruleset: RulesetKind,
    pub enemy: Strategy,
    /// Player actions, repeated in order. Empty means a seeded random pick each turn.
    #[cfg_attr(feature = "serde", serde(default))]
    pub script: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: Option<u64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub turn_limit: Option<u32>,
}

impl Lineup {
    pub fn new(name: impl Into<String>, ruleset: RulesetKind, enemy: Strategy) -> Self {
        Self {
            name: name.into(),
            ruleset,
            enemy,
            script: Vec::new(),
            seed: None,
            turn_limit: None,
        }
    }

    /// `params` with this line-up's seed and turn limit applied.
    pub fn tune(&self, params: &TuningParams) -> TuningParams {
        let mut tuned = params.clone();
        if let Some(seed) = self.seed {
            tuned.seed = seed;
        }
        if let Some(turn_limit) = self.turn_limit {
            tuned.turn_limit = turn_limit;
        }
        tuned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tune_overrides_only_what_is_set() {
        let base = TuningParams::default();
        let mut lineup = Lineup::new("duel", RulesetKind::Classic, Strategy::Mirror);
        assert_eq!(lineup.tune(&base), base);

        lineup.seed = Some(9);
        let tuned = lineup.tune(&base);
        assert_eq!(tuned.seed, 9);
        assert_eq!(tuned.turn_limit, base.turn_limit);
    }
}
