//! Audience commands and the player's compliance with them.

use arrayvec::ArrayVec;

use crate::action::ClassicAction;
use crate::combat::CycleAction;
use crate::config::TuningParams;
use crate::env::{BattleEnv, RollContext, compute_seed};

/// Outstanding commands for one turn.
pub type Commands = ArrayVec<AudienceCommand, { TuningParams::MAX_COMMANDS }>;

/// Actor id used when the audience itself rolls.
const AUDIENCE_ACTOR: u32 = 2;

/// A per-turn instruction the player is scored against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AudienceCommand {
    /// The audience wants this action.
    Demand(ClassicAction),
    /// The audience does not want this action.
    Forbid(ClassicAction),
}

impl AudienceCommand {
    /// Scores the player's chosen action against this command.
    pub fn evaluate(&self, chosen: ClassicAction) -> Compliance {
        let followed = match *self {
            Self::Demand(action) => chosen == action,
            Self::Forbid(action) => chosen != action,
        };
        if followed {
            Compliance::Followed
        } else {
            Compliance::Defied
        }
    }

    pub fn target(&self) -> ClassicAction {
        match *self {
            Self::Demand(action) | Self::Forbid(action) => action,
        }
    }
}

impl core::fmt::Display for AudienceCommand {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Demand(action) => write!(f, "{action}!"),
            Self::Forbid(action) => write!(f, "no {action}!"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Compliance {
    Followed,
    Defied,
}

/// Followed/defied counts over a turn's commands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComplianceTally {
    pub followed: u32,
    pub defied: u32,
}

impl ComplianceTally {
    pub fn from_slice(compliance: &[Compliance]) -> Self {
        compliance
            .iter()
            .fold(Self::default(), |mut tally, entry| {
                match entry {
                    Compliance::Followed => tally.followed += 1,
                    Compliance::Defied => tally.defied += 1,
                }
                tally
            })
    }
}

/// Scores `chosen` against every outstanding command.
pub fn evaluate_commands(
    commands: &[AudienceCommand],
    chosen: ClassicAction,
) -> ArrayVec<Compliance, { TuningParams::MAX_COMMANDS }> {
    commands.iter().map(|command| command.evaluate(chosen)).collect()
}

/// Generates the commands the player will be scored against on `turn`.
pub fn generate_commands(env: &BattleEnv<'_>, battle_seed: u64, turn: u32) -> Commands {
    let params = env.params();
    let rng = env.rng();
    let count = (params.commands_per_turn as usize).min(TuningParams::MAX_COMMANDS);

    (0..count as u32)
        .map(|index| {
            let target_seed = compute_seed(
                battle_seed,
                turn as u64,
                AUDIENCE_ACTOR,
                RollContext::CommandTarget.with_index(index),
            );
            let kind_seed = compute_seed(
                battle_seed,
                turn as u64,
                AUDIENCE_ACTOR,
                RollContext::CommandKind.with_index(index),
            );
            let cycle = ClassicAction::CYCLE;
            let target = cycle[rng.range(target_seed, 0, cycle.len() as u32 - 1) as usize];
            if rng.chance(kind_seed, params.forbid_chance_percent) {
                AudienceCommand::Forbid(target)
            } else {
                AudienceCommand::Demand(target)
            }
        })
        .collect()
}
