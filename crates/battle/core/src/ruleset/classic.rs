//! Classic rule-set: attack ≻ appeal ≻ guard with the fan economy.
//!
//! # Turn Pipeline
//!
//! 1. Judge the matchup (player perspective, enemy is the inverse)
//! 2. Score the player's action against the outstanding audience commands
//! 3. Damage both directions from the pre-turn state
//! 4. Fan deltas and the anti-gauge delta
//! 5. Apply: HP clamp, audience renormalization, gauge clamp
//! 6. Replace the commands with the ones drawn for the next turn
//!
//! The enemy has no anti-gauge and is never issued commands, so its fan delta
//! carries no compliance term and no penalty.

use arrayvec::ArrayVec;

use crate::action::ClassicAction;
use crate::combat::{Judgement, compute_damage, fan_rate_bonus, judge};
use crate::config::TuningParams;
use crate::economy::{
    AntiGauge, AntiLevel, AudienceCommand, Commands, Compliance, ComplianceTally,
    apply_to_composition, compute_anti_delta, compute_fan_delta, evaluate_commands,
    generate_commands,
};
use crate::env::BattleEnv;
use crate::state::{BattleState, Combatant, Side, TurnChanges, TurnResult, Vitals, narrate};

use super::Ruleset;

/// Marker for the classic rule-set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ClassicRules;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassicCombatant {
    pub vitals: Vitals,
    /// Mirrors this side's audience share after every turn.
    pub fan_rate: f64,
    /// Only the player's gauge ever moves.
    pub anti_gauge: AntiGauge,
}

impl Combatant for ClassicCombatant {
    fn vitals(&self) -> &Vitals {
        &self.vitals
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassicArena {
    /// Commands the player is scored against on the next turn.
    pub commands: Commands,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassicDetail {
    /// Commands that were outstanding this turn.
    pub commands: Commands,
    pub compliance: ArrayVec<Compliance, { TuningParams::MAX_COMMANDS }>,
    pub tally: ComplianceTally,
    pub anti_delta: i32,
    /// Gauge level the turn's penalties were read from.
    pub anti_level: AntiLevel,
}

impl Ruleset for ClassicRules {
    const NAME: &'static str = "classic";

    type Action = ClassicAction;
    type Combatant = ClassicCombatant;
    type Arena = ClassicArena;
    type Arrivals = Commands;
    type Detail = ClassicDetail;

    fn spawn(side: Side, params: &TuningParams) -> ClassicCombatant {
        match side {
            Side::Player => ClassicCombatant {
                vitals: Vitals::new(params.player_max_hp, params.player_base_power),
                fan_rate: params.initial_player_fans,
                anti_gauge: AntiGauge::new(params.initial_anti),
            },
            Side::Enemy => ClassicCombatant {
                vitals: Vitals::new(params.enemy_max_hp, params.enemy_base_power),
                fan_rate: params.initial_enemy_fans,
                anti_gauge: AntiGauge::default(),
            },
        }
    }

    fn open(env: &BattleEnv<'_>) -> ClassicArena {
        ClassicArena {
            commands: generate_commands(env, env.params().seed, 1),
        }
    }

    fn draw(state: &BattleState<Self>, env: &BattleEnv<'_>) -> Commands {
        // commands for the turn after the one being resolved
        generate_commands(env, state.seed, state.current_turn + 2)
    }

    fn process_turn(
        state: &BattleState<Self>,
        player_action: ClassicAction,
        enemy_action: ClassicAction,
        params: &TuningParams,
        arrivals: &Commands,
    ) -> TurnResult<Self> {
        let turn = state.current_turn + 1;
        let player_judgement = judge(player_action, enemy_action);
        let enemy_judgement = player_judgement.invert();

        let compliance = evaluate_commands(&state.arena.commands, player_action);
        let tally = ComplianceTally::from_slice(&compliance);
        let anti_level = state.player.anti_gauge.level(&params.anti_thresholds);

        let player_bonus = fan_tier(&state.player, params) * anti_level.power_penalty(params);
        let damage_to_enemy = compute_damage(
            Self::action_multiplier(player_action, params),
            state.player.base_power(),
            player_bonus,
            guard_mitigation(enemy_action, params),
            player_judgement,
        );
        let damage_to_player = compute_damage(
            Self::action_multiplier(enemy_action, params),
            state.enemy.base_power(),
            fan_tier(&state.enemy, params),
            guard_mitigation(player_action, params),
            enemy_judgement,
        );

        let player_fan_delta = compute_fan_delta(
            player_judgement,
            action_fan_bonus(player_action, params),
            tally,
            anti_level.fan_penalty(params),
            params,
        );
        let enemy_fan_delta = compute_fan_delta(
            enemy_judgement,
            action_fan_bonus(enemy_action, params),
            ComplianceTally::default(),
            1.0,
            params,
        );
        let anti_delta = compute_anti_delta(player_action, player_judgement, tally, params);

        let audience = apply_to_composition(
            &state.audience,
            player_fan_delta,
            enemy_fan_delta,
            params.neutral_floor,
        );
        let player = ClassicCombatant {
            vitals: state.player.vitals.damaged(damage_to_player),
            fan_rate: audience.player_fans,
            anti_gauge: state.player.anti_gauge.apply(anti_delta),
        };
        let enemy = ClassicCombatant {
            vitals: state.enemy.vitals.damaged(damage_to_enemy),
            fan_rate: audience.enemy_fans,
            anti_gauge: state.enemy.anti_gauge,
        };
        let arena = ClassicArena {
            commands: arrivals.clone(),
        };

        let mut changes = TurnChanges::empty();
        changes.set(TurnChanges::PLAYER_HP, player.vitals != state.player.vitals);
        changes.set(TurnChanges::ENEMY_HP, enemy.vitals != state.enemy.vitals);
        changes.set(TurnChanges::FANS, audience != state.audience);
        changes.set(TurnChanges::ANTI, player.anti_gauge != state.player.anti_gauge);
        changes.set(TurnChanges::COMMANDS, arena != state.arena);

        let mut message = narrate(
            turn,
            &player_action,
            &enemy_action,
            player_judgement,
            damage_to_enemy,
            damage_to_player,
        );
        if !state.arena.commands.is_empty() {
            message.push_str(&format!(
                "; audience commands followed {}, defied {}",
                tally.followed, tally.defied
            ));
        }

        TurnResult {
            turn,
            player_action,
            enemy_action,
            judgement: player_judgement,
            damage_to_enemy,
            damage_to_player,
            player_fan_delta,
            enemy_fan_delta,
            detail: ClassicDetail {
                commands: state.arena.commands.clone(),
                compliance,
                tally,
                anti_delta,
                anti_level,
            },
            changes,
            message,
            player,
            enemy,
            audience,
            arena,
        }
    }

    fn action_multiplier(action: ClassicAction, params: &TuningParams) -> f64 {
        match action {
            ClassicAction::Attack => params.attack_multiplier,
            ClassicAction::Appeal => params.appeal_multiplier,
            ClassicAction::Guard => params.guard_multiplier,
        }
    }

    /// The first thing the audience demands.
    fn predict_player(state: &BattleState<Self>) -> Option<ClassicAction> {
        state.arena.commands.iter().find_map(|command| match command {
            AudienceCommand::Demand(action) => Some(*action),
            AudienceCommand::Forbid(_) => None,
        })
    }

    fn estimate_damage(
        state: &BattleState<Self>,
        action: ClassicAction,
        params: &TuningParams,
    ) -> u32 {
        compute_damage(
            Self::action_multiplier(action, params),
            state.enemy.base_power(),
            fan_tier(&state.enemy, params),
            1.0,
            Judgement::Win,
        )
    }
}

fn fan_tier(combatant: &ClassicCombatant, params: &TuningParams) -> f64 {
    fan_rate_bonus(
        combatant.fan_rate,
        &params.fan_rate_thresholds,
        &params.fan_rate_multipliers,
    )
}

/// Damage factor applied to a defender who chose `defender_action`.
fn guard_mitigation(defender_action: ClassicAction, params: &TuningParams) -> f64 {
    if defender_action == ClassicAction::Guard {
        params.guard_damage_factor
    } else {
        1.0
    }
}

fn action_fan_bonus(action: ClassicAction, params: &TuningParams) -> f64 {
    match action {
        ClassicAction::Attack => params.attack_fan_bonus,
        ClassicAction::Appeal => params.appeal_fan_bonus,
        ClassicAction::Guard => params.guard_fan_bonus,
    }
}
