//! Emotion rule-set: rage ≻ terror ≻ grief ≻ ecstasy with the comment pool
//! and special effects.
//!
//! # Turn Pipeline
//!
//! 1. Judge the matchup (non-adjacent emotions draw)
//! 2. Consume the player's matching comments and superchats from the pre-turn pool
//! 3. Damage both directions from pre-turn effects
//! 4. Apply direct damage
//! 5. Fire effect rules for each side that did not lose, player first;
//!    new effects are attached immediately
//! 6. Resolve ticks, decrement durations, prune expired effects
//! 7. Fan deltas from the outcome alone
//! 8. Append this turn's new comments, evicting the oldest beyond the cap
//!
//! A poison created this turn therefore ticks this turn, and every new effect
//! loses one turn of duration before the next turn's damage is computed.

use crate::action::Emotion;
use crate::combat::{CycleAction, Judgement, compute_damage, judge};
use crate::config::TuningParams;
use crate::economy::comments::{self, Comment, ConsumedComments};
use crate::economy::{ComplianceTally, apply_to_composition, compute_fan_delta};
use crate::effects::{
    ActiveEffects, EffectRule, EffectTarget, SpecialEffect, TickOutcome, rules_for,
};
use crate::env::BattleEnv;
use crate::state::{BattleState, Combatant, Side, TurnChanges, TurnResult, Vitals, narrate};

use super::Ruleset;

/// Marker for the emotion rule-set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct EmotionRules;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmotionCombatant {
    pub vitals: Vitals,
    pub effects: ActiveEffects,
}

impl Combatant for EmotionCombatant {
    fn vitals(&self) -> &Vitals {
        &self.vitals
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmotionArena {
    /// Oldest first, never longer than `comment_pool_cap`.
    pub comments: Vec<Comment>,
    pub next_comment_id: u64,
}

/// A rule that fired during a turn.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppliedRule {
    pub source: Side,
    pub rule: EffectRule,
    /// Rule-dependent result: 1 if an applied effect was attached (0 if the
    /// target's list was full), comments scattered, HP drained, or effects
    /// cleansed.
    pub amount: u32,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmotionDetail {
    /// Comments the player's emotion consumed.
    pub consumed: ConsumedComments,
    /// `1 + units × comment_bonus_per_count`.
    pub comment_bonus: f64,
    pub applied: Vec<AppliedRule>,
    pub player_tick: TickOutcome,
    pub enemy_tick: TickOutcome,
    /// Effects that ran out this turn, both sides.
    pub expired: u32,
}

impl Ruleset for EmotionRules {
    const NAME: &'static str = "emotion";

    type Action = Emotion;
    type Combatant = EmotionCombatant;
    type Arena = EmotionArena;
    type Arrivals = Vec<Comment>;
    type Detail = EmotionDetail;

    fn spawn(side: Side, params: &TuningParams) -> EmotionCombatant {
        let vitals = match side {
            Side::Player => Vitals::new(params.player_max_hp, params.player_base_power),
            Side::Enemy => Vitals::new(params.enemy_max_hp, params.enemy_base_power),
        };
        EmotionCombatant {
            vitals,
            effects: ActiveEffects::empty(),
        }
    }

    fn open(env: &BattleEnv<'_>) -> EmotionArena {
        let params = env.params();
        let opening = comments::generate(env, params.seed, 0, 0, params.initial_comments);
        EmotionArena {
            comments: comments::add_to_pool(&[], &opening, params.comment_pool_cap as usize),
            next_comment_id: params.initial_comments as u64,
        }
    }

    fn draw(state: &BattleState<Self>, env: &BattleEnv<'_>) -> Vec<Comment> {
        comments::generate(
            env,
            state.seed,
            state.current_turn + 1,
            state.arena.next_comment_id,
            env.params().comments_per_turn,
        )
    }

    fn process_turn(
        state: &BattleState<Self>,
        player_action: Emotion,
        enemy_action: Emotion,
        params: &TuningParams,
        arrivals: &Vec<Comment>,
    ) -> TurnResult<Self> {
        let turn = state.current_turn + 1;
        let player_judgement = judge(player_action, enemy_action);
        let enemy_judgement = player_judgement.invert();

        let consumption = comments::consume(&state.arena.comments, player_action);
        let units = consumption.consumed.units(params.superchat_weight);
        let comment_bonus = 1.0 + units as f64 * params.comment_bonus_per_count;

        let damage_to_enemy = compute_damage(
            Self::action_multiplier(player_action, params),
            state.player.base_power(),
            comment_bonus * matchup_multiplier(player_judgement, params),
            state.player.effects.outgoing_multiplier() * state.enemy.effects.incoming_multiplier(),
            player_judgement,
        );
        let damage_to_player = compute_damage(
            Self::action_multiplier(enemy_action, params),
            state.enemy.base_power(),
            matchup_multiplier(enemy_judgement, params),
            state.enemy.effects.outgoing_multiplier() * state.player.effects.incoming_multiplier(),
            enemy_judgement,
        );

        let mut player = EmotionCombatant {
            vitals: state.player.vitals.damaged(damage_to_player),
            effects: state.player.effects.clone(),
        };
        let mut enemy = EmotionCombatant {
            vitals: state.enemy.vitals.damaged(damage_to_enemy),
            effects: state.enemy.effects.clone(),
        };

        let mut triggers = Triggers {
            pool: consumption.remaining,
            applied: Vec::new(),
        };
        if player_judgement != Judgement::Lose {
            triggers.fire(
                Side::Player,
                player_action,
                damage_to_enemy,
                (&mut player, &mut enemy),
                params,
            );
        }
        if enemy_judgement != Judgement::Lose {
            triggers.fire(
                Side::Enemy,
                enemy_action,
                damage_to_player,
                (&mut enemy, &mut player),
                params,
            );
        }

        let (player_hp, player_tick) = player
            .effects
            .resolve_ticks(player.vitals.hp, player.vitals.max_hp);
        player.vitals.hp = player_hp;
        let (enemy_hp, enemy_tick) = enemy
            .effects
            .resolve_ticks(enemy.vitals.hp, enemy.vitals.max_hp);
        enemy.vitals.hp = enemy_hp;

        let expired = player.effects.advance() + enemy.effects.advance();
        let Triggers { pool, applied } = triggers;

        let player_fan_delta = outcome_fan_delta(player_judgement, params);
        let enemy_fan_delta = outcome_fan_delta(enemy_judgement, params);
        let audience = apply_to_composition(
            &state.audience,
            player_fan_delta,
            enemy_fan_delta,
            params.neutral_floor,
        );

        let next_comment_id = arrivals
            .last()
            .map_or(state.arena.next_comment_id, |comment| comment.id + 1)
            .max(state.arena.next_comment_id);
        let arena = EmotionArena {
            comments: comments::add_to_pool(&pool, arrivals, params.comment_pool_cap as usize),
            next_comment_id,
        };

        let mut changes = TurnChanges::empty();
        changes.set(TurnChanges::PLAYER_HP, player.vitals != state.player.vitals);
        changes.set(TurnChanges::ENEMY_HP, enemy.vitals != state.enemy.vitals);
        changes.set(TurnChanges::FANS, audience != state.audience);
        changes.set(
            TurnChanges::EFFECTS,
            player.effects != state.player.effects || enemy.effects != state.enemy.effects,
        );
        changes.set(TurnChanges::COMMENTS, arena.comments != state.arena.comments);

        let mut message = narrate(
            turn,
            &player_action,
            &enemy_action,
            player_judgement,
            damage_to_enemy,
            damage_to_player,
        );
        if !consumption.consumed.is_empty() {
            message.push_str(&format!(
                "; {} comments fuel the {player_action}",
                consumption.consumed.total()
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
            detail: EmotionDetail {
                consumed: consumption.consumed,
                comment_bonus,
                applied,
                player_tick,
                enemy_tick,
                expired,
            },
            changes,
            message,
            player,
            enemy,
            audience,
            arena,
        }
    }

    fn action_multiplier(action: Emotion, params: &TuningParams) -> f64 {
        match action {
            Emotion::Rage => params.rage_multiplier,
            Emotion::Terror => params.terror_multiplier,
            Emotion::Grief => params.grief_multiplier,
            Emotion::Ecstasy => params.ecstasy_multiplier,
        }
    }

    /// The emotion with the most pooled comments; ties go to cycle order.
    fn predict_player(state: &BattleState<Self>) -> Option<Emotion> {
        let counts = comments::tally(&state.arena.comments);
        let mut best: Option<(Emotion, u32)> = None;
        for (&emotion, &count) in Emotion::CYCLE.iter().zip(counts.iter()) {
            if count > best.map_or(0, |(_, top)| top) {
                best = Some((emotion, count));
            }
        }
        best.map(|(emotion, _)| emotion)
    }

    fn estimate_damage(state: &BattleState<Self>, action: Emotion, params: &TuningParams) -> u32 {
        compute_damage(
            Self::action_multiplier(action, params),
            state.enemy.base_power(),
            matchup_multiplier(Judgement::Win, params),
            state.enemy.effects.outgoing_multiplier() * state.player.effects.incoming_multiplier(),
            Judgement::Win,
        )
    }
}

fn matchup_multiplier(judgement: Judgement, params: &TuningParams) -> f64 {
    match judgement {
        Judgement::Win => params.matchup_win_multiplier,
        Judgement::Draw => params.matchup_draw_multiplier,
        Judgement::Lose => 1.0,
    }
}

fn outcome_fan_delta(judgement: Judgement, params: &TuningParams) -> f64 {
    compute_fan_delta(judgement, 0.0, ComplianceTally::default(), 1.0, params)
}

/// Rule firing state for one turn.
struct Triggers {
    pool: Vec<Comment>,
    applied: Vec<AppliedRule>,
}

impl Triggers {
    /// Fires `emotion`'s rules for `source`; `sides` is `(source, opponent)`.
    fn fire(
        &mut self,
        source: Side,
        emotion: Emotion,
        damage_dealt: u32,
        sides: (&mut EmotionCombatant, &mut EmotionCombatant),
        params: &TuningParams,
    ) {
        let (own, opponent) = sides;
        for rule in rules_for(emotion, params) {
            let amount = match rule {
                EffectRule::Apply {
                    target,
                    kind,
                    magnitude,
                    duration,
                } => {
                    let holder = match target {
                        EffectTarget::Own => &mut *own,
                        EffectTarget::Opponent => &mut *opponent,
                    };
                    let effect = SpecialEffect::new(kind, magnitude, duration, emotion);
                    u32::from(holder.effects.add(effect))
                }
                EffectRule::ScatterComments { count } => {
                    let before = self.pool.len();
                    self.pool = comments::scatter(&self.pool, count as usize);
                    (before - self.pool.len()) as u32
                }
                EffectRule::Drain { percent } => {
                    if own.is_down() {
                        0
                    } else {
                        let heal = damage_dealt as f64 * percent / 100.0;
                        let heal = if heal.is_finite() && heal > 0.0 {
                            heal.floor() as u32
                        } else {
                            0
                        };
                        let before = own.vitals.hp;
                        own.vitals = own.vitals.healed(heal);
                        own.vitals.hp - before
                    }
                }
                EffectRule::Cleanse => own.effects.cleanse(),
            };
            self.applied.push(AppliedRule {
                source,
                rule,
                amount,
            });
        }
    }
}
