//! Fan system: audience composition and fan deltas.

use crate::combat::Judgement;
use crate::config::TuningParams;

use super::compliance::ComplianceTally;

/// Below this total the composition is considered degenerate and reset.
const DEGENERATE_TOTAL: f64 = 1e-12;

/// How the audience is split between the two combatants and the undecided.
///
/// Every constructor and transition renormalizes, so the three shares always
/// sum to one.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AudienceComposition {
    pub player_fans: f64,
    pub neutral_fans: f64,
    pub enemy_fans: f64,
}

impl AudienceComposition {
    /// Builds a composition from both fan shares; the remainder is neutral.
    pub fn new(player_fans: f64, enemy_fans: f64) -> Self {
        Self::normalized(player_fans, 1.0 - player_fans - enemy_fans, enemy_fans)
    }

    /// The whole audience undecided.
    pub const fn all_neutral() -> Self {
        Self {
            player_fans: 0.0,
            neutral_fans: 1.0,
            enemy_fans: 0.0,
        }
    }

    /// Clamps negative shares to zero and rescales to sum to one.
    pub fn normalized(player: f64, neutral: f64, enemy: f64) -> Self {
        let clamp = |share: f64| if share.is_finite() { share.max(0.0) } else { 0.0 };
        let (player, neutral, enemy) = (clamp(player), clamp(neutral), clamp(enemy));
        let total = player + neutral + enemy;
        if total <= DEGENERATE_TOTAL {
            return Self::all_neutral();
        }
        Self {
            player_fans: player / total,
            neutral_fans: neutral / total,
            enemy_fans: enemy / total,
        }
    }

    pub fn total(&self) -> f64 {
        self.player_fans + self.neutral_fans + self.enemy_fans
    }
}

impl Default for AudienceComposition {
    fn default() -> Self {
        Self::new(
            TuningParams::DEFAULT_INITIAL_FANS,
            TuningParams::DEFAULT_INITIAL_FANS,
        )
    }
}

/// Fan delta for one side.
///
/// # Formula
///
/// ```text
/// raw   = fan_outcome[outcome] + action_bonus
///       + followed × fan_compliance_bonus − defied × fan_defiance_penalty
/// delta = raw × penalty
/// ```
///
/// `penalty` is the anti-gauge fan multiplier; it dampens gains and losses
/// alike.
pub fn compute_fan_delta(
    outcome: Judgement,
    action_bonus: f64,
    compliance: ComplianceTally,
    penalty: f64,
    params: &TuningParams,
) -> f64 {
    let outcome_delta = match outcome {
        Judgement::Win => params.fan_win,
        Judgement::Draw => params.fan_draw,
        Judgement::Lose => params.fan_lose,
    };
    let compliance_delta = compliance.followed as f64 * params.fan_compliance_bonus
        - compliance.defied as f64 * params.fan_defiance_penalty;

    let delta = (outcome_delta + action_bonus + compliance_delta) * penalty;
    if delta.is_finite() { delta } else { 0.0 }
}

/// Applies both fan deltas to a composition.
///
/// Losses return to the neutral pool first. Gains are then drawn from the
/// neutral pool, never below `neutral_floor`; when both sides ask for more
/// than is available the available share is split in proportion to the
/// requests. The result is renormalized.
pub fn apply_to_composition(
    composition: &AudienceComposition,
    player_delta: f64,
    enemy_delta: f64,
    neutral_floor: f64,
) -> AudienceComposition {
    let finite = |delta: f64| if delta.is_finite() { delta } else { 0.0 };
    let (player_delta, enemy_delta) = (finite(player_delta), finite(enemy_delta));

    let mut player = composition.player_fans;
    let mut neutral = composition.neutral_fans;
    let mut enemy = composition.enemy_fans;

    if player_delta < 0.0 {
        let loss = (-player_delta).min(player);
        player -= loss;
        neutral += loss;
    }
    if enemy_delta < 0.0 {
        let loss = (-enemy_delta).min(enemy);
        enemy -= loss;
        neutral += loss;
    }

    let player_want = player_delta.max(0.0);
    let enemy_want = enemy_delta.max(0.0);
    let requested = player_want + enemy_want;
    if requested > 0.0 {
        let available = (neutral - neutral_floor).max(0.0);
        let scale = if requested > available {
            available / requested
        } else {
            1.0
        };
        let player_gain = player_want * scale;
        let enemy_gain = enemy_want * scale;
        player += player_gain;
        enemy += enemy_gain;
        neutral -= player_gain + enemy_gain;
    }

    AudienceComposition::normalized(player, neutral, enemy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn new_fills_neutral_remainder() {
        let comp = AudienceComposition::new(0.1, 0.3);
        assert!(approx(comp.neutral_fans, 0.6));
        assert!(approx(comp.total(), 1.0));
    }

    #[test]
    fn gain_drawn_from_neutral() {
        let comp = AudienceComposition::new(0.1, 0.1);
        let next = apply_to_composition(&comp, 0.05, 0.0, 0.05);
        assert!(approx(next.player_fans, 0.15));
        assert!(approx(next.neutral_fans, 0.75));
        assert!(approx(next.enemy_fans, 0.1));
    }

    #[test]
    fn loss_returns_to_neutral() {
        let comp = AudienceComposition::new(0.1, 0.1);
        let next = apply_to_composition(&comp, -0.04, 0.0, 0.05);
        assert!(approx(next.player_fans, 0.06));
        assert!(approx(next.neutral_fans, 0.84));
    }

    #[test]
    fn loss_cannot_go_below_zero() {
        let comp = AudienceComposition::new(0.02, 0.1);
        let next = apply_to_composition(&comp, -0.5, 0.0, 0.05);
        assert_eq!(next.player_fans, 0.0);
        assert!(approx(next.total(), 1.0));
    }

    #[test]
    fn gains_respect_neutral_floor() {
        let comp = AudienceComposition::new(0.45, 0.45);
        // 0.10 neutral, 0.05 floor => only 0.05 available
        let next = apply_to_composition(&comp, 0.2, 0.2, 0.05);
        assert!(approx(next.neutral_fans, 0.05));
        assert!(approx(next.player_fans, 0.475));
        assert!(approx(next.enemy_fans, 0.475));
    }

    #[test]
    fn contested_gains_split_proportionally() {
        let comp = AudienceComposition::new(0.3, 0.3);
        // 0.4 neutral, floor 0.1 => 0.3 available; requests 0.3 and 0.15
        let next = apply_to_composition(&comp, 0.3, 0.15, 0.1);
        assert!(approx(next.player_fans, 0.5));
        assert!(approx(next.enemy_fans, 0.4));
        assert!(approx(next.neutral_fans, 0.1));
    }

    #[test]
    fn fan_delta_penalty_dampens_both_signs() {
        let params = TuningParams::default();
        let gain = compute_fan_delta(
            Judgement::Win,
            0.0,
            ComplianceTally::default(),
            0.5,
            &params,
        );
        let loss = compute_fan_delta(
            Judgement::Lose,
            0.0,
            ComplianceTally::default(),
            0.5,
            &params,
        );
        assert!(approx(gain, params.fan_win * 0.5));
        assert!(approx(loss, params.fan_lose * 0.5));
    }

    #[test]
    fn fan_delta_counts_compliance() {
        let params = TuningParams::default();
        let tally = ComplianceTally {
            followed: 2,
            defied: 1,
        };
        let delta = compute_fan_delta(Judgement::Draw, 0.03, tally, 1.0, &params);
        let expected = params.fan_draw + 0.03 + 2.0 * params.fan_compliance_bonus
            - params.fan_defiance_penalty;
        assert!(approx(delta, expected));
    }
}
