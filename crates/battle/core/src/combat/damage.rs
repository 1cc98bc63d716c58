//! Damage calculation.

use super::judgement::Judgement;

/// Absorbs representation error in products such as `100 × 1.2` so that
/// exact decimal results never floor one below.
const FLOOR_EPSILON: f64 = 1e-9;

/// Calculate damage dealt by one side.
///
/// # Formula
///
/// ```text
/// lose          => 0
/// win | draw    => floor(base_power × action_multiplier × resource_bonus × mitigation)
/// ```
///
/// The real-valued product is floored exactly once. Non-finite or
/// non-positive products yield zero, so a purely defensive action (zero
/// multiplier) never deals damage.
pub fn compute_damage(
    action_multiplier: f64,
    base_power: u32,
    resource_bonus: f64,
    mitigation: f64,
    judgement: Judgement,
) -> u32 {
    if judgement.is_lose() {
        return 0;
    }

    let raw = base_power as f64 * action_multiplier * resource_bonus * mitigation;
    if !raw.is_finite() || raw <= 0.0 {
        return 0;
    }

    // `as` saturates at u32::MAX
    (raw + FLOOR_EPSILON).floor() as u32
}

/// Fan-rate damage tier.
///
/// Band `i + 1` is selected once `rate` exceeds `thresholds[i]`; a rate equal
/// to a threshold stays in the lower band.
///
/// ```text
/// rate ≤ t0        => multipliers[0]
/// t0 < rate ≤ t1   => multipliers[1]
/// t1 < rate ≤ t2   => multipliers[2]
/// t2 < rate        => multipliers[3]
/// ```
pub fn fan_rate_bonus(rate: f64, thresholds: &[f64; 3], multipliers: &[f64; 4]) -> f64 {
    let band = thresholds.iter().filter(|&&t| rate > t).count();
    multipliers[band]
}

/// Apply damage to current HP (clamped to 0).
pub fn apply_damage(current_hp: u32, damage: u32) -> u32 {
    current_hp.saturating_sub(damage)
}

/// Apply healing to current HP (clamped to `max_hp`).
pub fn apply_healing(current_hp: u32, healing: u32, max_hp: u32) -> u32 {
    current_hp.saturating_add(healing).min(max_hp)
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLDS: [f64; 3] = [0.2, 0.5, 0.8];
    const MULTIPLIERS: [f64; 4] = [1.0, 1.2, 1.5, 2.0];

    #[test]
    fn attack_beats_appeal_scenario() {
        // floor(100 × 1.2 × 1.0 × 1.0) = 120
        assert_eq!(compute_damage(1.2, 100, 1.0, 1.0, Judgement::Win), 120);
    }

    #[test]
    fn guarded_defender_takes_a_fifth() {
        // floor(120 × 0.2) = 24
        assert_eq!(compute_damage(1.2, 100, 1.0, 0.2, Judgement::Win), 24);
    }

    #[test]
    fn lose_deals_nothing() {
        assert_eq!(compute_damage(1.2, 100, 2.0, 1.0, Judgement::Lose), 0);
    }

    #[test]
    fn zero_multiplier_deals_nothing() {
        assert_eq!(compute_damage(0.0, 100, 2.0, 1.0, Judgement::Win), 0);
        assert_eq!(compute_damage(0.0, 100, 2.0, 1.0, Judgement::Draw), 0);
    }

    #[test]
    fn floors_once_at_the_end() {
        // 7 × 0.5 × 0.5 = 1.75, flooring each step would give 0
        assert_eq!(compute_damage(0.5, 7, 0.5, 1.0, Judgement::Draw), 1);
        // 100 × 1.2 × 1.3 × 1.2 = 187.2
        assert_eq!(compute_damage(1.2, 100, 1.3 * 1.2, 1.0, Judgement::Win), 187);
    }

    #[test]
    fn fan_bonus_band_edges() {
        let bonus = |rate| fan_rate_bonus(rate, &THRESHOLDS, &MULTIPLIERS);
        assert_eq!(bonus(0.0), 1.0);
        assert_eq!(bonus(0.20), 1.0);
        assert_eq!(bonus(0.21), 1.2);
        assert_eq!(bonus(0.50), 1.2);
        assert_eq!(bonus(0.51), 1.5);
        assert_eq!(bonus(0.80), 1.5);
        assert_eq!(bonus(0.81), 2.0);
        assert_eq!(bonus(1.0), 2.0);
    }

    #[test]
    fn hp_clamps() {
        assert_eq!(apply_damage(10, 25), 0);
        assert_eq!(apply_healing(95, 10, 100), 100);
    }
}
