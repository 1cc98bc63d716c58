//! Anti-gauge: the audience's backlash meter.

use crate::action::ClassicAction;
use crate::combat::Judgement;
use crate::config::TuningParams;

use super::compliance::ComplianceTally;

/// Hostility meter clamped to `[0, ANTI_GAUGE_MAX]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AntiGauge(u32);

impl AntiGauge {
    pub const MAX: u32 = TuningParams::ANTI_GAUGE_MAX;

    pub fn new(value: u32) -> Self {
        Self(value.min(Self::MAX))
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// Returns the gauge moved by `delta`, clamped to the valid range.
    pub fn apply(self, delta: i32) -> Self {
        let moved = (self.0 as i64 + delta as i64).clamp(0, Self::MAX as i64);
        Self(moved as u32)
    }

    /// Number of thresholds the gauge has reached (0..=3).
    pub fn level(self, thresholds: &[u32; 3]) -> AntiLevel {
        AntiLevel(thresholds.iter().filter(|&&t| self.0 >= t).count() as u8)
    }
}

/// Penalty band derived from the gauge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AntiLevel(u8);

impl AntiLevel {
    pub const CALM: Self = Self(0);

    pub const fn new(level: u8) -> Self {
        Self(if level > 3 { 3 } else { level })
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Multiplier applied to the player's fan delta.
    pub fn fan_penalty(self, params: &TuningParams) -> f64 {
        params.anti_fan_penalty[self.index()]
    }

    /// Multiplier applied to the player's damage output.
    pub fn power_penalty(self, params: &TuningParams) -> f64 {
        params.anti_power_penalty[self.index()]
    }
}

/// Anti-gauge change caused by one player turn.
///
/// # Formula
///
/// ```text
/// delta = action_gain[action]
///       + (outcome == win ? anti_win_gain : 0)
///       − followed × anti_comply_relief
///       + defied × anti_defy_gain
/// ```
pub fn compute_anti_delta(
    action: ClassicAction,
    outcome: Judgement,
    compliance: ComplianceTally,
    params: &TuningParams,
) -> i32 {
    let action_gain = match action {
        ClassicAction::Attack => params.anti_attack_gain,
        ClassicAction::Appeal => params.anti_appeal_gain,
        ClassicAction::Guard => params.anti_guard_gain,
    };
    let win_gain = if outcome == Judgement::Win {
        params.anti_win_gain
    } else {
        0
    };

    action_gain
        .saturating_add(win_gain)
        .saturating_sub((compliance.followed as i32).saturating_mul(params.anti_comply_relief))
        .saturating_add((compliance.defied as i32).saturating_mul(params.anti_defy_gain))
}
