//! Tuning parameters for both rule-sets.
//!
//! [`TuningParams`] is a flat bag of every numeric constant the engine reads.
//! It is passed explicitly into every call; the engine never caches it.

/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TuningParams {
    // ===== battle =====
    /// Seed from which every generation step (commands, comments, AI rolls) derives.
    pub seed: u64,
    pub player_max_hp: u32,
    pub player_base_power: u32,
    pub enemy_max_hp: u32,
    pub enemy_base_power: u32,
    /// Turns after which the battle is decided on HP ratio. `0` disables the limit.
    pub turn_limit: u32,

    // ===== audience =====
    pub initial_player_fans: f64,
    pub initial_enemy_fans: f64,
    /// Share of the audience that always stays neutral.
    pub neutral_floor: f64,
    pub fan_win: f64,
    pub fan_draw: f64,
    pub fan_lose: f64,

    // ===== classic rule-set =====
    pub attack_multiplier: f64,
    pub appeal_multiplier: f64,
    pub guard_multiplier: f64,
    /// Multiplier applied to damage received while guarding.
    pub guard_damage_factor: f64,
    /// Fan-rate band boundaries; a band is entered once the rate exceeds its threshold.
    pub fan_rate_thresholds: [f64; 3],
    pub fan_rate_multipliers: [f64; 4],
    pub attack_fan_bonus: f64,
    pub appeal_fan_bonus: f64,
    pub guard_fan_bonus: f64,
    pub fan_compliance_bonus: f64,
    pub fan_defiance_penalty: f64,
    pub initial_anti: u32,
    pub anti_attack_gain: i32,
    pub anti_appeal_gain: i32,
    pub anti_guard_gain: i32,
    pub anti_win_gain: i32,
    pub anti_comply_relief: i32,
    pub anti_defy_gain: i32,
    pub anti_thresholds: [u32; 3],
    pub anti_fan_penalty: [f64; 4],
    pub anti_power_penalty: [f64; 4],
    pub commands_per_turn: u32,
    pub forbid_chance_percent: u32,

    // ===== emotion rule-set =====
    pub rage_multiplier: f64,
    pub terror_multiplier: f64,
    pub grief_multiplier: f64,
    pub ecstasy_multiplier: f64,
    pub matchup_win_multiplier: f64,
    pub matchup_draw_multiplier: f64,
    pub comment_pool_cap: u32,
    pub initial_comments: u32,
    pub comments_per_turn: u32,
    pub superchat_chance_percent: u32,
    /// How many regular comments a consumed superchat is worth.
    pub superchat_weight: u32,
    pub comment_bonus_per_count: f64,
    // Effect durations count the creation turn: a new effect ticks and loses
    // one turn before the next turn's damage is computed, so damage modifiers
    // need at least 2 to matter.
    pub rage_buff_magnitude: f64,
    pub rage_buff_turns: u32,
    pub rage_amp_magnitude: f64,
    pub rage_amp_turns: u32,
    pub terror_debuff_magnitude: f64,
    pub terror_debuff_turns: u32,
    pub terror_scatter: u32,
    pub grief_poison_magnitude: f64,
    pub grief_poison_turns: u32,
    pub grief_curse_magnitude: f64,
    pub grief_curse_turns: u32,
    pub ecstasy_regen_magnitude: f64,
    pub ecstasy_regen_turns: u32,
    pub ecstasy_drain_percent: f64,
}

impl TuningParams {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_ACTIVE_EFFECTS: usize = 16;
    pub const MAX_COMMANDS: usize = 4;
    pub const MAX_RULES_PER_ACTION: usize = 4;
    pub const ANTI_GAUGE_MAX: u32 = 100;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_SEED: u64 = 0x5EED_BA77_1E00_0001;
    pub const DEFAULT_MAX_HP: u32 = 1000;
    pub const DEFAULT_BASE_POWER: u32 = 100;
    pub const DEFAULT_INITIAL_FANS: f64 = 0.1;
    pub const DEFAULT_NEUTRAL_FLOOR: f64 = 0.05;
    pub const DEFAULT_COMMENT_POOL_CAP: u32 = 20;

    pub fn new() -> Self {
        Self {
            seed: Self::DEFAULT_SEED,
            player_max_hp: Self::DEFAULT_MAX_HP,
            player_base_power: Self::DEFAULT_BASE_POWER,
            enemy_max_hp: Self::DEFAULT_MAX_HP,
            enemy_base_power: Self::DEFAULT_BASE_POWER,
            turn_limit: 0,

            initial_player_fans: Self::DEFAULT_INITIAL_FANS,
            initial_enemy_fans: Self::DEFAULT_INITIAL_FANS,
            neutral_floor: Self::DEFAULT_NEUTRAL_FLOOR,
            fan_win: 0.05,
            fan_draw: 0.01,
            fan_lose: -0.03,

            attack_multiplier: 1.2,
            appeal_multiplier: 0.8,
            guard_multiplier: 0.0,
            guard_damage_factor: 0.2,
            fan_rate_thresholds: [0.2, 0.5, 0.8],
            fan_rate_multipliers: [1.0, 1.2, 1.5, 2.0],
            attack_fan_bonus: 0.0,
            appeal_fan_bonus: 0.03,
            guard_fan_bonus: -0.01,
            fan_compliance_bonus: 0.02,
            fan_defiance_penalty: 0.02,
            initial_anti: 0,
            anti_attack_gain: 6,
            anti_appeal_gain: -3,
            anti_guard_gain: 0,
            anti_win_gain: 2,
            anti_comply_relief: 5,
            anti_defy_gain: 5,
            anti_thresholds: [25, 50, 75],
            anti_fan_penalty: [1.0, 0.75, 0.5, 0.25],
            anti_power_penalty: [1.0, 0.9, 0.75, 0.5],
            commands_per_turn: 1,
            forbid_chance_percent: 30,

            rage_multiplier: 1.2,
            terror_multiplier: 1.0,
            grief_multiplier: 0.9,
            ecstasy_multiplier: 1.1,
            matchup_win_multiplier: 1.2,
            matchup_draw_multiplier: 1.0,
            comment_pool_cap: Self::DEFAULT_COMMENT_POOL_CAP,
            initial_comments: 6,
            comments_per_turn: 4,
            superchat_chance_percent: 5,
            superchat_weight: 3,
            comment_bonus_per_count: 0.1,
            rage_buff_magnitude: 25.0,
            rage_buff_turns: 3,
            rage_amp_magnitude: 10.0,
            rage_amp_turns: 2,
            terror_debuff_magnitude: 20.0,
            terror_debuff_turns: 3,
            terror_scatter: 2,
            grief_poison_magnitude: 8.0,
            grief_poison_turns: 3,
            grief_curse_magnitude: 4.0,
            grief_curse_turns: 2,
            ecstasy_regen_magnitude: 10.0,
            ecstasy_regen_turns: 3,
            ecstasy_drain_percent: 30.0,
        }
    }

    /// Returns a copy with a different battle seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Checks every constraint the engine relies on.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParamsError`] found.
    pub fn validate(&self) -> Result<(), ParamsError> {
        for (field, value) in [
            ("player_max_hp", self.player_max_hp),
            ("player_base_power", self.player_base_power),
            ("enemy_max_hp", self.enemy_max_hp),
            ("enemy_base_power", self.enemy_base_power),
            ("comment_pool_cap", self.comment_pool_cap),
        ] {
            if value == 0 {
                return Err(ParamsError::MustBePositive { field });
            }
        }

        for (field, value) in [
            ("initial_player_fans", self.initial_player_fans),
            ("initial_enemy_fans", self.initial_enemy_fans),
            ("neutral_floor", self.neutral_floor),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ParamsError::OutOfUnitRange { field, value });
            }
        }

        if self.initial_player_fans + self.initial_enemy_fans > 1.0 {
            return Err(ParamsError::AudienceOverflow {
                total: self.initial_player_fans + self.initial_enemy_fans,
            });
        }

        if !strictly_ascending(&self.fan_rate_thresholds) {
            return Err(ParamsError::UnorderedThresholds {
                field: "fan_rate_thresholds",
            });
        }
        if !self.anti_thresholds.windows(2).all(|w| w[0] < w[1])
            || self.anti_thresholds[2] > Self::ANTI_GAUGE_MAX
        {
            return Err(ParamsError::UnorderedThresholds {
                field: "anti_thresholds",
            });
        }

        if self.initial_anti > Self::ANTI_GAUGE_MAX {
            return Err(ParamsError::AntiOutOfRange {
                value: self.initial_anti,
            });
        }

        for (field, value) in [
            ("forbid_chance_percent", self.forbid_chance_percent),
            ("superchat_chance_percent", self.superchat_chance_percent),
        ] {
            if value > 100 {
                return Err(ParamsError::PercentOutOfRange { field, value });
            }
        }

        if self.commands_per_turn as usize > Self::MAX_COMMANDS {
            return Err(ParamsError::TooManyCommands {
                requested: self.commands_per_turn,
                max: Self::MAX_COMMANDS,
            });
        }

        let factors = [
            ("attack_multiplier", self.attack_multiplier),
            ("appeal_multiplier", self.appeal_multiplier),
            ("guard_multiplier", self.guard_multiplier),
            ("guard_damage_factor", self.guard_damage_factor),
            ("rage_multiplier", self.rage_multiplier),
            ("terror_multiplier", self.terror_multiplier),
            ("grief_multiplier", self.grief_multiplier),
            ("ecstasy_multiplier", self.ecstasy_multiplier),
            ("matchup_win_multiplier", self.matchup_win_multiplier),
            ("matchup_draw_multiplier", self.matchup_draw_multiplier),
            ("comment_bonus_per_count", self.comment_bonus_per_count),
            ("ecstasy_drain_percent", self.ecstasy_drain_percent),
        ];
        let tables = self
            .fan_rate_multipliers
            .iter()
            .chain(self.anti_fan_penalty.iter())
            .chain(self.anti_power_penalty.iter())
            .map(|value| ("multiplier_table", *value));
        for (field, value) in factors.into_iter().chain(tables) {
            if !value.is_finite() || value < 0.0 {
                return Err(ParamsError::InvalidFactor { field, value });
            }
        }

        Ok(())
    }
}

impl Default for TuningParams {
    fn default() -> Self {
        Self::new()
    }
}

fn strictly_ascending(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite()) && values.windows(2).all(|w| w[0] < w[1])
}

/// Rejected tuning parameters.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ParamsError {
    #[error("{field} must be greater than zero")]
    MustBePositive { field: &'static str },

    #[error("{field} must lie in [0, 1] (got {value})")]
    OutOfUnitRange { field: &'static str, value: f64 },

    #[error("initial player and enemy fans exceed the whole audience ({total})")]
    AudienceOverflow { total: f64 },

    #[error("{field} must be strictly ascending")]
    UnorderedThresholds { field: &'static str },

    #[error("initial anti-gauge {value} exceeds the gauge maximum")]
    AntiOutOfRange { value: u32 },

    #[error("{field} must be a percentage (got {value})")]
    PercentOutOfRange { field: &'static str, value: u32 },

    #[error("{requested} commands per turn requested, at most {max} supported")]
    TooManyCommands { requested: u32, max: usize },

    #[error("{field} must be a finite, non-negative factor (got {value})")]
    InvalidFactor { field: &'static str, value: f64 },
}

impl crate::error::BattleError for ParamsError {
    fn severity(&self) -> crate::error::ErrorSeverity {
        crate::error::ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MustBePositive { .. } => "PARAMS_MUST_BE_POSITIVE",
            Self::OutOfUnitRange { .. } => "PARAMS_OUT_OF_UNIT_RANGE",
            Self::AudienceOverflow { .. } => "PARAMS_AUDIENCE_OVERFLOW",
            Self::UnorderedThresholds { .. } => "PARAMS_UNORDERED_THRESHOLDS",
            Self::AntiOutOfRange { .. } => "PARAMS_ANTI_OUT_OF_RANGE",
            Self::PercentOutOfRange { .. } => "PARAMS_PERCENT_OUT_OF_RANGE",
            Self::TooManyCommands { .. } => "PARAMS_TOO_MANY_COMMANDS",
            Self::InvalidFactor { .. } => "PARAMS_INVALID_FACTOR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(TuningParams::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_hp() {
        let params = TuningParams {
            enemy_max_hp: 0,
            ..TuningParams::default()
        };
        assert_eq!(
            params.validate(),
            Err(ParamsError::MustBePositive {
                field: "enemy_max_hp"
            })
        );
    }

    #[test]
    fn rejects_unordered_fan_thresholds() {
        let params = TuningParams {
            fan_rate_thresholds: [0.5, 0.2, 0.8],
            ..TuningParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParamsError::UnorderedThresholds { field: "fan_rate_thresholds" })
        ));
    }

    #[test]
    fn rejects_audience_overflow() {
        let params = TuningParams {
            initial_player_fans: 0.7,
            initial_enemy_fans: 0.6,
            ..TuningParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParamsError::AudienceOverflow { .. })
        ));
    }

    #[test]
    fn rejects_negative_multiplier() {
        let params = TuningParams {
            anti_power_penalty: [1.0, 0.9, -0.1, 0.5],
            ..TuningParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParamsError::InvalidFactor { .. })
        ));
    }
}
