//! Tunable parameters of the skill engine.
//!
//! The engine never caches configuration: every entry point takes the
//! [`SkillsConfig`] current at the moment of the event, so live reloads take
//! effect on the next event.

use core::ops::RangeInclusive;

/// Errors raised when a configuration value falls outside its documented range.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} = {value} is outside the accepted range [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Skill engine configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkillsConfig {
    /// Bonus XP in percent while a skill is below its recorded peak.
    pub skill_recovery_bonus_pct: i32,
    /// Bonus XP in percent while a weapon skill trails the highest weapon skill.
    pub catchup_bonus_pct: i32,
    /// If set, the swim skill is exempt from the death penalty.
    pub swim_skill_loss_disabled: bool,
    /// Bonus XP in percent for the swim skill.
    pub swim_gain_bonus_pct: i32,
    /// Share in percent of a shielded attacker's weapon XP relayed to the caster.
    pub shield_attack_xp_factor_pct: i32,
    /// If set, a breaking shield grants its wearer no XP.
    pub remove_shield_expire_xp: bool,
    /// Bonus backstab damage in percent at sneak level 100.
    pub sneak_bonus_damage_pct: f32,
    /// Flat sneak XP granted for hitting an unaware enemy.
    pub sneak_bonus_xp: f32,
}

impl SkillsConfig {
    // ===== accepted ranges =====
    pub const PERCENT_RANGE: RangeInclusive<i32> = 0..=200;
    pub const SHIELD_FACTOR_RANGE: RangeInclusive<i32> = 0..=100;
    pub const SNEAK_RANGE: RangeInclusive<f32> = 0.0..=200.0;

    // ===== defaults =====
    pub const DEFAULT_SKILL_RECOVERY_BONUS_PCT: i32 = 100;
    pub const DEFAULT_CATCHUP_BONUS_PCT: i32 = 50;
    pub const DEFAULT_SWIM_GAIN_BONUS_PCT: i32 = 100;
    pub const DEFAULT_SHIELD_ATTACK_XP_FACTOR_PCT: i32 = 33;
    pub const DEFAULT_SNEAK_BONUS_DAMAGE_PCT: f32 = 50.0;
    pub const DEFAULT_SNEAK_BONUS_XP: f32 = 20.0;

    pub fn new() -> Self {
        Self {
            skill_recovery_bonus_pct: Self::DEFAULT_SKILL_RECOVERY_BONUS_PCT,
            catchup_bonus_pct: Self::DEFAULT_CATCHUP_BONUS_PCT,
            swim_skill_loss_disabled: true,
            swim_gain_bonus_pct: Self::DEFAULT_SWIM_GAIN_BONUS_PCT,
            shield_attack_xp_factor_pct: Self::DEFAULT_SHIELD_ATTACK_XP_FACTOR_PCT,
            remove_shield_expire_xp: true,
            sneak_bonus_damage_pct: Self::DEFAULT_SNEAK_BONUS_DAMAGE_PCT,
            sneak_bonus_xp: Self::DEFAULT_SNEAK_BONUS_XP,
        }
    }

    /// Rejects any value outside its accepted range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_int(
            "skill_recovery_bonus_pct",
            self.skill_recovery_bonus_pct,
            &Self::PERCENT_RANGE,
        )?;
        check_int("catchup_bonus_pct", self.catchup_bonus_pct, &Self::PERCENT_RANGE)?;
        check_int("swim_gain_bonus_pct", self.swim_gain_bonus_pct, &Self::PERCENT_RANGE)?;
        check_int(
            "shield_attack_xp_factor_pct",
            self.shield_attack_xp_factor_pct,
            &Self::SHIELD_FACTOR_RANGE,
        )?;
        check_float(
            "sneak_bonus_damage_pct",
            self.sneak_bonus_damage_pct,
            &Self::SNEAK_RANGE,
        )?;
        check_float("sneak_bonus_xp", self.sneak_bonus_xp, &Self::SNEAK_RANGE)?;
        Ok(())
    }

    /// Clamps every value into its accepted range.
    ///
    /// Non-finite floats fall back to their defaults.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            skill_recovery_bonus_pct: clamp_int(self.skill_recovery_bonus_pct, &Self::PERCENT_RANGE),
            catchup_bonus_pct: clamp_int(self.catchup_bonus_pct, &Self::PERCENT_RANGE),
            swim_gain_bonus_pct: clamp_int(self.swim_gain_bonus_pct, &Self::PERCENT_RANGE),
            shield_attack_xp_factor_pct: clamp_int(
                self.shield_attack_xp_factor_pct,
                &Self::SHIELD_FACTOR_RANGE,
            ),
            sneak_bonus_damage_pct: clamp_float(
                self.sneak_bonus_damage_pct,
                Self::DEFAULT_SNEAK_BONUS_DAMAGE_PCT,
                &Self::SNEAK_RANGE,
            ),
            sneak_bonus_xp: clamp_float(
                self.sneak_bonus_xp,
                Self::DEFAULT_SNEAK_BONUS_XP,
                &Self::SNEAK_RANGE,
            ),
            ..self
        }
    }
}

impl Default for SkillsConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn check_int(name: &'static str, value: i32, range: &RangeInclusive<i32>) -> Result<(), ConfigError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value: f64::from(value),
            min: f64::from(*range.start()),
            max: f64::from(*range.end()),
        })
    }
}

fn check_float(
    name: &'static str,
    value: f32,
    range: &RangeInclusive<f32>,
) -> Result<(), ConfigError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value: f64::from(value),
            min: f64::from(*range.start()),
            max: f64::from(*range.end()),
        })
    }
}

fn clamp_int(value: i32, range: &RangeInclusive<i32>) -> i32 {
    value.clamp(*range.start(), *range.end())
}

fn clamp_float(value: f32, default: f32, range: &RangeInclusive<f32>) -> f32 {
    if value.is_finite() {
        value.clamp(*range.start(), *range.end())
    } else {
        default
    }
}
