//! Bonus damage and experience for hitting unaware enemies.

use crate::config::SkillsConfig;
use crate::skill::SkillType;
use crate::state::{Character, EntityId};

/// The parts of an incoming hit the sneak bonus reads and scales.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitData {
    pub attacker: EntityId,
    pub damage: f32,
    /// Damage multiplier the host applies to hits on unaware targets.
    pub backstab_bonus: f32,
}

impl HitData {
    pub fn new(attacker: EntityId, damage: f32, backstab_bonus: f32) -> Self {
        Self {
            attacker,
            damage,
            backstab_bonus,
        }
    }
}

/// Awareness of the defender's AI. Defenders without AI have none.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Awareness {
    pub alerted: bool,
    pub has_target: bool,
}

impl Awareness {
    pub const UNAWARE: Self = Self {
        alerted: false,
        has_target: false,
    };

    pub fn is_unaware(&self) -> bool {
        !self.alerted && !self.has_target
    }
}

/// Result of a sneak bonus applied to a hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SneakReport {
    /// Factor the backstab bonus was multiplied by.
    pub backstab_multiplier: f32,
    /// Base sneak experience granted before multipliers.
    pub xp: f32,
}

/// Scales the backstab bonus of `hit` when the defender is unaware.
///
/// ```text
/// backstab_bonus ×= 1 + sneak_factor(attacker) × sneak_bonus_damage_pct / 100
/// ```
///
/// Returns `None` when the defender has no AI, is alerted, or has a target.
/// The caller grants [`SneakReport::xp`] to the attacker's sneak skill.
pub fn apply_sneak_bonus(
    config: &SkillsConfig,
    attacker: &Character,
    defender: Option<Awareness>,
    hit: &mut HitData,
) -> Option<SneakReport> {
    if !defender.is_some_and(|awareness| awareness.is_unaware()) {
        return None;
    }

    let backstab_multiplier =
        1.0 + attacker.skills.factor(SkillType::SNEAK) * (config.sneak_bonus_damage_pct / 100.0);
    hit.backstab_bonus *= backstab_multiplier;

    Some(SneakReport {
        backstab_multiplier,
        xp: config.sneak_bonus_xp,
    })
}
