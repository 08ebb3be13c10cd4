//! Skill identifiers and the static skill registry.
//!
//! The host identifies skills by a signed 32-bit id. Built-in skills use fixed
//! ids ([`BuiltinSkill`]); skills added by other content packs use the absolute
//! value of the [`stable_hash`] of their name so the id is identical on every
//! peer and across sessions.

mod hash;
mod registry;

pub use hash::stable_hash;
pub use registry::SkillRegistry;

use core::fmt;

/// Built-in skills with their fixed host ids.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::EnumIter,
    strum::FromRepr,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum BuiltinSkill {
    None = 0,
    Swords = 1,
    Knives = 2,
    Clubs = 3,
    Polearms = 4,
    Spears = 5,
    Blocking = 6,
    Axes = 7,
    Bows = 8,
    ElementalMagic = 9,
    BloodMagic = 10,
    Unarmed = 11,
    Pickaxes = 12,
    WoodCutting = 13,
    Crossbows = 14,
    Jump = 100,
    Sneak = 101,
    Run = 102,
    Swim = 103,
    Fishing = 104,
    Ride = 110,
    All = 999,
}

/// Identifier of a skill, built-in or externally defined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SkillType(pub i32);

impl SkillType {
    pub const NONE: Self = Self::builtin_const(BuiltinSkill::None);
    pub const SWORDS: Self = Self::builtin_const(BuiltinSkill::Swords);
    pub const KNIVES: Self = Self::builtin_const(BuiltinSkill::Knives);
    pub const CLUBS: Self = Self::builtin_const(BuiltinSkill::Clubs);
    pub const POLEARMS: Self = Self::builtin_const(BuiltinSkill::Polearms);
    pub const SPEARS: Self = Self::builtin_const(BuiltinSkill::Spears);
    pub const BLOCKING: Self = Self::builtin_const(BuiltinSkill::Blocking);
    pub const AXES: Self = Self::builtin_const(BuiltinSkill::Axes);
    pub const BOWS: Self = Self::builtin_const(BuiltinSkill::Bows);
    pub const ELEMENTAL_MAGIC: Self = Self::builtin_const(BuiltinSkill::ElementalMagic);
    pub const BLOOD_MAGIC: Self = Self::builtin_const(BuiltinSkill::BloodMagic);
    pub const UNARMED: Self = Self::builtin_const(BuiltinSkill::Unarmed);
    pub const PICKAXES: Self = Self::builtin_const(BuiltinSkill::Pickaxes);
    pub const WOOD_CUTTING: Self = Self::builtin_const(BuiltinSkill::WoodCutting);
    pub const CROSSBOWS: Self = Self::builtin_const(BuiltinSkill::Crossbows);
    pub const JUMP: Self = Self::builtin_const(BuiltinSkill::Jump);
    pub const SNEAK: Self = Self::builtin_const(BuiltinSkill::Sneak);
    pub const RUN: Self = Self::builtin_const(BuiltinSkill::Run);
    pub const SWIM: Self = Self::builtin_const(BuiltinSkill::Swim);
    pub const FISHING: Self = Self::builtin_const(BuiltinSkill::Fishing);
    pub const RIDE: Self = Self::builtin_const(BuiltinSkill::Ride);

    const fn builtin_const(skill: BuiltinSkill) -> Self {
        Self(skill as i32)
    }

    /// Id of an externally-defined skill registered under `name`.
    ///
    /// ```
    /// # use skills_core::skill::SkillType;
    /// assert_eq!(SkillType::from_name("Dual Swords"), SkillType(976_601_526));
    /// ```
    pub fn from_name(name: &str) -> Self {
        // Host takes the absolute value; i32::MIN has no positive counterpart.
        Self(stable_hash(name).wrapping_abs())
    }

    /// Raw host id.
    pub const fn id(self) -> i32 {
        self.0
    }

    /// Returns the built-in member for this id, if any.
    pub fn builtin(self) -> Option<BuiltinSkill> {
        BuiltinSkill::from_repr(self.0)
    }

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl From<BuiltinSkill> for SkillType {
    fn from(skill: BuiltinSkill) -> Self {
        Self(skill as i32)
    }
}

impl fmt::Display for SkillType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.builtin() {
            Some(skill) => {
                let name: &'static str = skill.into();
                f.write_str(name)
            }
            None => write!(f, "skill#{}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn builtin_ids_round_trip() {
        for skill in BuiltinSkill::iter() {
            assert_eq!(SkillType::from(skill).builtin(), Some(skill));
        }
        assert_eq!(SkillType::SWIM.id(), 103);
        assert_eq!(SkillType::BLOOD_MAGIC.id(), 10);
    }

    #[test]
    fn hashed_skills_are_positive_and_custom() {
        let dual_axes = SkillType::from_name("Dual Axes");
        assert_eq!(dual_axes, SkillType(82_511_965));
        assert!(dual_axes.builtin().is_none());
        assert_eq!(dual_axes.to_string(), "skill#82511965");
    }

    #[test]
    fn display_uses_builtin_name() {
        assert_eq!(SkillType::ELEMENTAL_MAGIC.to_string(), "ElementalMagic");
        assert!(SkillType::NONE.is_none());
    }
}
