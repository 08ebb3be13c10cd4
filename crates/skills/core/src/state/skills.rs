//! The host's per-character skill container.
//!
//! This models the host primitives the engine scales and intercepts: the raise
//! primitive that accumulates experience into levels, and the death penalty
//! that lowers every skill.

use std::collections::BTreeMap;

use crate::skill::SkillType;

/// A single trained skill.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    /// Current level in `[0, 100]`.
    pub level: f32,
    /// Experience collected towards the next level.
    pub accumulator: f32,
    /// Experience gained per unit of raise factor.
    pub increase_step: f32,
}

/// Result of a single raise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RaiseOutcome {
    /// The raise targeted [`SkillType::NONE`] and was discarded.
    Ignored,
    /// The skill is already at the maximum level.
    Maxed,
    /// Experience was added without reaching the next level.
    Progressed,
    /// The skill reached a new level.
    LeveledUp { level: f32 },
}

impl Skill {
    pub const MAX_LEVEL: f32 = 100.0;
    pub const DEFAULT_INCREASE_STEP: f32 = 1.0;

    pub fn new() -> Self {
        Self::with_level(0.0)
    }

    pub fn with_level(level: f32) -> Self {
        Self {
            level: level.clamp(0.0, Self::MAX_LEVEL),
            accumulator: 0.0,
            increase_step: Self::DEFAULT_INCREASE_STEP,
        }
    }

    /// Experience needed to reach the next level.
    ///
    /// ```text
    /// floor(level + 1)^1.5 × 0.5 + 0.5
    /// ```
    pub fn next_level_requirement(&self) -> f32 {
        (self.level + 1.0).floor().powf(1.5) * 0.5 + 0.5
    }

    /// Adds `increase_step × factor` experience, levelling up once the
    /// requirement is met.
    pub fn raise(&mut self, factor: f32) -> RaiseOutcome {
        if self.level >= Self::MAX_LEVEL {
            return RaiseOutcome::Maxed;
        }

        self.accumulator += self.increase_step * factor;

        if self.accumulator >= self.next_level_requirement() {
            self.level = (self.level + 1.0).clamp(0.0, Self::MAX_LEVEL);
            self.accumulator = 0.0;
            RaiseOutcome::LeveledUp { level: self.level }
        } else {
            RaiseOutcome::Progressed
        }
    }

    /// Level normalized to `[0, 1]`.
    pub fn factor(&self) -> f32 {
        self.level / Self::MAX_LEVEL
    }
}

impl Default for Skill {
    fn default() -> Self {
        Self::new()
    }
}

/// All skills of one character, one entry per [`SkillType`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillSet {
    skills: BTreeMap<SkillType, Skill>,
}

impl SkillSet {
    /// Fraction of every level the host removes on death.
    pub const DEATH_LOWER_FACTOR: f32 = 0.25;

    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from `(skill, level)` pairs.
    pub fn with_levels(levels: impl IntoIterator<Item = (SkillType, f32)>) -> Self {
        Self {
            skills: levels
                .into_iter()
                .map(|(skill, level)| (skill, Skill::with_level(level)))
                .collect(),
        }
    }

    pub fn get(&self, skill: SkillType) -> Option<&Skill> {
        self.skills.get(&skill)
    }

    pub fn get_mut(&mut self, skill: SkillType) -> Option<&mut Skill> {
        self.skills.get_mut(&skill)
    }

    /// Current level of `skill`, or 0 if it was never trained.
    pub fn level(&self, skill: SkillType) -> f32 {
        self.skills.get(&skill).map_or(0.0, |s| s.level)
    }

    /// Normalized level of `skill`, or 0 if it was never trained.
    pub fn factor(&self, skill: SkillType) -> f32 {
        self.skills.get(&skill).map_or(0.0, Skill::factor)
    }

    /// Returns the skill entry, creating an untrained one on first use.
    pub fn get_or_insert(&mut self, skill: SkillType) -> &mut Skill {
        self.skills.entry(skill).or_default()
    }

    /// Raw raise primitive. The factor is applied as given.
    pub fn raise(&mut self, skill: SkillType, factor: f32) -> RaiseOutcome {
        if skill.is_none() {
            return RaiseOutcome::Ignored;
        }
        self.get_or_insert(skill).raise(factor)
    }

    /// Removes `skill` from the set and returns it.
    pub fn detach(&mut self, skill: SkillType) -> Option<Skill> {
        self.skills.remove(&skill)
    }

    /// Puts a previously detached skill back, replacing any entry for `skill`.
    pub fn attach(&mut self, skill: SkillType, entry: Skill) {
        self.skills.insert(skill, entry);
    }

    /// Death penalty: every skill loses `level × factor` and its progress.
    pub fn lower_all(&mut self, factor: f32) {
        for skill in self.skills.values_mut() {
            skill.level -= skill.level * factor;
            skill.accumulator = 0.0;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (SkillType, &Skill)> {
        self.skills.iter().map(|(ty, skill)| (*ty, skill))
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}
