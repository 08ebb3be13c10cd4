//! Status effects carried by characters.
//!
//! Only the fields the skill engine reads are modeled: the name hash that
//! identifies the effect, its lifetime, and the skill experience it grants
//! when it breaks.
//!
//! # Shield lifecycle
//!
//! A shield absorbs damage until `absorbed` exceeds `total_absorb_damage`, at
//! which point it breaks. A broken shield grants its wearer a raise of
//! `level_up_skill_on_break` by `level_up_skill_factor` unless that target has
//! been cleared to [`SkillType::NONE`]. A shield whose `ttl` runs out simply
//! ends.

use arrayvec::ArrayVec;

use crate::skill::{SkillType, stable_hash};

/// Maximum number of simultaneous effects on one character.
pub const MAX_STATUS_EFFECTS: usize = 8;

/// Host name of the protective effect applied by the shield staff.
pub const SHIELD_EFFECT_NAME: &str = "Staff_shield";

/// Name hash of [`SHIELD_EFFECT_NAME`].
pub const SHIELD_EFFECT_HASH: i32 = stable_hash(SHIELD_EFFECT_NAME);

/// A single active status effect.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub name_hash: i32,
    /// Lifetime in seconds. Zero means unlimited.
    pub ttl: f32,
    /// Seconds since the effect was applied.
    pub elapsed: f32,
    /// Damage the effect absorbs before breaking. Zero means it never breaks.
    pub total_absorb_damage: f32,
    pub absorbed: f32,
    /// Scales experience derived from this effect, including relay credit.
    pub level_up_skill_factor: f32,
    /// Skill raised for the wearer when the effect breaks.
    pub level_up_skill_on_break: SkillType,
}

impl StatusEffect {
    /// Generic effect with a lifetime and no skill interaction.
    pub fn new(name_hash: i32, ttl: f32) -> Self {
        Self {
            name_hash,
            ttl,
            elapsed: 0.0,
            total_absorb_damage: 0.0,
            absorbed: 0.0,
            level_up_skill_factor: 0.0,
            level_up_skill_on_break: SkillType::NONE,
        }
    }

    /// The protective effect cast by the shield staff.
    pub fn shield(ttl: f32, total_absorb_damage: f32, level_up_skill_factor: f32) -> Self {
        Self {
            total_absorb_damage,
            level_up_skill_factor,
            level_up_skill_on_break: SkillType::BLOOD_MAGIC,
            ..Self::new(SHIELD_EFFECT_HASH, ttl)
        }
    }

    pub fn is_shield(&self) -> bool {
        self.name_hash == SHIELD_EFFECT_HASH
    }

    pub fn is_broken(&self) -> bool {
        self.total_absorb_damage > 0.0 && self.absorbed > self.total_absorb_damage
    }

    pub fn is_expired(&self) -> bool {
        self.ttl > 0.0 && self.elapsed >= self.ttl
    }

    pub fn is_done(&self) -> bool {
        self.is_broken() || self.is_expired()
    }

    /// Absorbs incoming damage and returns the part that passes through.
    pub fn absorb(&mut self, damage: f32) -> f32 {
        if self.total_absorb_damage <= 0.0 {
            return damage;
        }
        let remaining = (self.total_absorb_damage - self.absorbed).max(0.0);
        self.absorbed += damage;
        (damage - remaining).max(0.0)
    }
}

/// Active status effects on a character, at most one instance per name.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, MAX_STATUS_EFFECTS>,
}

impl StatusEffects {
    pub const CAPACITY: usize = MAX_STATUS_EFFECTS;

    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an effect. Re-applying an effect replaces the existing instance.
    ///
    /// Returns false if the set is full and the effect was dropped.
    pub fn add(&mut self, effect: StatusEffect) -> bool {
        if let Some(existing) = self
            .effects
            .iter_mut()
            .find(|e| e.name_hash == effect.name_hash)
        {
            *existing = effect;
            return true;
        }
        self.effects.try_push(effect).is_ok()
    }

    pub fn get(&self, name_hash: i32) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.name_hash == name_hash)
    }

    pub fn get_mut(&mut self, name_hash: i32) -> Option<&mut StatusEffect> {
        self.effects.iter_mut().find(|e| e.name_hash == name_hash)
    }

    pub fn has(&self, name_hash: i32) -> bool {
        self.get(name_hash).is_some()
    }

    pub fn remove(&mut self, name_hash: i32) -> Option<StatusEffect> {
        let index = self.effects.iter().position(|e| e.name_hash == name_hash)?;
        Some(self.effects.remove(index))
    }

    /// Advances every effect's clock by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        for effect in &mut self.effects {
            effect.elapsed += dt;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut StatusEffect> {
        self.effects.iter_mut()
    }

    /// Removes and returns every effect that is done.
    pub fn drain_done(&mut self) -> Vec<StatusEffect> {
        let done: Vec<StatusEffect> = self.effects.iter().filter(|e| e.is_done()).copied().collect();
        self.effects.retain(|e| !e.is_done());
        done
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
