//! Entry points the host invokes on game events.
//!
//! [`SkillEngine`] is the only type hosts need: it owns the static
//! [`SkillRegistry`] and exposes one method per hook point. Every method takes
//! the configuration current at the time of the event and the character owned
//! by the calling participant. Relay messages leave through a
//! [`RelayOutbox`], keeping the engine free of transport concerns.

mod death;
mod factor;
mod relay;
mod shield;
mod sneak;

pub use death::{DeathGuard, DeathReport, intercept_death};
pub use factor::{FactorBreakdown, XpBonus, XpBonusSource, compute_factor};
#[cfg(feature = "serde")]
pub use relay::{decode_credit, encode_credit};
pub use relay::{
    NullOutbox, RAISE_BLOOD_MAGIC_METHOD, RelayMessage, RelayOutbox, VecOutbox, relay_credit,
};
pub use shield::{EffectApplication, apply_status_effect, suppress_break_xp};
pub use sneak::{Awareness, HitData, SneakReport, apply_sneak_bonus};

use crate::config::SkillsConfig;
use crate::skill::{SkillRegistry, SkillType};
use crate::state::{Character, EntityId, RaiseOutcome, SkillSet, StatusEffect};

/// Everything that happened during one skill raise.
#[derive(Clone, Debug, PartialEq)]
pub struct RaiseReport {
    pub skill: SkillType,
    /// Raise value before bonuses.
    pub value: f32,
    /// Bonuses applied and the final factor handed to the raise primitive.
    pub factor: FactorBreakdown,
    pub outcome: RaiseOutcome,
    /// Relay credit sent to a shield caster, if any.
    pub relay: Option<RelayMessage>,
}

/// Outcome of advancing a character's status effects.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EffectUpdate {
    /// Effects that ended this update.
    pub ended: Vec<StatusEffect>,
    /// Raises granted by breaking effects.
    pub break_rewards: Vec<RaiseReport>,
}

/// The skill engine.
#[derive(Clone, Debug, Default)]
pub struct SkillEngine {
    registry: SkillRegistry,
}

impl SkillEngine {
    pub fn new(registry: SkillRegistry) -> Self {
        Self { registry }
    }

    /// Engine using [`SkillRegistry::standard`].
    pub fn standard() -> Self {
        Self::new(SkillRegistry::standard())
    }

    /// Factor a raise of `skill` from `level` would use.
    pub fn compute_factor(
        &self,
        config: &SkillsConfig,
        character: &Character,
        skill: SkillType,
        level: f32,
        base: f32,
    ) -> FactorBreakdown {
        compute_factor(&self.registry, config, character, skill, level, base)
    }

    /// Raises `skill` by `value` through the full raise path.
    ///
    /// 1. Scales `value` with the experience bonuses.
    /// 2. Applies the scaled factor with the host raise primitive.
    /// 3. Relays a share of the unscaled `value` to a shield caster.
    pub fn raise_skill(
        &self,
        config: &SkillsConfig,
        character: &mut Character,
        skill: SkillType,
        value: f32,
        outbox: &mut dyn RelayOutbox,
    ) -> RaiseReport {
        if skill.is_none() {
            return RaiseReport {
                skill,
                value,
                factor: FactorBreakdown::new(value),
                outcome: RaiseOutcome::Ignored,
                relay: None,
            };
        }

        let level = character.skills.level(skill);
        let factor = self.compute_factor(config, character, skill, level, value);
        let outcome = character.skills.raise(skill, factor.factor());

        let relay = relay_credit(&self.registry, config, character, skill, value);
        if let Some(message) = &relay {
            outbox.send(message.clone());
        }

        RaiseReport {
            skill,
            value,
            factor,
            outcome,
            relay,
        }
    }

    /// Applies the host death penalty with peaks recorded and swim exempted.
    pub fn on_death(&self, config: &SkillsConfig, character: &mut Character) -> DeathReport {
        self.on_death_with(config, character, |skills| {
            skills.lower_all(SkillSet::DEATH_LOWER_FACTOR)
        })
    }

    /// Like [`SkillEngine::on_death`] with a custom host loss routine.
    pub fn on_death_with<F>(&self, config: &SkillsConfig, character: &mut Character, host_loss: F) -> DeathReport
    where
        F: FnOnce(&mut SkillSet),
    {
        intercept_death(config, character, host_loss)
    }

    /// Applies a status effect cast by `caster`.
    pub fn on_status_effect_added(
        &self,
        target: &mut Character,
        effect: StatusEffect,
        caster: EntityId,
    ) -> EffectApplication {
        apply_status_effect(target, effect, caster)
    }

    /// Runs before the host checks whether `effect` is done. Returns true if
    /// the shield break reward was cleared.
    pub fn on_status_effect_check_done(&self, config: &SkillsConfig, effect: &mut StatusEffect) -> bool {
        suppress_break_xp(config, effect)
    }

    /// Advances status effects by `dt` seconds and ends those that are done.
    ///
    /// Shield break rewards are suppressed per configuration before the done
    /// check, then granted through [`SkillEngine::raise_skill`].
    pub fn update_status_effects(
        &self,
        config: &SkillsConfig,
        character: &mut Character,
        dt: f32,
        outbox: &mut dyn RelayOutbox,
    ) -> EffectUpdate {
        character.status_effects.advance(dt);
        for effect in character.status_effects.iter_mut() {
            self.on_status_effect_check_done(config, effect);
        }

        let ended = character.status_effects.drain_done();
        let mut break_rewards = Vec::new();
        for effect in &ended {
            if effect.is_broken() && !effect.level_up_skill_on_break.is_none() {
                break_rewards.push(self.raise_skill(
                    config,
                    character,
                    effect.level_up_skill_on_break,
                    effect.level_up_skill_factor,
                    outbox,
                ));
            }
        }

        EffectUpdate {
            ended,
            break_rewards,
        }
    }

    /// Applies the sneak bonus to a hit by the local `attacker` and grants
    /// the sneak experience.
    pub fn on_damage(
        &self,
        config: &SkillsConfig,
        attacker: &mut Character,
        defender: Option<Awareness>,
        hit: &mut HitData,
        outbox: &mut dyn RelayOutbox,
    ) -> Option<(SneakReport, RaiseReport)> {
        let report = apply_sneak_bonus(config, attacker, defender, hit)?;
        let raise = self.raise_skill(config, attacker, SkillType::SNEAK, report.xp, outbox);
        Some((report, raise))
    }

    /// Applies a relay credit received for the local `character`.
    ///
    /// The credit is a raw blood magic raise and goes through the normal raise
    /// path, so experience bonuses apply to it.
    pub fn on_relay_received(
        &self,
        config: &SkillsConfig,
        character: &mut Character,
        credit: f32,
        outbox: &mut dyn RelayOutbox,
    ) -> RaiseReport {
        self.raise_skill(config, character, SkillType::BLOOD_MAGIC, credit, outbox)
    }
}
