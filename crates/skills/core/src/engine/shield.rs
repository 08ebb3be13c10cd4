//! Shield application and break handling.

use crate::binding::CasterBinding;
use crate::config::SkillsConfig;
use crate::skill::SkillType;
use crate::state::{Character, EntityId, StatusEffect};

/// What happened to a status effect handed to [`apply_status_effect`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectApplication {
    /// The shield was added and its caster bound.
    Bound,
    /// A non-shield effect was added.
    Applied,
    /// The effect set was full. Nothing was added and no binding was written.
    Dropped,
}

impl EffectApplication {
    pub fn is_dropped(self) -> bool {
        self == Self::Dropped
    }
}

/// Applies `effect` to `target`, binding `caster` when the effect is the shield.
///
/// The binding is only written once the shield is actually carried, so a
/// dropped shield never leaves a binding behind.
pub fn apply_status_effect(
    target: &mut Character,
    effect: StatusEffect,
    caster: EntityId,
) -> EffectApplication {
    if !target.status_effects.add(effect) {
        return EffectApplication::Dropped;
    }
    if effect.is_shield() {
        CasterBinding::set(&mut target.entity_data, caster);
        EffectApplication::Bound
    } else {
        EffectApplication::Applied
    }
}

/// Clears the break reward of a shield when shield-break experience is
/// disabled. Must run before the host checks whether the effect is done.
///
/// Returns true if the reward was cleared.
pub fn suppress_break_xp(config: &SkillsConfig, effect: &mut StatusEffect) -> bool {
    if config.remove_shield_expire_xp && effect.is_shield() && !effect.level_up_skill_on_break.is_none() {
        effect.level_up_skill_on_break = SkillType::NONE;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{SHIELD_EFFECT_HASH, StatusEffects};

    #[test]
    fn shield_binds_caster() {
        let mut target = Character::new(EntityId::new(1, 1), "target");
        let caster = EntityId::new(2, 1);

        assert_eq!(
            apply_status_effect(&mut target, StatusEffect::shield(60.0, 100.0, 1.0), caster),
            EffectApplication::Bound
        );
        assert_eq!(CasterBinding::caster(&target.entity_data), Some(caster));
    }

    #[test]
    fn full_effect_set_drops_shield_without_binding() {
        let mut target = Character::new(EntityId::new(1, 1), "target");
        for hash in 1..=StatusEffects::CAPACITY as i32 {
            assert_eq!(
                apply_status_effect(&mut target, StatusEffect::new(hash, 10.0), EntityId::NONE),
                EffectApplication::Applied
            );
        }

        let outcome = apply_status_effect(
            &mut target,
            StatusEffect::shield(60.0, 100.0, 1.0),
            EntityId::new(2, 1),
        );

        assert!(outcome.is_dropped());
        assert!(!target.status_effects.has(SHIELD_EFFECT_HASH));
        assert_eq!(CasterBinding::caster(&target.entity_data), None);
    }

    #[test]
    fn reapplied_shield_rebinds_even_when_full() {
        let mut target = Character::new(EntityId::new(1, 1), "target");
        apply_status_effect(&mut target, StatusEffect::shield(60.0, 100.0, 1.0), EntityId::new(2, 1));
        for hash in 1..StatusEffects::CAPACITY as i32 {
            apply_status_effect(&mut target, StatusEffect::new(hash, 10.0), EntityId::NONE);
        }

        let outcome = apply_status_effect(
            &mut target,
            StatusEffect::shield(60.0, 100.0, 1.0),
            EntityId::new(3, 1),
        );

        assert_eq!(outcome, EffectApplication::Bound);
        assert_eq!(CasterBinding::caster(&target.entity_data), Some(EntityId::new(3, 1)));
    }

    #[test]
    fn other_effects_leave_binding_alone() {
        let mut target = Character::new(EntityId::new(1, 1), "target");

        assert_eq!(
            apply_status_effect(&mut target, StatusEffect::new(5, 10.0), EntityId::new(2, 1)),
            EffectApplication::Applied
        );
        assert_eq!(CasterBinding::caster(&target.entity_data), None);
        assert!(target.status_effects.has(5));
    }

    #[test]
    fn break_xp_suppressed_only_when_enabled() {
        let mut shield = StatusEffect::shield(60.0, 100.0, 1.0);
        let keep = SkillsConfig {
            remove_shield_expire_xp: false,
            ..SkillsConfig::default()
        };
        assert!(!suppress_break_xp(&keep, &mut shield));
        assert_eq!(shield.level_up_skill_on_break, SkillType::BLOOD_MAGIC);

        assert!(suppress_break_xp(&SkillsConfig::default(), &mut shield));
        assert_eq!(shield.level_up_skill_on_break, SkillType::NONE);
    }
}
