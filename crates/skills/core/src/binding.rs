//! Record of who last cast the protective shield on an entity.
//!
//! The binding is written whenever the shield is applied and is never
//! cleared, so it can outlive the shield. Consumers must confirm the shield is
//! still active on the entity before trusting it.

use crate::state::{EntityData, EntityId};

/// Entity store key holding the caster reference.
pub const CASTER_KEY: &str = "Shield Staff Caster";

/// Typed accessor for the caster binding in an entity store.
pub struct CasterBinding;

impl CasterBinding {
    /// Binds `caster` as the last shield caster of the entity owning `data`.
    pub fn set(data: &mut EntityData, caster: EntityId) {
        data.set_entity_id(CASTER_KEY, caster);
    }

    /// Bound caster, or `None` if unset or bound to [`EntityId::NONE`].
    pub fn caster(data: &EntityData) -> Option<EntityId> {
        Some(data.entity_id(CASTER_KEY)).filter(|id| !id.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_binding_is_absent() {
        assert_eq!(CasterBinding::caster(&EntityData::new()), None);
    }

    #[test]
    fn last_caster_wins() {
        let mut data = EntityData::new();
        CasterBinding::set(&mut data, EntityId::new(7, 1));
        CasterBinding::set(&mut data, EntityId::new(9, 4));
        assert_eq!(CasterBinding::caster(&data), Some(EntityId::new(9, 4)));
    }

    #[test]
    fn none_sentinel_is_absent() {
        let mut data = EntityData::new();
        CasterBinding::set(&mut data, EntityId::NONE);
        assert_eq!(CasterBinding::caster(&data), None);
    }
}
