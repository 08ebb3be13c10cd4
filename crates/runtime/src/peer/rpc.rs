//! Remote methods a peer registers for its characters.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use skills_core::engine::{RAISE_BLOOD_MAGIC_METHOD, decode_credit, encode_credit};
use skills_core::{EntityId, StatusEffect};

use crate::error::{Result, RuntimeError};

/// Applies a status effect on the target's owner, naming the caster.
pub const ADD_STATUS_EFFECT_METHOD: &str = "SmartSkills AddStatusEffect";

/// Remote methods understood by a peer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RpcMethod {
    RaiseBloodMagic,
    AddStatusEffect,
}

impl RpcMethod {
    pub const ALL: [RpcMethod; 2] = [RpcMethod::RaiseBloodMagic, RpcMethod::AddStatusEffect];

    pub fn name(self) -> &'static str {
        match self {
            RpcMethod::RaiseBloodMagic => RAISE_BLOOD_MAGIC_METHOD,
            RpcMethod::AddStatusEffect => ADD_STATUS_EFFECT_METHOD,
        }
    }
}

/// Payload of [`ADD_STATUS_EFFECT_METHOD`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AddStatusEffectPayload {
    pub effect: StatusEffect,
    pub caster: EntityId,
}

impl AddStatusEffectPayload {
    pub fn encode(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|source| RuntimeError::Payload {
            method: ADD_STATUS_EFFECT_METHOD.to_string(),
            source,
        })
    }

    pub fn decode(payload: &[u8]) -> Result<Self> {
        bincode::deserialize(payload).map_err(|source| RuntimeError::Payload {
            method: ADD_STATUS_EFFECT_METHOD.to_string(),
            source,
        })
    }
}

pub(crate) fn encode_relay_credit(credit: f32) -> Result<Vec<u8>> {
    encode_credit(credit).map_err(|source| RuntimeError::Payload {
        method: RAISE_BLOOD_MAGIC_METHOD.to_string(),
        source,
    })
}

pub(crate) fn decode_relay_credit(payload: &[u8]) -> Result<f32> {
    decode_credit(payload).map_err(|source| RuntimeError::Payload {
        method: RAISE_BLOOD_MAGIC_METHOD.to_string(),
        source,
    })
}

/// Per-entity table of registered remote methods.
#[derive(Debug, Default)]
pub struct RpcRegistry {
    methods: HashMap<EntityId, HashMap<&'static str, RpcMethod>>,
}

impl RpcRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entity: EntityId, method: RpcMethod) {
        self.methods
            .entry(entity)
            .or_default()
            .insert(method.name(), method);
    }

    pub fn unregister_all(&mut self, entity: EntityId) {
        self.methods.remove(&entity);
    }

    pub fn lookup(&self, entity: EntityId, method: &str) -> Option<RpcMethod> {
        self.methods.get(&entity)?.get(method).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_per_entity() {
        let mut registry = RpcRegistry::new();
        let entity = EntityId::new(1, 1);
        registry.register(entity, RpcMethod::RaiseBloodMagic);

        assert_eq!(
            registry.lookup(entity, RAISE_BLOOD_MAGIC_METHOD),
            Some(RpcMethod::RaiseBloodMagic)
        );
        assert_eq!(registry.lookup(entity, ADD_STATUS_EFFECT_METHOD), None);
        assert_eq!(registry.lookup(EntityId::new(1, 2), RAISE_BLOOD_MAGIC_METHOD), None);

        registry.unregister_all(entity);
        assert_eq!(registry.lookup(entity, RAISE_BLOOD_MAGIC_METHOD), None);
    }

    #[test]
    fn status_effect_payload_decodes() {
        let payload = AddStatusEffectPayload {
            effect: StatusEffect::shield(60.0, 100.0, 0.5),
            caster: EntityId::new(7, 3),
        };
        let bytes = payload.encode().expect("encode");

        assert_eq!(AddStatusEffectPayload::decode(&bytes).expect("decode"), payload);
        assert!(AddStatusEffectPayload::decode(&bytes[..3]).is_err());
    }
}
