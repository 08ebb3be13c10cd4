//! Persistent key-value stores attached to characters and entities.
//!
//! Both stores are untyped from the engine's point of view: the peak ledger
//! and the caster binding wrap them with typed accessors and own the string
//! encoding.

use std::collections::BTreeMap;

use super::EntityId;

/// Per-character string store, saved with the character profile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomData {
    entries: BTreeMap<String, String>,
}

impl CustomData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Writes a single key. Overwrites any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-entity replicated store holding entity references.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityData {
    entity_refs: BTreeMap<String, EntityId>,
}

impl EntityData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads an entity reference. Unset keys read as [`EntityId::NONE`].
    pub fn entity_id(&self, key: &str) -> EntityId {
        self.entity_refs.get(key).copied().unwrap_or(EntityId::NONE)
    }

    pub fn set_entity_id(&mut self, key: impl Into<String>, value: EntityId) {
        self.entity_refs.insert(key.into(), value);
    }
}
