//! A player character as seen by the skill engine.

use super::{CustomData, EntityData, EntityId, PeerId, SkillSet, StatusEffects};

/// Character state mutated by the engine.
///
/// All fields are owned by the participant that owns the character; only that
/// participant may mutate them.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub id: EntityId,
    pub name: String,
    pub skills: SkillSet,
    /// Profile store, persisted with the character.
    pub custom_data: CustomData,
    /// Replicated entity store.
    pub entity_data: EntityData,
    pub status_effects: StatusEffects,
}

impl Character {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_skills(mut self, skills: SkillSet) -> Self {
        self.skills = skills;
        self
    }

    /// Participant that owns this character.
    pub fn owner(&self) -> PeerId {
        self.id.owner()
    }
}
