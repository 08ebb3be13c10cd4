//! Character state touched by the skill engine.
//!
//! These types model the host's data the engine reads and writes: the skill
//! container, the two persistent key-value stores, and active status effects.

mod character;
mod ids;
mod skills;
mod status;
mod store;

pub use character::Character;
pub use ids::{EntityId, PeerId};
pub use skills::{RaiseOutcome, Skill, SkillSet};
pub use status::{
    MAX_STATUS_EFFECTS, SHIELD_EFFECT_HASH, SHIELD_EFFECT_NAME, StatusEffect, StatusEffects,
};
pub use store::{CustomData, EntityData};
