//! Skill progression rules: peak-level recovery, catch-up bonuses, death
//! penalty interception, and shield-caster experience relay.
//!
//! `skills-core` is pure and synchronous. Hosts feed game events into
//! [`engine::SkillEngine`], which reads and writes the character-owned
//! stores ([`ledger::PeakLedger`], [`binding::CasterBinding`]) and emits relay
//! messages through an [`engine::RelayOutbox`]. Transport, persistence and
//! configuration loading live in the runtime and content crates.
pub mod binding;
pub mod config;
pub mod engine;
pub mod ledger;
pub mod skill;
pub mod state;

pub use binding::{CASTER_KEY, CasterBinding};
pub use config::{ConfigError, SkillsConfig};
pub use engine::{
    Awareness, DeathReport, EffectApplication, EffectUpdate, FactorBreakdown, HitData,
    RAISE_BLOOD_MAGIC_METHOD, RaiseReport, RelayMessage, RelayOutbox, SkillEngine, SneakReport,
    VecOutbox, XpBonusSource,
};
pub use ledger::PeakLedger;
pub use skill::{BuiltinSkill, SkillRegistry, SkillType, stable_hash};
pub use state::{
    Character, CustomData, EntityData, EntityId, PeerId, RaiseOutcome, Skill, SkillSet,
    StatusEffect, StatusEffects,
};
