//! Cross-entity experience relay.
//!
//! When a shielded character gains experience in an attack skill, a share of
//! that gain is sent to the participant owning the shield's caster. Delivery
//! is fire-and-forget: no acknowledgment, no retry, no ordering guarantee.
//! A duplicated delivery only over-credits the caster.

use crate::binding::CasterBinding;
use crate::config::SkillsConfig;
use crate::skill::{SkillRegistry, SkillType};
use crate::state::{Character, EntityId, PeerId, SHIELD_EFFECT_HASH};

/// Remote operation that credits blood magic experience to its target.
pub const RAISE_BLOOD_MAGIC_METHOD: &str = "SmartSkills RaiseBloodMagic";

/// An outbound relay credit addressed to the caster's owner.
#[derive(Clone, Debug, PartialEq)]
pub struct RelayMessage {
    pub target_peer: PeerId,
    pub target_entity: EntityId,
    pub method: &'static str,
    pub credit: f32,
}

/// Sink for outbound relay messages.
///
/// Implementations must not block and must not report delivery failures back
/// to the engine.
pub trait RelayOutbox {
    fn send(&mut self, message: RelayMessage);
}

impl<T: RelayOutbox + ?Sized> RelayOutbox for &mut T {
    fn send(&mut self, message: RelayMessage) {
        (**self).send(message);
    }
}

/// Outbox that buffers messages in memory.
#[derive(Clone, Debug, Default)]
pub struct VecOutbox {
    messages: Vec<RelayMessage>,
}

impl VecOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[RelayMessage] {
        &self.messages
    }

    pub fn drain(&mut self) -> impl Iterator<Item = RelayMessage> + '_ {
        self.messages.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl RelayOutbox for VecOutbox {
    fn send(&mut self, message: RelayMessage) {
        self.messages.push(message);
    }
}

/// Outbox that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullOutbox;

impl RelayOutbox for NullOutbox {
    fn send(&mut self, _message: RelayMessage) {}
}

/// Builds the relay message for `value` experience gained in `skill`.
///
/// Returns `None` unless `skill` is an attack skill, the attacker currently
/// carries an active shield, and the shield's caster binding is set. The
/// active-shield check comes first so a stale binding alone never relays.
///
/// ```text
/// credit = value × shield.level_up_skill_factor × shield_attack_xp_factor_pct / 100
/// ```
pub fn relay_credit(
    registry: &SkillRegistry,
    config: &SkillsConfig,
    attacker: &Character,
    skill: SkillType,
    value: f32,
) -> Option<RelayMessage> {
    if !registry.is_attack_skill(skill) {
        return None;
    }

    let shield = attacker.status_effects.get(SHIELD_EFFECT_HASH)?;
    let caster = CasterBinding::caster(&attacker.entity_data)?;

    let credit =
        value * shield.level_up_skill_factor * config.shield_attack_xp_factor_pct as f32 / 100.0;

    Some(RelayMessage {
        target_peer: caster.owner(),
        target_entity: caster,
        method: RAISE_BLOOD_MAGIC_METHOD,
        credit,
    })
}

/// Encodes a relay credit as the remote operation's payload.
#[cfg(feature = "serde")]
pub fn encode_credit(credit: f32) -> Result<Vec<u8>, bincode::Error> {
    bincode::serialize(&credit)
}

/// Decodes a relay credit payload.
#[cfg(feature = "serde")]
pub fn decode_credit(payload: &[u8]) -> Result<f32, bincode::Error> {
    bincode::deserialize(payload)
}
