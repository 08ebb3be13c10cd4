//! A participant of a multiplayer session.
//!
//! A [`Peer`] owns a set of characters and is the only writer of their state.
//! Game events for owned characters run through the [`SkillEngine`] with a
//! fresh configuration snapshot. Relay credits and status effects aimed at
//! characters owned elsewhere leave as [`RoutedRpc`]s and are applied by the
//! owning peer when it drains its inbox.

mod outbox;
mod rpc;

pub use outbox::NetworkOutbox;
pub use rpc::{ADD_STATUS_EFFECT_METHOD, AddStatusEffectPayload, RpcMethod, RpcRegistry};

use std::collections::BTreeMap;

use skills_core::{
    Awareness, Character, DeathReport, EffectApplication, EffectUpdate, EntityId, HitData,
    PeerId, RaiseReport, SkillEngine, SkillSet, SkillType, SneakReport, StatusEffect,
};
use tracing::{debug, info, trace, warn};

use crate::config::SharedConfig;
use crate::error::{Result, RuntimeError};
use crate::network::{Inbox, Network, RoutedRpc};

use rpc::decode_relay_credit;

/// Execution context of one session participant.
pub struct Peer {
    id: PeerId,
    engine: SkillEngine,
    config: SharedConfig,
    network: Network,
    inbox: Inbox,
    characters: BTreeMap<EntityId, Character>,
    local_player: Option<EntityId>,
    rpcs: RpcRegistry,
    next_entity: u32,
}

impl Peer {
    /// Connects a new peer to `network`.
    pub fn new(id: PeerId, engine: SkillEngine, config: SharedConfig, network: Network) -> Self {
        let inbox = network.connect(id);
        Self {
            id,
            engine,
            config,
            network,
            inbox,
            characters: BTreeMap::new(),
            local_player: None,
            rpcs: RpcRegistry::new(),
            next_entity: 1,
        }
    }

    pub fn id(&self) -> PeerId {
        self.id
    }

    pub fn config(&self) -> &SharedConfig {
        &self.config
    }

    /// Spawns the local player and registers its remote methods.
    pub fn spawn_player(&mut self, name: &str, skills: SkillSet) -> EntityId {
        let id = self.spawn(name, skills);
        for method in RpcMethod::ALL {
            self.rpcs.register(id, method);
        }
        self.local_player = Some(id);
        info!(target: "skills_runtime::peer", peer = %self.id, entity = %id, name, "Player spawned");
        id
    }

    /// Spawns a non-player character. It can receive status effects but
    /// never relay credits.
    pub fn spawn_character(&mut self, name: &str, skills: SkillSet) -> EntityId {
        let id = self.spawn(name, skills);
        self.rpcs.register(id, RpcMethod::AddStatusEffect);
        debug!(target: "skills_runtime::peer", peer = %self.id, entity = %id, name, "Character spawned");
        id
    }

    fn spawn(&mut self, name: &str, skills: SkillSet) -> EntityId {
        let id = EntityId::new(self.id.0, self.next_entity);
        self.next_entity += 1;
        self.characters
            .insert(id, Character::new(id, name).with_skills(skills));
        id
    }

    /// Removes an owned character. Messages still in flight for it are
    /// dropped on arrival.
    pub fn despawn(&mut self, entity: EntityId) -> Result<Character> {
        owned_mut(&mut self.characters, self.id, entity)?;
        self.rpcs.unregister_all(entity);
        if self.local_player == Some(entity) {
            self.local_player = None;
        }
        self.characters
            .remove(&entity)
            .ok_or(RuntimeError::UnknownCharacter(entity))
    }

    pub fn local_player(&self) -> Result<&Character> {
        self.local_player
            .and_then(|id| self.characters.get(&id))
            .ok_or(RuntimeError::NoLocalPlayer)
    }

    pub fn character(&self, entity: EntityId) -> Option<&Character> {
        self.characters.get(&entity)
    }

    pub fn character_mut(&mut self, entity: EntityId) -> Result<&mut Character> {
        owned_mut(&mut self.characters, self.id, entity)
    }

    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.characters.values()
    }

    /// Raises a skill of an owned character.
    pub fn raise_skill(&mut self, entity: EntityId, skill: SkillType, value: f32) -> Result<RaiseReport> {
        let config = self.config.snapshot();
        let character = owned_mut(&mut self.characters, self.id, entity)?;
        let mut outbox = NetworkOutbox::new(&self.network, self.id);

        let report = self
            .engine
            .raise_skill(&config, character, skill, value, &mut outbox);
        let bonuses: Vec<&'static str> = report
            .factor
            .bonuses()
            .iter()
            .map(|bonus| bonus.source.into())
            .collect();
        trace!(
            target: "skills_runtime::peer",
            entity = %entity,
            skill = %skill,
            value,
            ?bonuses,
            factor = report.factor.factor(),
            outcome = ?report.outcome,
            "Skill raised"
        );
        Ok(report)
    }

    /// Applies the death penalty to an owned character.
    pub fn die(&mut self, entity: EntityId) -> Result<DeathReport> {
        let config = self.config.snapshot();
        let character = owned_mut(&mut self.characters, self.id, entity)?;

        let report = self.engine.on_death(&config, character);
        info!(
            target: "skills_runtime::peer",
            entity = %entity,
            peaks = report.peaks_recorded.len(),
            swim_exempted = report.swim_exempted,
            "Death penalty applied"
        );
        Ok(report)
    }

    /// Casts `effect` from the owned `caster` onto `target`.
    ///
    /// Owned targets are affected immediately and the outcome is returned.
    /// Other targets are affected once their owner drains its inbox, and
    /// `None` is returned.
    pub fn cast_status_effect(
        &mut self,
        caster: EntityId,
        target: EntityId,
        effect: StatusEffect,
    ) -> Result<Option<EffectApplication>> {
        owned_mut(&mut self.characters, self.id, caster)?;

        if target.owner() == self.id {
            let character = owned_mut(&mut self.characters, self.id, target)?;
            let applied = self.engine.on_status_effect_added(character, effect, caster);
            log_application(applied, target, caster);
            return Ok(Some(applied));
        }

        let payload = AddStatusEffectPayload { effect, caster }.encode()?;
        self.network.send(RoutedRpc {
            sender: self.id,
            target_peer: target.owner(),
            target_entity: target,
            method: ADD_STATUS_EFFECT_METHOD.to_string(),
            payload,
        });
        Ok(None)
    }

    /// Deals `damage` to the shields of an owned character and returns the
    /// amount absorbed.
    pub fn absorb_damage(&mut self, entity: EntityId, damage: f32) -> Result<f32> {
        let character = owned_mut(&mut self.characters, self.id, entity)?;
        let mut remaining = damage;
        for effect in character.status_effects.iter_mut() {
            if remaining <= 0.0 {
                break;
            }
            remaining = effect.absorb(remaining);
        }
        Ok(damage - remaining)
    }

    /// Advances the status effects of every owned character by `dt` seconds.
    pub fn update(&mut self, dt: f32) -> Vec<(EntityId, EffectUpdate)> {
        let config = self.config.snapshot();
        let mut outbox = NetworkOutbox::new(&self.network, self.id);
        let mut updates = Vec::new();

        for (id, character) in &mut self.characters {
            let update = self
                .engine
                .update_status_effects(&config, character, dt, &mut outbox);
            if update.ended.is_empty() {
                continue;
            }
            debug!(
                target: "skills_runtime::peer",
                entity = %id,
                ended = update.ended.len(),
                rewards = update.break_rewards.len(),
                "Status effects ended"
            );
            updates.push((*id, update));
        }
        updates
    }

    /// Applies the sneak bonus to a hit dealt by the local player.
    ///
    /// Hits by any other attacker are left untouched.
    pub fn damage(
        &mut self,
        hit: &mut HitData,
        defender: Option<Awareness>,
    ) -> Option<(SneakReport, RaiseReport)> {
        if self.local_player != Some(hit.attacker) {
            return None;
        }
        let config = self.config.snapshot();
        let attacker = self.characters.get_mut(&hit.attacker)?;
        let mut outbox = NetworkOutbox::new(&self.network, self.id);

        let result = self
            .engine
            .on_damage(&config, attacker, defender, hit, &mut outbox);
        if let Some((sneak, _)) = &result {
            debug!(
                target: "skills_runtime::peer",
                attacker = %hit.attacker,
                multiplier = sneak.backstab_multiplier,
                "Sneak attack bonus applied"
            );
        }
        result
    }

    /// Handles every message already queued in the inbox.
    ///
    /// Returns the number of messages handled successfully.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(rpc) = self.inbox.try_recv() {
            if self.dispatch(rpc) {
                handled += 1;
            }
        }
        handled
    }

    /// Waits for the next message and handles it.
    ///
    /// Returns `None` once the peer has been disconnected.
    pub async fn recv(&mut self) -> Option<bool> {
        let rpc = self.inbox.recv().await?;
        Some(self.dispatch(rpc))
    }

    /// Disconnects from the network. Messages sent to this peer afterwards
    /// are dropped.
    pub fn disconnect(&mut self) {
        self.network.disconnect(self.id);
        self.inbox.close();
    }

    fn dispatch(&mut self, rpc: RoutedRpc) -> bool {
        let sender = rpc.sender;
        let method = rpc.method.clone();
        match self.handle(rpc) {
            Ok(()) => true,
            Err(error) => {
                warn!(
                    target: "skills_runtime::peer",
                    peer = %self.id,
                    %sender,
                    %method,
                    %error,
                    "Dropped inbound message"
                );
                false
            }
        }
    }

    /// Applies one inbound message.
    ///
    /// Messages for characters this peer does not own, or for methods the
    /// target never registered, are rejected without side effects.
    pub fn handle(&mut self, rpc: RoutedRpc) -> Result<()> {
        let entity = rpc.target_entity;
        let character = owned_mut(&mut self.characters, self.id, entity)?;
        let method = self
            .rpcs
            .lookup(entity, &rpc.method)
            .ok_or_else(|| RuntimeError::UnknownMethod {
                entity,
                method: rpc.method.clone(),
            })?;

        let config = self.config.snapshot();
        match method {
            RpcMethod::RaiseBloodMagic => {
                let credit = decode_relay_credit(&rpc.payload)?;
                let mut outbox = NetworkOutbox::new(&self.network, self.id);
                let report = self
                    .engine
                    .on_relay_received(&config, character, credit, &mut outbox);
                debug!(
                    target: "skills_runtime::peer",
                    entity = %entity,
                    sender = %rpc.sender,
                    credit,
                    factor = report.factor.factor(),
                    "Relay credit received"
                );
            }
            RpcMethod::AddStatusEffect => {
                let payload = AddStatusEffectPayload::decode(&rpc.payload)?;
                let applied = self
                    .engine
                    .on_status_effect_added(character, payload.effect, payload.caster);
                log_application(applied, entity, payload.caster);
            }
        }
        Ok(())
    }
}

impl Drop for Peer {
    fn drop(&mut self) {
        self.network.disconnect(self.id);
    }
}

fn log_application(applied: EffectApplication, target: EntityId, caster: EntityId) {
    if applied.is_dropped() {
        warn!(
            target: "skills_runtime::peer",
            %target,
            %caster,
            "Status effect dropped, target carries too many effects"
        );
    } else {
        debug!(target: "skills_runtime::peer", %target, %caster, ?applied, "Status effect applied");
    }
}

fn owned_mut(
    characters: &mut BTreeMap<EntityId, Character>,
    peer: PeerId,
    entity: EntityId,
) -> Result<&mut Character> {
    let owner = entity.owner();
    if owner != peer {
        return Err(RuntimeError::NotOwner {
            entity,
            owner,
            peer,
        });
    }
    characters
        .get_mut(&entity)
        .ok_or(RuntimeError::UnknownCharacter(entity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use skills_core::RAISE_BLOOD_MAGIC_METHOD;

    fn peer(user: i64, network: &Network) -> Peer {
        Peer::new(
            PeerId(user),
            SkillEngine::standard(),
            SharedConfig::default(),
            network.clone(),
        )
    }

    #[test]
    fn spawned_entities_belong_to_the_peer() {
        let network = Network::new();
        let mut alice = peer(1, &network);

        let player = alice.spawn_player("alice", SkillSet::default());
        let wolf = alice.spawn_character("wolf", SkillSet::default());

        assert_eq!(player.owner(), alice.id());
        assert_ne!(player, wolf);
        assert_eq!(alice.local_player().map(|c| c.id).ok(), Some(player));
    }

    #[test]
    fn rejects_foreign_characters() {
        let network = Network::new();
        let mut alice = peer(1, &network);

        let err = alice
            .raise_skill(EntityId::new(2, 1), SkillType::SWORDS, 1.0)
            .unwrap_err();
        assert!(matches!(err, RuntimeError::NotOwner { .. }));

        let err = alice
            .raise_skill(EntityId::new(1, 9), SkillType::SWORDS, 1.0)
            .unwrap_err();
        assert!(matches!(err, RuntimeError::UnknownCharacter(_)));
    }

    #[test]
    fn unregistered_method_is_rejected() {
        let network = Network::new();
        let mut alice = peer(1, &network);
        let wolf = alice.spawn_character("wolf", SkillSet::default());

        let err = alice
            .handle(RoutedRpc {
                sender: PeerId(2),
                target_peer: PeerId(1),
                target_entity: wolf,
                method: RAISE_BLOOD_MAGIC_METHOD.to_string(),
                payload: Vec::new(),
            })
            .unwrap_err();

        assert!(matches!(err, RuntimeError::UnknownMethod { .. }));
    }

    #[test]
    fn malformed_credit_changes_nothing() {
        let network = Network::new();
        let mut alice = peer(1, &network);
        let player = alice.spawn_player("alice", SkillSet::default());

        let err = alice
            .handle(RoutedRpc {
                sender: PeerId(2),
                target_peer: PeerId(1),
                target_entity: player,
                method: RAISE_BLOOD_MAGIC_METHOD.to_string(),
                payload: vec![1],
            })
            .unwrap_err();

        assert!(matches!(err, RuntimeError::Payload { .. }));
        assert_eq!(alice.local_player().map(|c| c.skills.len()).ok(), Some(0));
    }

    fn crowd_with_effects(peer: &mut Peer, entity: EntityId) {
        for hash in 1..=skills_core::state::MAX_STATUS_EFFECTS as i32 {
            let applied = peer
                .cast_status_effect(entity, entity, StatusEffect::new(hash, 30.0))
                .expect("cast");
            assert_eq!(applied, Some(EffectApplication::Applied));
        }
    }

    #[test]
    fn local_shield_dropped_when_effects_full() {
        let network = Network::new();
        let mut alice = peer(1, &network);
        let player = alice.spawn_player("alice", SkillSet::default());
        crowd_with_effects(&mut alice, player);

        let applied = alice
            .cast_status_effect(player, player, StatusEffect::shield(60.0, 100.0, 1.0))
            .expect("cast");

        assert_eq!(applied, Some(EffectApplication::Dropped));
        let character = alice.local_player().expect("player");
        assert_eq!(skills_core::CasterBinding::caster(&character.entity_data), None);
    }

    #[test]
    fn remote_shield_dropped_when_effects_full() {
        let network = Network::new();
        let mut alice = peer(1, &network);
        let mut bob = peer(2, &network);
        let player = alice.spawn_player("alice", SkillSet::default());
        let healer = bob.spawn_player("bob", SkillSet::default());
        crowd_with_effects(&mut alice, player);

        let applied = bob
            .cast_status_effect(healer, player, StatusEffect::shield(60.0, 100.0, 1.0))
            .expect("cast");
        assert_eq!(applied, None);
        assert_eq!(alice.pump(), 1);

        let report = alice
            .raise_skill(player, SkillType::SWORDS, 5.0)
            .expect("raise");
        let character = alice.local_player().expect("player");
        assert_eq!(skills_core::CasterBinding::caster(&character.entity_data), None);
        assert!(report.relay.is_none());
        assert_eq!(bob.pump(), 0);
    }

    #[test]
    fn absorb_spreads_over_shields() {
        let network = Network::new();
        let mut alice = peer(1, &network);
        alice
            .config()
            .update(skills_core::SkillsConfig {
                remove_shield_expire_xp: false,
                ..Default::default()
            })
            .expect("valid config");
        let player = alice.spawn_player("alice", SkillSet::default());
        let applied = alice
            .cast_status_effect(player, player, StatusEffect::shield(60.0, 10.0, 1.0))
            .expect("cast");
        assert_eq!(applied, Some(EffectApplication::Bound));

        assert_eq!(alice.absorb_damage(player, 25.0).expect("absorb"), 10.0);
        let updates = alice.update(0.0);
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].1.break_rewards.len(), 1);
        assert!(alice.local_player().expect("player").skills.get(SkillType::BLOOD_MAGIC).is_some());
    }
}
