use std::time::Duration;

use anyhow::{Context, Result};
use skills_core::{
    Awareness, HitData, PeakLedger, PeerId, SkillEngine, SkillSet, SkillType, SkillsConfig,
    StatusEffect,
};
use skills_runtime::{Network, Peer, SharedConfig};
use tracing::info;

const SHIELD_TTL: f32 = 30.0;
const SHIELD_ABSORB: f32 = 60.0;
const SHIELD_FACTOR: f32 = 1.0;

pub async fn run(config: SkillsConfig) -> Result<()> {
    let network = Network::new();
    let shared = SharedConfig::new(config);

    let mut warrior = Peer::new(PeerId(1), SkillEngine::standard(), shared.clone(), network.clone());
    let mut mage = Peer::new(PeerId(2), SkillEngine::standard(), shared.clone(), network);

    let fighter = warrior.spawn_player(
        "warrior",
        SkillSet::with_levels([
            (SkillType::SWORDS, 20.0),
            (SkillType::AXES, 45.0),
            (SkillType::SNEAK, 30.0),
            (SkillType::SWIM, 25.0),
        ]),
    );
    let healer = mage.spawn_player("mage", SkillSet::with_levels([(SkillType::BLOOD_MAGIC, 15.0)]));

    info!("Mage shields the warrior");
    mage.cast_status_effect(
        healer,
        fighter,
        StatusEffect::shield(SHIELD_TTL, SHIELD_ABSORB, SHIELD_FACTOR),
    )?;
    warrior.pump();

    info!("Warrior trains swords under the shield");
    for _ in 0..3 {
        let report = warrior.raise_skill(fighter, SkillType::SWORDS, 1.0)?;
        info!(
            factor = report.factor.factor(),
            bonuses = ?report.factor.bonuses(),
            relayed = ?report.relay.map(|m| m.credit),
            "Swords raised"
        );
        tokio::time::timeout(Duration::from_millis(100), mage.recv())
            .await
            .context("relay credit never reached the mage")?;
    }

    info!("Shield absorbs a heavy blow and breaks");
    let absorbed = warrior.absorb_damage(fighter, SHIELD_ABSORB * 2.0)?;
    for (entity, update) in warrior.update(0.1) {
        info!(%entity, absorbed, ended = update.ended.len(), rewards = update.break_rewards.len(), "Effects ended");
    }

    info!("Warrior backstabs an unaware troll");
    let mut hit = HitData::new(fighter, 40.0, 3.0);
    if let Some((sneak, raise)) = warrior.damage(&mut hit, Some(Awareness::UNAWARE)) {
        info!(
            multiplier = sneak.backstab_multiplier,
            backstab = hit.backstab_bonus,
            outcome = ?raise.outcome,
            "Sneak attack"
        );
    }

    info!("Warrior drowns");
    let death = warrior.die(fighter)?;
    let character = warrior.local_player()?;
    for (skill, entry) in character.skills.iter() {
        info!(
            %skill,
            level = entry.level,
            peak = ?PeakLedger::peak(&character.custom_data, skill),
            "After death"
        );
    }
    info!(peaks = death.peaks_recorded.len(), swim_exempted = death.swim_exempted, "Death handled");

    let report = warrior.raise_skill(fighter, SkillType::SWORDS, 1.0)?;
    info!(factor = report.factor.factor(), "Swords recovering towards peak");

    let mage_player = mage.local_player()?;
    if let Some(skill) = mage_player.skills.get(SkillType::BLOOD_MAGIC) {
        info!(
            level = skill.level,
            progress = skill.accumulator,
            "Mage blood magic after session"
        );
    }

    Ok(())
}
