//! Experience factor stack.
//!
//! Every bonus is a "more" multiplier of the form `1 + percent / 100` applied
//! to the raise factor. Multiplication is commutative, so the result does not
//! depend on the order bonuses were added; the stack keeps them itemized so
//! callers can report which ones applied.

use crate::config::SkillsConfig;
use crate::ledger::PeakLedger;
use crate::skill::{SkillRegistry, SkillType};
use crate::state::Character;

/// Origin of an experience bonus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
pub enum XpBonusSource {
    /// Flat bonus for the swim skill.
    SwimGain,
    /// Skill is below its recorded peak.
    Recovery,
    /// Skill trails the strongest skill of the catch-up set.
    CatchUp,
}

/// A single multiplicative bonus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct XpBonus {
    pub source: XpBonusSource,
    /// Stored as percentage (e.g., 50 = ×1.5).
    pub percent: i32,
}

impl XpBonus {
    pub fn new(source: XpBonusSource, percent: i32) -> Self {
        Self { source, percent }
    }

    pub fn multiplier(&self) -> f32 {
        1.0 + self.percent as f32 / 100.0
    }
}

/// Base raise factor with the bonuses that apply to it.
///
/// # Example
/// ```
/// # use skills_core::engine::{FactorBreakdown, XpBonus, XpBonusSource};
/// let mut factor = FactorBreakdown::new(1.0);
/// factor.add(XpBonus::new(XpBonusSource::Recovery, 100));
/// factor.add(XpBonus::new(XpBonusSource::CatchUp, 50));
/// assert_eq!(factor.factor(), 3.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FactorBreakdown {
    base: f32,
    bonuses: Vec<XpBonus>,
}

impl FactorBreakdown {
    pub fn new(base: f32) -> Self {
        Self {
            base,
            bonuses: Vec::new(),
        }
    }

    pub fn add(&mut self, bonus: XpBonus) {
        self.bonuses.push(bonus);
    }

    pub fn base(&self) -> f32 {
        self.base
    }

    /// Final factor: the base times every bonus multiplier.
    pub fn factor(&self) -> f32 {
        self.bonuses
            .iter()
            .fold(self.base, |acc, bonus| acc * bonus.multiplier())
    }

    pub fn has(&self, source: XpBonusSource) -> bool {
        self.bonuses.iter().any(|b| b.source == source)
    }

    pub fn bonuses(&self) -> &[XpBonus] {
        &self.bonuses
    }

    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }
}

/// Collects every bonus that applies to raising `skill` from `level`.
///
/// - Swim gain: `skill` is swim.
/// - Recovery: a recorded peak exists and is strictly above `level`.
/// - Catch-up: `skill` is in the catch-up set and `level` is below the highest
///   level the character has in that set (untrained skills count as 0).
pub fn compute_factor(
    registry: &SkillRegistry,
    config: &SkillsConfig,
    character: &Character,
    skill: SkillType,
    level: f32,
    base: f32,
) -> FactorBreakdown {
    let mut breakdown = FactorBreakdown::new(base);

    if skill == SkillType::SWIM {
        breakdown.add(XpBonus::new(
            XpBonusSource::SwimGain,
            config.swim_gain_bonus_pct,
        ));
    }

    if PeakLedger::peak(&character.custom_data, skill).is_some_and(|peak| peak > level) {
        breakdown.add(XpBonus::new(
            XpBonusSource::Recovery,
            config.skill_recovery_bonus_pct,
        ));
    }

    if registry.is_catch_up_skill(skill) {
        let highest = registry
            .catch_up_skills()
            .map(|s| character.skills.level(s))
            .fold(0.0_f32, f32::max);
        if level < highest {
            breakdown.add(XpBonus::new(XpBonusSource::CatchUp, config.catchup_bonus_pct));
        }
    }

    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EntityId, SkillSet};

    fn character(levels: &[(SkillType, f32)]) -> Character {
        Character::new(EntityId::new(1, 1), "tester").with_skills(SkillSet::with_levels(levels.iter().copied()))
    }

    #[test]
    fn bonus_sources_have_log_names() {
        let names: Vec<&'static str> = [
            XpBonusSource::SwimGain,
            XpBonusSource::Recovery,
            XpBonusSource::CatchUp,
        ]
        .into_iter()
        .map(Into::into)
        .collect();
        assert_eq!(names, ["SwimGain", "Recovery", "CatchUp"]);
    }

    #[test]
    fn recovery_and_catch_up_stack() {
        let registry = SkillRegistry::standard();
        let config = SkillsConfig::default();
        let mut hero = character(&[(SkillType::SWORDS, 10.0), (SkillType::AXES, 40.0)]);
        PeakLedger::record(&mut hero.custom_data, SkillType::SWORDS, 40.0);

        let breakdown = compute_factor(&registry, &config, &hero, SkillType::SWORDS, 10.0, 1.0);

        assert!(breakdown.has(XpBonusSource::Recovery));
        assert!(breakdown.has(XpBonusSource::CatchUp));
        assert_eq!(breakdown.factor(), 3.0);
    }

    #[test]
    fn recovery_stops_at_peak() {
        let registry = SkillRegistry::standard();
        let config = SkillsConfig::default();
        let mut hero = character(&[(SkillType::RUN, 25.0)]);
        PeakLedger::record(&mut hero.custom_data, SkillType::RUN, 25.0);

        let breakdown = compute_factor(&registry, &config, &hero, SkillType::RUN, 25.0, 2.0);

        assert!(breakdown.is_empty());
        assert_eq!(breakdown.factor(), 2.0);
    }

    #[test]
    fn equal_catch_up_levels_get_no_bonus() {
        let registry = SkillRegistry::standard();
        let config = SkillsConfig::default();
        let levels: Vec<(SkillType, f32)> =
            registry.catch_up_skills().map(|s| (s, 30.0)).collect();
        let hero = character(&levels);

        for skill in registry.catch_up_skills() {
            let breakdown = compute_factor(&registry, &config, &hero, skill, 30.0, 1.0);
            assert!(!breakdown.has(XpBonusSource::CatchUp), "{skill}");
            assert_eq!(breakdown.factor(), 1.0);
        }
    }

    #[test]
    fn untrained_skill_catches_up_to_dual_wield() {
        let registry = SkillRegistry::standard();
        let config = SkillsConfig::default();
        let hero = character(&[(SkillType::from_name("Dual Swords"), 15.0)]);

        let breakdown = compute_factor(&registry, &config, &hero, SkillType::BOWS, 0.0, 1.0);

        assert!(breakdown.has(XpBonusSource::CatchUp));
        assert_eq!(breakdown.factor(), 1.5);
    }

    #[test]
    fn catch_up_ignores_skills_outside_set() {
        let registry = SkillRegistry::standard();
        let config = SkillsConfig::default();
        let hero = character(&[(SkillType::WOOD_CUTTING, 80.0), (SkillType::SWORDS, 5.0)]);

        let sword = compute_factor(&registry, &config, &hero, SkillType::SWORDS, 5.0, 1.0);
        assert!(!sword.has(XpBonusSource::CatchUp));

        let wood = compute_factor(&registry, &config, &hero, SkillType::WOOD_CUTTING, 80.0, 1.0);
        assert!(wood.is_empty());
    }

    #[test]
    fn swim_gain_applies_only_to_swim() {
        let registry = SkillRegistry::standard();
        let config = SkillsConfig {
            swim_gain_bonus_pct: 50,
            ..SkillsConfig::default()
        };
        let hero = character(&[]);

        let swim = compute_factor(&registry, &config, &hero, SkillType::SWIM, 0.0, 1.0);
        assert_eq!(swim.factor(), 1.5);

        let run = compute_factor(&registry, &config, &hero, SkillType::RUN, 0.0, 1.0);
        assert_eq!(run.factor(), 1.0);
    }

    #[test]
    fn zero_percent_bonus_is_neutral() {
        let registry = SkillRegistry::standard();
        let config = SkillsConfig {
            skill_recovery_bonus_pct: 0,
            catchup_bonus_pct: 0,
            ..SkillsConfig::default()
        };
        let mut hero = character(&[(SkillType::SWORDS, 10.0), (SkillType::AXES, 40.0)]);
        PeakLedger::record(&mut hero.custom_data, SkillType::SWORDS, 40.0);

        let breakdown = compute_factor(&registry, &config, &hero, SkillType::SWORDS, 10.0, 4.0);
        assert_eq!(breakdown.bonuses().len(), 2);
        assert_eq!(breakdown.factor(), 4.0);
    }
}
