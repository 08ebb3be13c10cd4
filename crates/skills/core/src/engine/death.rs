//! Death penalty interception.
//!
//! Around the host's skill loss on death the engine:
//! 1. detaches the swim skill when swim loss is disabled,
//! 2. records every remaining skill's pre-loss level in the peak ledger,
//! 3. lets the host lower skills,
//! 4. reattaches the detached swim skill unchanged.

use crate::config::SkillsConfig;
use crate::ledger::PeakLedger;
use crate::skill::SkillType;
use crate::state::{Character, Skill, SkillSet};

/// Swim skill held aside while the host applies the death penalty.
#[derive(Debug, Default)]
#[must_use = "the detached swim skill is lost unless the guard is finished"]
pub struct DeathGuard {
    swim: Option<Skill>,
}

impl DeathGuard {
    /// Prepares `character` for the host's loss logic.
    ///
    /// Returns the guard and the peaks written to the ledger.
    pub fn prepare(config: &SkillsConfig, character: &mut Character) -> (Self, Vec<(SkillType, f32)>) {
        let swim = if config.swim_skill_loss_disabled {
            character.skills.detach(SkillType::SWIM)
        } else {
            None
        };

        let levels: Vec<(SkillType, f32)> = character
            .skills
            .iter()
            .map(|(skill, entry)| (skill, entry.level))
            .collect();

        let recorded = levels
            .into_iter()
            .filter(|&(skill, level)| PeakLedger::record(&mut character.custom_data, skill, level))
            .collect();

        (Self { swim }, recorded)
    }

    /// Restores the detached swim skill, if any. Returns true if restored.
    pub fn finish(self, skills: &mut SkillSet) -> bool {
        match self.swim {
            Some(swim) => {
                skills.attach(SkillType::SWIM, swim);
                true
            }
            None => false,
        }
    }
}

/// Summary of one intercepted death.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeathReport {
    /// Skills whose peak was raised by this death.
    pub peaks_recorded: Vec<(SkillType, f32)>,
    /// True if the swim skill was held out of the death penalty.
    pub swim_exempted: bool,
}

/// Runs `host_loss` on the character's skills with the peak ledger updated
/// beforehand and swim exempted when configured.
pub fn intercept_death<F>(config: &SkillsConfig, character: &mut Character, host_loss: F) -> DeathReport
where
    F: FnOnce(&mut SkillSet),
{
    let (guard, peaks_recorded) = DeathGuard::prepare(config, character);
    host_loss(&mut character.skills);
    let swim_exempted = guard.finish(&mut character.skills);

    DeathReport {
        peaks_recorded,
        swim_exempted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::EntityId;

    fn hero() -> Character {
        Character::new(EntityId::new(1, 1), "hero").with_skills(SkillSet::with_levels([
            (SkillType::SWORDS, 40.0),
            (SkillType::SWIM, 20.0),
            (SkillType::RUN, 8.0),
        ]))
    }

    fn host_loss(skills: &mut SkillSet) {
        skills.lower_all(SkillSet::DEATH_LOWER_FACTOR);
    }

    #[test]
    fn peaks_capture_pre_loss_levels() {
        let config = SkillsConfig::default();
        let mut hero = hero();

        intercept_death(&config, &mut hero, host_loss);

        assert_eq!(hero.skills.level(SkillType::SWORDS), 30.0);
        assert_eq!(PeakLedger::peak(&hero.custom_data, SkillType::SWORDS), Some(40.0));
        assert_eq!(PeakLedger::peak(&hero.custom_data, SkillType::RUN), Some(8.0));
    }

    #[test]
    fn swim_is_exempt_when_loss_disabled() {
        let config = SkillsConfig {
            swim_skill_loss_disabled: true,
            ..SkillsConfig::default()
        };
        let mut hero = hero();
        hero.skills.get_or_insert(SkillType::SWIM).accumulator = 0.7;

        let report = intercept_death(&config, &mut hero, host_loss);

        assert!(report.swim_exempted);
        assert_eq!(hero.skills.level(SkillType::SWIM), 20.0);
        assert_eq!(hero.skills.get(SkillType::SWIM).map(|s| s.accumulator), Some(0.7));
        // Detached before recording, so no peak is written for swim.
        assert_eq!(PeakLedger::peak(&hero.custom_data, SkillType::SWIM), None);
    }

    #[test]
    fn swim_is_lowered_when_loss_enabled() {
        let config = SkillsConfig {
            swim_skill_loss_disabled: false,
            ..SkillsConfig::default()
        };
        let mut hero = hero();

        let report = intercept_death(&config, &mut hero, host_loss);

        assert!(!report.swim_exempted);
        assert_eq!(hero.skills.level(SkillType::SWIM), 15.0);
        assert_eq!(PeakLedger::peak(&hero.custom_data, SkillType::SWIM), Some(20.0));
    }

    #[test]
    fn missing_swim_skill_is_noop() {
        let config = SkillsConfig::default();
        let mut hero = Character::new(EntityId::new(1, 1), "hero")
            .with_skills(SkillSet::with_levels([(SkillType::BOWS, 12.0)]));

        let report = intercept_death(&config, &mut hero, host_loss);

        assert!(!report.swim_exempted);
        assert!(hero.skills.get(SkillType::SWIM).is_none());
    }

    #[test]
    fn peaks_are_monotonic_across_deaths() {
        let config = SkillsConfig::default();
        let mut hero = hero();

        let first = intercept_death(&config, &mut hero, host_loss);
        assert_eq!(first.peaks_recorded.len(), 2);

        let second = intercept_death(&config, &mut hero, host_loss);
        assert!(second.peaks_recorded.is_empty());
        assert_eq!(PeakLedger::peak(&hero.custom_data, SkillType::SWORDS), Some(40.0));
        assert_eq!(hero.skills.level(SkillType::SWORDS), 22.5);
    }
}
