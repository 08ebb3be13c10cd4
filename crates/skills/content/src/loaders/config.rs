//! Skill engine configuration loader.
//!
//! File format, grouped the way server admins see the settings:
//! ```toml
//! [general]
//! skill_recovery_bonus = 100
//!
//! [weapons]
//! skill_catch_up_bonus = 50
//!
//! [swimming]
//! skill_loss = false
//! experience_bonus = 100
//!
//! [blood_magic]
//! shield_attack_xp_factor = 33
//! remove_shield_expired_xp = true
//!
//! [sneak]
//! bonus_damage = 50.0
//! bonus_experience = 20.0
//! ```
//! Every key is optional and falls back to the engine default.

use std::path::Path;

use serde::{Deserialize, Serialize};
use skills_core::SkillsConfig;

use crate::loaders::{LoadResult, read_file};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralSection {
    pub skill_recovery_bonus: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeaponsSection {
    pub skill_catch_up_bonus: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SwimmingSection {
    /// If false, the swim skill loses nothing on death.
    pub skill_loss: bool,
    pub experience_bonus: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BloodMagicSection {
    pub shield_attack_xp_factor: i32,
    pub remove_shield_expired_xp: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SneakSection {
    pub bonus_damage: f32,
    pub bonus_experience: f32,
}

/// On-disk layout of the configuration file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub general: GeneralSection,
    pub weapons: WeaponsSection,
    pub swimming: SwimmingSection,
    pub blood_magic: BloodMagicSection,
    pub sneak: SneakSection,
}

impl Default for GeneralSection {
    fn default() -> Self {
        Self {
            skill_recovery_bonus: SkillsConfig::DEFAULT_SKILL_RECOVERY_BONUS_PCT,
        }
    }
}

impl Default for WeaponsSection {
    fn default() -> Self {
        Self {
            skill_catch_up_bonus: SkillsConfig::DEFAULT_CATCHUP_BONUS_PCT,
        }
    }
}

impl Default for SwimmingSection {
    fn default() -> Self {
        Self {
            skill_loss: false,
            experience_bonus: SkillsConfig::DEFAULT_SWIM_GAIN_BONUS_PCT,
        }
    }
}

impl Default for BloodMagicSection {
    fn default() -> Self {
        Self {
            shield_attack_xp_factor: SkillsConfig::DEFAULT_SHIELD_ATTACK_XP_FACTOR_PCT,
            remove_shield_expired_xp: true,
        }
    }
}

impl Default for SneakSection {
    fn default() -> Self {
        Self {
            bonus_damage: SkillsConfig::DEFAULT_SNEAK_BONUS_DAMAGE_PCT,
            bonus_experience: SkillsConfig::DEFAULT_SNEAK_BONUS_XP,
        }
    }
}

impl From<ConfigFile> for SkillsConfig {
    fn from(file: ConfigFile) -> Self {
        SkillsConfig {
            skill_recovery_bonus_pct: file.general.skill_recovery_bonus,
            catchup_bonus_pct: file.weapons.skill_catch_up_bonus,
            swim_skill_loss_disabled: !file.swimming.skill_loss,
            swim_gain_bonus_pct: file.swimming.experience_bonus,
            shield_attack_xp_factor_pct: file.blood_magic.shield_attack_xp_factor,
            remove_shield_expire_xp: file.blood_magic.remove_shield_expired_xp,
            sneak_bonus_damage_pct: file.sneak.bonus_damage,
            sneak_bonus_xp: file.sneak.bonus_experience,
        }
    }
}

impl From<&SkillsConfig> for ConfigFile {
    fn from(config: &SkillsConfig) -> Self {
        ConfigFile {
            general: GeneralSection {
                skill_recovery_bonus: config.skill_recovery_bonus_pct,
            },
            weapons: WeaponsSection {
                skill_catch_up_bonus: config.catchup_bonus_pct,
            },
            swimming: SwimmingSection {
                skill_loss: !config.swim_skill_loss_disabled,
                experience_bonus: config.swim_gain_bonus_pct,
            },
            blood_magic: BloodMagicSection {
                shield_attack_xp_factor: config.shield_attack_xp_factor_pct,
                remove_shield_expired_xp: config.remove_shield_expire_xp,
            },
            sneak: SneakSection {
                bonus_damage: config.sneak_bonus_damage_pct,
                bonus_experience: config.sneak_bonus_xp,
            },
        }
    }
}

/// Loader for skill engine configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Out-of-range values are clamped into their accepted ranges.
    pub fn load(path: &Path) -> LoadResult<SkillsConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path.display(), e))
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<SkillsConfig> {
        let file: ConfigFile = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(SkillsConfig::from(file).clamped())
    }

    /// Render a config as TOML text in the file layout.
    pub fn render(config: &SkillsConfig) -> LoadResult<String> {
        toml::to_string_pretty(&ConfigFile::from(config))
            .map_err(|e| anyhow::anyhow!("Failed to render config TOML: {}", e))
    }
}
