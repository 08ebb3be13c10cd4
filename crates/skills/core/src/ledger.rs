//! Per-character high-water marks of skill levels.
//!
//! Peaks live in the character's [`CustomData`] under `"SmartSkills <id>"`,
//! formatted as culture-invariant decimal strings. A stored peak never
//! decreases: [`PeakLedger::record`] only writes when the new level is higher.
//! Values that fail to parse read as absent.

use crate::skill::SkillType;
use crate::state::CustomData;

const KEY_PREFIX: &str = "SmartSkills ";

/// Typed accessor for peak levels stored in a character profile.
pub struct PeakLedger;

impl PeakLedger {
    /// Store key for `skill`.
    pub fn key(skill: SkillType) -> String {
        format!("{KEY_PREFIX}{}", skill.id())
    }

    /// Highest recorded level of `skill`, if any.
    pub fn peak(data: &CustomData, skill: SkillType) -> Option<f32> {
        data.get(&Self::key(skill)).and_then(parse_level)
    }

    /// Records `level` as the peak of `skill` unless a higher or equal peak is
    /// already stored. Returns true if the store was written.
    pub fn record(data: &mut CustomData, skill: SkillType, level: f32) -> bool {
        match Self::peak(data, skill) {
            Some(stored) if stored >= level => false,
            _ => {
                data.set(Self::key(skill), level.to_string());
                true
            }
        }
    }

    /// All readable peaks in the store, ordered by key.
    pub fn entries(data: &CustomData) -> impl Iterator<Item = (SkillType, f32)> + '_ {
        data.iter().filter_map(|(key, value)| {
            let id = key.strip_prefix(KEY_PREFIX)?.parse::<i32>().ok()?;
            Some((SkillType(id), parse_level(value)?))
        })
    }
}

fn parse_level(value: &str) -> Option<f32> {
    value.trim().parse::<f32>().ok().filter(|level| level.is_finite())
}
