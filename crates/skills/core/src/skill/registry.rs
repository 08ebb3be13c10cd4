//! Static registry of correlated skill sets.

use std::collections::BTreeSet;

use super::SkillType;

/// Weapon and combat skills whose gains are relayed to a shield caster.
const ATTACK_SKILLS: [SkillType; 12] = [
    SkillType::AXES,
    SkillType::BLOCKING,
    SkillType::BOWS,
    SkillType::CLUBS,
    SkillType::CROSSBOWS,
    SkillType::KNIVES,
    SkillType::PICKAXES,
    SkillType::POLEARMS,
    SkillType::SPEARS,
    SkillType::SWORDS,
    SkillType::UNARMED,
    SkillType::ELEMENTAL_MAGIC,
];

/// Dual-wield skills added by other content packs, identified by name hash.
pub const DUAL_WIELD_SKILLS: [&str; 5] = [
    "Dual Swords",
    "Dual Axes",
    "Dual Clubs",
    "Dual Knives",
    "Dual Offhand",
];

/// Fixed skill sets consulted by the engine.
///
/// Built once at startup and never mutated. Both sets are ordered so callers
/// can enumerate membership deterministically.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillRegistry {
    attack_skills: BTreeSet<SkillType>,
    catch_up_skills: BTreeSet<SkillType>,
}

impl SkillRegistry {
    /// Registry with the standard attack and catch-up sets.
    ///
    /// The catch-up set is every attack skill, blood magic, and the hashed
    /// dual-wield skills.
    pub fn standard() -> Self {
        let attack_skills: BTreeSet<SkillType> = ATTACK_SKILLS.into_iter().collect();

        let mut catch_up_skills = attack_skills.clone();
        catch_up_skills.insert(SkillType::BLOOD_MAGIC);
        catch_up_skills.extend(DUAL_WIELD_SKILLS.iter().map(|name| SkillType::from_name(name)));

        Self {
            attack_skills,
            catch_up_skills,
        }
    }

    /// Returns true if gains in `skill` are relayed to a shield caster.
    pub fn is_attack_skill(&self, skill: SkillType) -> bool {
        self.attack_skills.contains(&skill)
    }

    /// Returns true if `skill` takes part in the catch-up comparison.
    pub fn is_catch_up_skill(&self, skill: SkillType) -> bool {
        self.catch_up_skills.contains(&skill)
    }

    pub fn attack_skills(&self) -> impl Iterator<Item = SkillType> + '_ {
        self.attack_skills.iter().copied()
    }

    pub fn catch_up_skills(&self) -> impl Iterator<Item = SkillType> + '_ {
        self.catch_up_skills.iter().copied()
    }
}

impl Default for SkillRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catch_up_set_extends_attack_set() {
        let registry = SkillRegistry::standard();

        assert_eq!(registry.attack_skills().count(), 12);
        assert_eq!(registry.catch_up_skills().count(), 18);
        assert!(registry.attack_skills().all(|s| registry.is_catch_up_skill(s)));
    }

    #[test]
    fn blood_magic_is_catch_up_only() {
        let registry = SkillRegistry::standard();

        assert!(registry.is_catch_up_skill(SkillType::BLOOD_MAGIC));
        assert!(!registry.is_attack_skill(SkillType::BLOOD_MAGIC));
    }

    #[test]
    fn dual_wield_skills_are_registered_by_hash() {
        let registry = SkillRegistry::standard();

        assert!(registry.is_catch_up_skill(SkillType(1_135_970_256)));
        assert!(registry.is_catch_up_skill(SkillType(226_781_678)));
        assert!(!registry.is_attack_skill(SkillType::from_name("Dual Clubs")));
    }

    #[test]
    fn utility_skills_are_excluded() {
        let registry = SkillRegistry::standard();

        for skill in [SkillType::SWIM, SkillType::SNEAK, SkillType::RUN, SkillType::WOOD_CUTTING] {
            assert!(!registry.is_attack_skill(skill));
            assert!(!registry.is_catch_up_skill(skill));
        }
    }

    #[test]
    fn enumeration_is_sorted() {
        let registry = SkillRegistry::standard();
        let ids: Vec<i32> = registry.attack_skills().map(SkillType::id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }
}
