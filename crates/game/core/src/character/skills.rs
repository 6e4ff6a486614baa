//! Skill ranks.
//!
//! Skills are stored by lower-cased name so hosts can define their own; the
//! ones the engine itself consults are listed in [`SkillTag`].

use std::collections::BTreeMap;

use crate::config::EngineConfig;

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum SkillTag {
    DualWield,
    Map,
    Enchant,
    Peep,
    Inspect,
    Portal,
    Scribe,
    Search,
    Track,
    Skulduggery,
    Brawling,
    Protection,
    Tame,
    Cast,
}

/// Skill name to rank (1 through [`EngineConfig::MAX_SKILL_LEVEL`]).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SkillRanks(BTreeMap<String, u8>);

impl SkillRanks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self, skill: &str) -> u8 {
        self.0.get(&skill.to_lowercase()).copied().unwrap_or(0)
    }

    /// Sets a rank; zero forgets the skill.
    pub fn set(&mut self, skill: &str, level: u8) {
        let key = skill.to_lowercase();
        if level == 0 {
            self.0.remove(&key);
        } else {
            self.0.insert(key, level.min(EngineConfig::MAX_SKILL_LEVEL));
        }
    }

    /// Raises a skill to `target`, or by one rank when no target is given.
    ///
    /// Never lowers a rank. Returns the resulting rank.
    pub fn train(&mut self, skill: &str, target: Option<u8>) -> u8 {
        let current = self.level(skill);
        let next = match target {
            Some(target) => current.max(target.min(EngineConfig::MAX_SKILL_LEVEL)),
            None if current < EngineConfig::MAX_SKILL_LEVEL => current + 1,
            None => current,
        };
        if next != current {
            self.set(skill, next);
        }
        next
    }

    /// Points needed to train past `current_level`.
    pub const fn level_cost(current_level: u8) -> u8 {
        current_level
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.0.iter().map(|(name, level)| (name.as_str(), *level))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_use_kebab_case_names() {
        assert_eq!(SkillTag::DualWield.as_ref(), "dual-wield");
        assert_eq!("Dual-Wield".parse::<SkillTag>(), Ok(SkillTag::DualWield));
    }

    #[test]
    fn training_caps_at_max_rank() {
        let mut ranks = SkillRanks::new();
        for _ in 0..6 {
            ranks.train("Map", None);
        }
        assert_eq!(ranks.level("map"), EngineConfig::MAX_SKILL_LEVEL);
    }

    #[test]
    fn training_to_target_never_lowers() {
        let mut ranks = SkillRanks::new();
        assert_eq!(ranks.train("tame", Some(3)), 3);
        assert_eq!(ranks.train("tame", Some(1)), 3);
        assert_eq!(ranks.train("tame", Some(9)), 4);
    }

    #[test]
    fn zero_rank_forgets() {
        let mut ranks = SkillRanks::new();
        ranks.set("search", 2);
        ranks.set("SEARCH", 0);
        assert!(ranks.is_empty());
    }
}
