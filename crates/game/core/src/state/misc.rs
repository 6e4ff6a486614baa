//! Free-form data attached to a character by scripts and commands, plus
//! per-creature masteries.

use std::collections::BTreeMap;

use crate::state::MobId;

/// A value stored in [`MiscData`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum MiscValue {
    Flag(bool),
    Int(i64),
    Text(String),
    List(Vec<String>),
}

impl MiscValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<bool> for MiscValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<i64> for MiscValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for MiscValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for MiscValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for MiscValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// Typed key/value store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MiscData(BTreeMap<String, MiscValue>);

impl MiscData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`; `None` removes the key.
    pub fn set(&mut self, key: &str, value: Option<MiscValue>) {
        match value {
            Some(value) => {
                self.0.insert(key.to_string(), value);
            }
            None => {
                self.0.remove(key);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&MiscValue> {
        self.0.get(key)
    }

    /// All keys, or, given prefixes, the remainder of every key starting with
    /// one of them.
    pub fn keys(&self, prefixes: &[&str]) -> Vec<String> {
        if prefixes.is_empty() {
            return self.0.keys().cloned().collect();
        }
        prefixes
            .iter()
            .flat_map(|prefix| {
                self.0
                    .keys()
                    .filter_map(move |key| key.strip_prefix(prefix).map(str::to_string))
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Skill proficiencies tied to specific creatures.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MobMasteries {
    /// Taming proficiency per mob template.
    pub tame: BTreeMap<MobId, i32>,
}

impl MobMasteries {
    pub fn taming(&self, mob: MobId) -> i32 {
        self.tame.get(&mob).copied().unwrap_or(0)
    }

    /// Sets taming proficiency; zero or below forgets the creature.
    pub fn set_taming(&mut self, mob: MobId, proficiency: i32) {
        if proficiency <= 0 {
            self.tame.remove(&mob);
        } else {
            self.tame.insert(mob, proficiency);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_none_removes() {
        let mut data = MiscData::new();
        data.set("tracking-mob", Some("rat".into()));
        assert_eq!(data.get("tracking-mob").and_then(MiscValue::as_text), Some("rat"));
        data.set("tracking-mob", None);
        assert!(data.is_empty());
    }

    #[test]
    fn keys_strip_matching_prefixes() {
        let mut data = MiscData::new();
        data.set("tracking-mob", Some("rat".into()));
        data.set("tracking-user", Some("bob".into()));
        data.set("visits", Some(3i64.into()));

        assert_eq!(data.keys(&[]).len(), 3);
        assert_eq!(data.keys(&["tracking-"]), vec!["mob".to_string(), "user".to_string()]);
    }

    #[test]
    fn taming_forgets_non_positive() {
        let mut mastery = MobMasteries::default();
        mastery.set_taming(MobId(3), 40);
        assert_eq!(mastery.taming(MobId(3)), 40);
        mastery.set_taming(MobId(3), 0);
        assert!(mastery.tame.is_empty());
    }
}
