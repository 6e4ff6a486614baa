//! Named stat modifiers carried by items, buffs and races.
//!
//! Modifier names are free-form lowercase keys: attribute names
//! (`strength`, `vitality`, ...) plus pool and rate keys such as
//! `healthmax`, `manamax`, `xpscale`, `healthrecovery`.

use std::collections::BTreeMap;

/// Well-known modifier keys that are not attribute names.
pub mod keys {
    pub const HEALTH_MAX: &str = "healthmax";
    pub const MANA_MAX: &str = "manamax";
    pub const XP_SCALE: &str = "xpscale";
    pub const HEALTH_RECOVERY: &str = "healthrecovery";
    pub const MANA_RECOVERY: &str = "manarecovery";
}

/// Mapping from modifier name to signed amount.
///
/// Names are lower-cased on the way in, including when deserialized.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "BTreeMap<String, i32>", into = "BTreeMap<String, i32>")
)]
pub struct StatMods(BTreeMap<String, i32>);

impl StatMods {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the amount for `name`, or 0 when absent.
    pub fn get(&self, name: &str) -> i32 {
        self.0.get(name).copied().unwrap_or(0)
    }

    pub fn insert(&mut self, name: impl AsRef<str>, amount: i32) {
        self.0.insert(name.as_ref().to_lowercase(), amount);
    }

    pub fn with(mut self, name: impl AsRef<str>, amount: i32) -> Self {
        self.insert(name, amount);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.0.iter().map(|(name, amount)| (name.as_str(), *amount))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<(S, i32)> for StatMods {
    fn from_iter<T: IntoIterator<Item = (S, i32)>>(iter: T) -> Self {
        let mut mods = Self::new();
        for (name, amount) in iter {
            mods.insert(name, amount);
        }
        mods
    }
}

impl From<BTreeMap<String, i32>> for StatMods {
    fn from(map: BTreeMap<String, i32>) -> Self {
        map.into_iter().collect()
    }
}

impl From<StatMods> for BTreeMap<String, i32> {
    fn from(mods: StatMods) -> Self {
        mods.0
    }
}
