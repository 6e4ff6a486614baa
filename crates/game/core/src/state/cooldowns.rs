//! Named per-character cooldown timers counted in rounds.

use std::collections::BTreeMap;

/// Tag → rounds remaining. A missing tag is ready.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Cooldowns(BTreeMap<String, i32>);

impl Cooldowns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts `tag` for `rounds` rounds if it is not already running.
    ///
    /// Returns `false` while the tag is active. A non-positive duration always
    /// succeeds and records nothing.
    pub fn try_start(&mut self, tag: &str, rounds: i32) -> bool {
        if rounds < 1 {
            return true;
        }
        self.prune();
        if self.0.contains_key(tag) {
            return false;
        }
        self.0.insert(tag.to_string(), rounds);
        true
    }

    /// Rounds remaining on `tag`, 0 when ready.
    pub fn get(&self, tag: &str) -> i32 {
        self.0.get(tag).copied().filter(|rounds| *rounds > 0).unwrap_or(0)
    }

    pub fn is_active(&self, tag: &str) -> bool {
        self.get(tag) > 0
    }

    /// Advances every timer by one round.
    pub fn round_tick(&mut self) {
        for rounds in self.0.values_mut() {
            *rounds -= 1;
        }
    }

    /// Drops every expired timer.
    pub fn prune(&mut self) {
        self.0.retain(|_, rounds| *rounds > 0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.0.iter().map(|(tag, rounds)| (tag.as_str(), *rounds))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_start_fails_while_active() {
        let mut cooldowns = Cooldowns::new();
        assert!(cooldowns.try_start("bash", 5));
        assert!(!cooldowns.try_start("bash", 5));
        assert_eq!(cooldowns.get("bash"), 5);
        assert_eq!(cooldowns.iter().collect::<Vec<_>>(), vec![("bash", 5)]);
    }

    #[test]
    fn zero_duration_is_never_recorded() {
        let mut cooldowns = Cooldowns::new();
        assert!(cooldowns.try_start("kick", 0));
        assert!(cooldowns.try_start("kick", -3));
        assert!(cooldowns.is_empty());
    }

    #[test]
    fn expires_after_ticks_and_prune() {
        let mut cooldowns = Cooldowns::new();
        assert!(cooldowns.try_start("bash", 5));
        for _ in 0..5 {
            cooldowns.round_tick();
        }
        assert!(!cooldowns.is_active("bash"));
        cooldowns.prune();
        assert!(cooldowns.is_empty());
        assert!(cooldowns.try_start("bash", 5));
    }

    #[test]
    fn start_prunes_expired_entries() {
        let mut cooldowns = Cooldowns::new();
        cooldowns.try_start("a", 1);
        cooldowns.round_tick();
        assert_eq!(cooldowns.len(), 1);
        assert!(cooldowns.try_start("a", 2));
        assert_eq!(cooldowns.get("a"), 2);
    }
}
