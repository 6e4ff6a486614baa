//! Lock combinations and physical keys a character knows about.
//!
//! Entries are keyed by lowercase lock id. A combination lock stores the
//! uppercase `U`/`D` sequence the character has learned; a keyed lock stores
//! a marker under `key-<lockid>` recording which key item opens it.

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};

const MIN_LOCK_DIFFICULTY: usize = 2;
const MAX_LOCK_DIFFICULTY: usize = 32;

/// Combination for `lock_id`: one `U` or `D` per difficulty step.
///
/// Deterministic for a given world seed. Difficulty is clamped to 2..=32.
pub fn lock_sequence(lock_id: &str, difficulty: usize, seed: &str) -> String {
    let digest = Sha256::digest(format!("{lock_id}{seed}").to_lowercase().as_bytes());
    let difficulty = difficulty.clamp(MIN_LOCK_DIFFICULTY, MAX_LOCK_DIFFICULTY);
    digest
        .iter()
        .take(difficulty)
        .map(|byte| if byte % 2 == 0 { 'U' } else { 'D' })
        .collect()
}

/// Key ring entry name recording a physical key for `lock_id`.
pub fn key_marker(lock_id: &str) -> String {
    format!("key-{lock_id}")
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct KeyRing(BTreeMap<String, String>);

/// What a character knows about one lock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LockKnowledge {
    /// A physical key for the lock has been recorded.
    pub has_key: bool,
    /// The learned combination matches the lock's current one.
    pub has_sequence: bool,
}

impl KeyRing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, lock_id: &str) -> Option<&str> {
        self.0.get(&lock_id.to_lowercase()).map(String::as_str)
    }

    /// Stores `sequence` for `lock_id`; an empty sequence forgets the lock.
    pub fn set(&mut self, lock_id: &str, sequence: &str) {
        let lock_id = lock_id.to_lowercase();
        if sequence.is_empty() {
            self.0.remove(&lock_id);
        } else {
            self.0.insert(lock_id, sequence.to_uppercase());
        }
    }

    pub fn knowledge(&self, lock_id: &str, difficulty: usize, seed: &str) -> LockKnowledge {
        let sequence = lock_sequence(lock_id, difficulty, seed);
        LockKnowledge {
            has_key: self.get(&key_marker(lock_id)).is_some(),
            has_sequence: self.get(lock_id) == Some(sequence.as_str()),
        }
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
    fn lock_sequences_are_deterministic_and_clamped() {
        let a = lock_sequence("778-north", 5, "seed");
        assert_eq!(a, lock_sequence("778-NORTH", 5, "seed"));
        assert_eq!(a.len(), 5);
        assert!(a.chars().all(|c| c == 'U' || c == 'D'));
        assert_eq!(lock_sequence("x", 0, "").len(), 2);
        assert_eq!(lock_sequence("x", 99, "").len(), 32);
    }

    #[test]
    fn set_normalizes_case_and_empty_deletes() {
        let mut ring = KeyRing::new();
        ring.set("Chest-1", "udu");
        assert_eq!(ring.get("chest-1"), Some("UDU"));
        ring.set("CHEST-1", "");
        assert!(ring.is_empty());
    }

    #[test]
    fn knowledge_reports_key_and_sequence() {
        let mut ring = KeyRing::new();
        let sequence = lock_sequence("door", 4, "world");
        ring.set("door", &sequence);
        assert_eq!(
            ring.knowledge("door", 4, "world"),
            LockKnowledge { has_key: false, has_sequence: true }
        );

        ring.set(&key_marker("door"), "20001");
        assert!(ring.knowledge("door", 4, "other-world").has_key);
        assert!(!ring.knowledge("door", 4, "other-world").has_sequence);
    }
}
