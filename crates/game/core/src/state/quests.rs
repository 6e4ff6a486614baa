//! Quest tokens and per-character quest progress.
//!
//! A token names a quest and one of its steps: `12-start`, `12-found_key`,
//! `12-end`. A bare quest id means its `start` step. Ordering between steps
//! comes from the catalog's declared step list; a character can only ever
//! move forward through it.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::env::{QuestId, QuestOracle};

/// Step every quest begins with.
pub const START_STEP: &str = "start";
/// Terminal step marking a completed quest.
pub const END_STEP: &str = "end";

/// A quest id paired with a step name.
///
/// An empty step means "no progress yet" and only appears when describing a
/// character's current position in a quest it has never started.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QuestToken {
    pub quest_id: QuestId,
    pub step: String,
}

impl QuestToken {
    pub const SEPARATOR: char = '-';
    const ALT_SEPARATOR: char = ':';

    pub fn new(quest_id: QuestId, step: impl Into<String>) -> Self {
        Self {
            quest_id,
            step: step.into(),
        }
    }

    /// Token for a quest the character has not started.
    pub fn unstarted(quest_id: QuestId) -> Self {
        Self::new(quest_id, String::new())
    }

    pub fn is_unstarted(&self) -> bool {
        self.step.is_empty()
    }
}

impl fmt::Display for QuestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.quest_id.0, Self::SEPARATOR, self.step)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid quest token '{0}'")]
pub struct ParseQuestTokenError(pub String);

impl FromStr for QuestToken {
    type Err = ParseQuestTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, step) = match s.split_once([Self::SEPARATOR, Self::ALT_SEPARATOR]) {
            Some((id, step)) => (id, step),
            None => (s, START_STEP),
        };
        let quest_id = id
            .trim()
            .parse::<u32>()
            .map_err(|_| ParseQuestTokenError(s.to_string()))?;
        Ok(Self::new(QuestId(quest_id), step.trim()))
    }
}

/// True when `next` is a legal forward move from `current`.
///
/// From an unstarted quest only `start` is reachable (or `end` for quests
/// that consist of that single step). Otherwise both steps must belong to the
/// same known quest, differ, and `next` must come later in the step list.
pub fn is_token_after(current: &QuestToken, next: &QuestToken, quests: &dyn QuestOracle) -> bool {
    if current.is_unstarted() {
        if next.step == START_STEP {
            return true;
        }
        if next.step == END_STEP {
            return quests
                .quest(next.quest_id)
                .is_some_and(|quest| quest.is_single_step() && quest.position(END_STEP).is_some());
        }
        return false;
    }

    if current.quest_id != next.quest_id || current.step == next.step {
        return false;
    }

    let Some(quest) = quests.quest(current.quest_id) else {
        return false;
    };

    match (quest.position(&current.step), quest.position(&next.step)) {
        (Some(from), Some(to)) => to > from,
        _ => false,
    }
}

/// Quest id → current step for one character.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct QuestProgress(BTreeMap<QuestId, String>);

impl QuestProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position in `quest_id`, unstarted when absent.
    pub fn current(&self, quest_id: QuestId) -> QuestToken {
        match self.0.get(&quest_id) {
            Some(step) => QuestToken::new(quest_id, step.clone()),
            None => QuestToken::unstarted(quest_id),
        }
    }

    /// True when the character is on the token's step or already past it.
    pub fn has(&self, token: &QuestToken, quests: &dyn QuestOracle) -> bool {
        let Some(step) = self.0.get(&token.quest_id) else {
            return false;
        };
        if *step == token.step {
            return true;
        }
        is_token_after(token, &QuestToken::new(token.quest_id, step.clone()), quests)
    }

    /// Records the token if it moves the quest forward. Never regresses.
    pub fn give(&mut self, token: &QuestToken, quests: &dyn QuestOracle) -> bool {
        if token.is_unstarted() {
            return false;
        }
        if is_token_after(&self.current(token.quest_id), token, quests) {
            self.0.insert(token.quest_id, token.step.clone());
            return true;
        }
        false
    }

    pub fn is_done(&self, quest_id: QuestId) -> bool {
        self.0.get(&quest_id).is_some_and(|step| step == END_STEP)
    }

    pub fn clear(&mut self, quest_id: QuestId) {
        self.0.remove(&quest_id);
    }

    /// Independent copy of the progress map.
    pub fn snapshot(&self) -> BTreeMap<QuestId, String> {
        self.0.clone()
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
    use crate::env::{CatalogSnapshot, QuestDefinition};

    fn catalog() -> CatalogSnapshot {
        let mut catalog = CatalogSnapshot::new();
        catalog
            .insert_quest(QuestDefinition::new(
                QuestId(1),
                "Lost Cat",
                ["start", "found", "returned", "end"],
            ))
            .unwrap();
        catalog
            .insert_quest(QuestDefinition::new(QuestId(2), "Bell", ["end"]))
            .unwrap();
        catalog
    }

    fn token(s: &str) -> QuestToken {
        s.parse().unwrap()
    }

    #[test]
    fn parses_both_separators_and_default_step() {
        assert_eq!(token("1-found"), QuestToken::new(QuestId(1), "found"));
        assert_eq!(token("1:found"), QuestToken::new(QuestId(1), "found"));
        assert_eq!(token("7"), QuestToken::new(QuestId(7), START_STEP));
        assert!(token("7-").is_unstarted());
        assert!("abc-start".parse::<QuestToken>().is_err());
        assert_eq!(token("1:found").to_string(), "1-found");
    }

    #[test]
    fn unstarted_quest_only_accepts_start() {
        let catalog = catalog();
        let none = QuestToken::unstarted(QuestId(1));
        assert!(is_token_after(&none, &token("1-start"), &catalog));
        assert!(!is_token_after(&none, &token("1-found"), &catalog));
        assert!(!is_token_after(&none, &token("1-end"), &catalog));
        // single-step quests may jump straight to the end
        assert!(is_token_after(&QuestToken::unstarted(QuestId(2)), &token("2-end"), &catalog));
    }

    #[test]
    fn ordering_follows_declared_steps() {
        let catalog = catalog();
        assert!(is_token_after(&token("1-start"), &token("1-returned"), &catalog));
        assert!(!is_token_after(&token("1-returned"), &token("1-found"), &catalog));
        assert!(!is_token_after(&token("1-found"), &token("1-found"), &catalog));
        assert!(!is_token_after(&token("1-found"), &token("2-end"), &catalog));
        assert!(!is_token_after(&token("9-start"), &token("9-end"), &catalog));
        assert!(!is_token_after(&token("1-start"), &token("1-bogus"), &catalog));
    }

    #[test]
    fn give_never_regresses() {
        let catalog = catalog();
        let mut progress = QuestProgress::new();

        assert!(!progress.give(&token("1-found"), &catalog));
        assert!(progress.give(&token("1-start"), &catalog));
        assert!(progress.give(&token("1-returned"), &catalog));
        assert!(!progress.give(&token("1-found"), &catalog));
        assert_eq!(progress.current(QuestId(1)), token("1-returned"));

        assert!(progress.has(&token("1-found"), &catalog));
        assert!(progress.has(&token("1-returned"), &catalog));
        assert!(!progress.has(&token("1-end"), &catalog));
        assert!(!progress.is_done(QuestId(1)));

        assert!(progress.give(&token("1-end"), &catalog));
        assert!(progress.is_done(QuestId(1)));

        progress.clear(QuestId(1));
        assert!(progress.is_empty());
        assert!(!progress.has(&token("1-start"), &catalog));
    }
}
