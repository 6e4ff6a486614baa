//! Catalog construction errors.

use crate::env::{BuffId, ItemId, QuestId, RaceId};
use crate::error::{ErrorSeverity, GameError};

/// Errors raised while assembling a catalog snapshot.
///
/// A malformed catalog means the world data itself is broken, so every
/// variant is fatal for the host that tried to load it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("item {0} is defined more than once")]
    DuplicateItem(ItemId),

    #[error("race {0} is defined more than once")]
    DuplicateRace(RaceId),

    #[error("{0} is defined more than once")]
    DuplicateBuff(BuffId),

    #[error("quest {0} is defined more than once")]
    DuplicateQuest(QuestId),

    /// Quest has no steps or repeats a step name.
    #[error("quest {id} is invalid: {reason}")]
    InvalidQuest { id: QuestId, reason: &'static str },
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            DuplicateItem(_) => "ORACLE_DUPLICATE_ITEM",
            DuplicateRace(_) => "ORACLE_DUPLICATE_RACE",
            DuplicateBuff(_) => "ORACLE_DUPLICATE_BUFF",
            DuplicateQuest(_) => "ORACLE_DUPLICATE_QUEST",
            InvalidQuest { .. } => "ORACLE_INVALID_QUEST",
        }
    }
}
