//! Errors returned by character operations.

use crate::env::BuffId;
use crate::error::{ErrorSeverity, GameError};
use crate::state::Slot;

/// Reasons an item could not be worn.
///
/// Display strings are player-facing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WearError {
    #[error("That item cannot be equipped.")]
    NotEquippable,

    #[error("That requires too many hands.")]
    TooManyHands,

    #[error("{}", slot_disabled_message(*.0))]
    SlotDisabled(Slot),

    /// The named equipped item cannot come off.
    #[error("Your {0} is cursed and prevents you from removing it.")]
    Cursed(String),

    #[error("Unrecognized object.")]
    Unrecognized,
}

fn slot_disabled_message(slot: Slot) -> &'static str {
    match slot {
        Slot::Weapon => "You can't use a weapon.",
        Slot::Offhand => "You can't hold things in an offhand.",
        Slot::Head => "You can't wear things on your head.",
        Slot::Neck => "You can't wear things on your neck.",
        Slot::Body => "You can't wear things on your body.",
        Slot::Belt => "You can't wear a belt.",
        Slot::Gloves => "You can't wear things as gloves.",
        Slot::Ring => "You can't wear rings.",
        Slot::Legs => "You can't wear things on your legs.",
        Slot::Feet => "You can't wear things on your feet.",
    }
}

impl GameError for WearError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            WearError::Cursed(_) => ErrorSeverity::Recoverable,
            WearError::NotEquippable
            | WearError::TooManyHands
            | WearError::SlotDisabled(_)
            | WearError::Unrecognized => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            WearError::NotEquippable => "WEAR_NOT_EQUIPPABLE",
            WearError::TooManyHands => "WEAR_TOO_MANY_HANDS",
            WearError::SlotDisabled(_) => "WEAR_SLOT_DISABLED",
            WearError::Cursed(_) => "WEAR_CURSED",
            WearError::Unrecognized => "WEAR_UNRECOGNIZED",
        }
    }
}

/// Failures of character bookkeeping operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CharacterError {
    /// The catalog has no buff with this id.
    #[error("failed to add buff. target: \"{name}\" buffId: {}", .buff_id.0)]
    BuffNotFound { name: String, buff_id: BuffId },

    #[error("no stat points left to spend")]
    NoStatPoints,
}

impl GameError for CharacterError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            CharacterError::BuffNotFound { .. } => ErrorSeverity::Internal,
            CharacterError::NoStatPoints => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            CharacterError::BuffNotFound { .. } => "CHARACTER_BUFF_NOT_FOUND",
            CharacterError::NoStatPoints => "CHARACTER_NO_STAT_POINTS",
        }
    }
}
