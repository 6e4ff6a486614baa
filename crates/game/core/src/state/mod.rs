//! Mutable sub-state owned by a character.
//!
//! Each module here is a self-contained value type with its own invariants.
//! The [`crate::character::Character`] aggregate composes them and runs the
//! validation pipeline after mutations that cross module boundaries.
mod aggro;
mod buffs;
mod charm;
mod common;
mod cooldowns;
mod equipment;
mod item;
mod kd;
mod keyring;
mod memory;
mod misc;
mod quests;

pub use aggro::{Aggro, AggroKind, AggroTarget, SpellAggroInfo};
pub use buffs::{Buff, Buffs, TRIGGERS_UNLIMITED};
pub use charm::CharmInfo;
pub use common::{MobId, MobInstanceId, RoomId, UserId};
pub use cooldowns::Cooldowns;
pub use equipment::{Equipment, Slot, SlotSet, SlotState};
pub use item::{Item, ItemUid};
pub use kd::KdStats;
pub use keyring::{KeyRing, LockKnowledge, key_marker, lock_sequence};
pub use memory::RoomMemory;
pub use misc::{MiscData, MiscValue, MobMasteries};
pub use quests::{
    END_STEP, ParseQuestTokenError, QuestProgress, QuestToken, START_STEP, is_token_after,
};
