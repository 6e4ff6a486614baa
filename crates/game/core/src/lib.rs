//! Character and combat state for a multi-user dungeon.
//!
//! `mud-core` owns the mutable state of every player and mob: attributes,
//! resources, equipment, buffs, combat intent, quests and cooldowns. It is a
//! pure synchronous library. Catalog data (items, races, buffs, quests) is
//! read through the oracle traits bundled in [`env::Env`]; the host loads it
//! and drives the round loop.
//!
//! Every mutation that can break a character invariant ends with
//! [`Character::validate`], which re-derives all computed values in a fixed
//! order.
pub mod character;
pub mod config;
pub mod env;
pub mod error;
pub mod intern;
pub mod state;
pub mod stats;

pub use character::{
    Character, CharacterError, Displaced, LevelUp, SkillRanks, SkillTag, ValidateOptions,
    ValidationReport, ValidationStage, WearError,
};
pub use config::EngineConfig;
pub use env::{
    BuffFlags, BuffId, BuffOracle, BuffSpec, CatalogSnapshot, DamageDice, Env, ItemId, ItemKind,
    ItemOracle, ItemSpec, ItemSubKind, OracleError, QuestDefinition, QuestId, QuestOracle,
    RaceDefinition, RaceId, RaceOracle, RaceSize,
};
pub use error::{ErrorSeverity, GameError};
pub use intern::DescriptionCache;
pub use state::{
    Aggro, AggroKind, AggroTarget, Buff, CharmInfo, Cooldowns, Equipment, Item, ItemUid,
    LockKnowledge, MiscValue, MobInstanceId, QuestToken, RoomId, Slot, SlotSet, SpellAggroInfo,
    UserId,
};
pub use stats::{Alignment, AlignmentTier, Attribute, BaseAttributes, StatDelta, StatInfo};
