//! The character aggregate.
//!
//! A [`Character`] owns every piece of mutable actor state: identity,
//! resources, attributes, equipment, buffs, combat intent and progress.
//! Operations that read catalog data take an [`Env`]; operations that can
//! break an invariant finish by running [`Character::validate`].
//!
//! The implementation is split by concern:
//! - [`validate`]: the ordered recalculation pipeline
//! - [`equip`]: wearing and removing gear, worn-buff reconciliation
//! - [`combat`]: aggro, charm and resource changes
//! - [`progress`]: experience, training, quests and buffs
//! - [`inventory`]: the backpack
mod combat;
mod equip;
mod error;
mod inventory;
mod progress;
mod skills;
mod validate;

use std::collections::BTreeMap;

pub use equip::Displaced;
pub use error::{CharacterError, WearError};
pub use progress::LevelUp;
pub use skills::{SkillRanks, SkillTag};
pub use validate::{ValidateOptions, ValidationReport, ValidationStage};

use crate::config::EngineConfig;
use crate::env::{BuffFlags, BuffId, Env, RaceId};
use crate::intern::DescriptionCache;
use crate::state::{
    Aggro, Buffs, CharmInfo, Cooldowns, Equipment, Item, KdStats, KeyRing, LockKnowledge,
    MiscData, MiscValue, MobInstanceId, MobMasteries, QuestProgress, RoomId, RoomMemory, UserId,
};
use crate::stats::{Alignment, Attribute, StatInfo, Statistics};

/// Mutable state of one player or mob.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Character {
    pub name: String,
    /// Plain text, or a reference into a [`DescriptionCache`].
    pub description: String,
    pub race_id: RaceId,
    pub room_id: RoomId,
    pub zone: String,
    pub level: i32,
    pub experience: i64,
    pub training_points: i32,
    pub stat_points: i32,
    pub health: i32,
    pub mana: i32,
    pub action_points: i32,
    pub gold: i32,
    pub bank: i32,
    pub extra_lives: i32,

    stats: Statistics,
    alignment: Alignment,
    adjectives: Vec<String>,
    /// Spell id to cast count. Negative counts mark disabled spells.
    spell_book: BTreeMap<String, i32>,
    charmed_mobs: Vec<MobInstanceId>,
    items: Vec<Item>,
    equipment: Equipment,
    buffs: Buffs,
    skills: SkillRanks,
    cooldowns: Cooldowns,
    settings: BTreeMap<String, String>,
    quest_progress: QuestProgress,
    key_ring: KeyRing,
    kd: KdStats,
    misc: MiscData,
    masteries: MobMasteries,
    /// Buffs granted at spawn that no gear change may remove.
    perma_buff_ids: Vec<BuffId>,

    // ===== derived or transient =====
    #[cfg_attr(feature = "serde", serde(skip))]
    health_max: StatInfo,
    #[cfg_attr(feature = "serde", serde(skip))]
    mana_max: StatInfo,
    #[cfg_attr(feature = "serde", serde(skip))]
    action_points_max: StatInfo,
    #[cfg_attr(feature = "serde", serde(skip))]
    tnl_scale: f64,
    #[cfg_attr(feature = "serde", serde(skip))]
    aggro: Option<Aggro>,
    #[cfg_attr(feature = "serde", serde(skip))]
    charm: Option<CharmInfo>,
    #[cfg_attr(feature = "serde", serde(skip))]
    followers: Vec<UserId>,
    #[cfg_attr(feature = "serde", serde(skip))]
    room_memory: RoomMemory,
}

impl Default for Character {
    fn default() -> Self {
        Self::new()
    }
}

impl Character {
    /// Fresh level 1 character with starting resources.
    ///
    /// Name, description and zone are filled in by the first
    /// [`validate`](Character::validate).
    pub fn new() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            race_id: RaceId::default(),
            room_id: RoomId::START,
            zone: String::new(),
            level: 1,
            experience: 1,
            training_points: 0,
            stat_points: 0,
            health: EngineConfig::DEFAULT_STARTING_HEALTH,
            mana: EngineConfig::DEFAULT_STARTING_MANA,
            action_points: 0,
            gold: EngineConfig::DEFAULT_STARTING_GOLD,
            bank: EngineConfig::DEFAULT_STARTING_BANK,
            extra_lives: 0,
            stats: Statistics::default(),
            alignment: Alignment::NEUTRAL,
            adjectives: Vec::new(),
            spell_book: BTreeMap::new(),
            charmed_mobs: Vec::new(),
            items: Vec::new(),
            equipment: Equipment::empty(),
            buffs: Buffs::new(),
            skills: SkillRanks::new(),
            cooldowns: Cooldowns::new(),
            settings: BTreeMap::new(),
            quest_progress: QuestProgress::new(),
            key_ring: KeyRing::new(),
            kd: KdStats::default(),
            misc: MiscData::new(),
            masteries: MobMasteries::default(),
            perma_buff_ids: Vec::new(),
            health_max: StatInfo::with_base(1),
            mana_max: StatInfo::with_base(1),
            action_points_max: StatInfo::default(),
            tnl_scale: 1.0,
            aggro: None,
            charm: None,
            followers: Vec::new(),
            room_memory: RoomMemory::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_race(mut self, race_id: RaceId) -> Self {
        self.race_id = race_id;
        self
    }

    // ========================================================================
    // Derived values
    // ========================================================================

    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    /// Current value of an attribute.
    pub fn stat(&self, attribute: Attribute) -> i32 {
        self.stats.value(attribute)
    }

    /// Points a player spent training an attribute.
    pub fn stat_training(&self, attribute: Attribute) -> i32 {
        self.stats.get(attribute).training
    }

    pub fn health_max(&self) -> &StatInfo {
        &self.health_max
    }

    pub fn mana_max(&self) -> &StatInfo {
        &self.mana_max
    }

    pub fn action_points_max(&self) -> &StatInfo {
        &self.action_points_max
    }

    /// Race multiplier on experience thresholds, as of the last validate.
    pub fn tnl_scale(&self) -> f64 {
        self.tnl_scale
    }

    /// Sum of the named modifier across worn items and active buffs.
    pub fn stat_mod(&self, name: &str, env: &Env<'_>) -> i32 {
        self.equipment.stat_mod(name, env.items()) + self.buffs.stat_mod(name, env.buffs())
    }

    // ========================================================================
    // Identity and description
    // ========================================================================

    /// Moves the description into `cache`, keeping a reference.
    pub fn cache_description(&mut self, cache: &DescriptionCache) {
        self.description = cache.intern(&self.description);
    }

    pub fn description(&self, cache: &DescriptionCache) -> String {
        cache.resolve(&self.description).to_string()
    }

    /// Adjectives, dynamic ones first: `downed`, `lit`, `hidden` and
    /// `poisoned` come from the current health and buffs.
    pub fn adjectives(&self, env: &Env<'_>) -> Vec<String> {
        let buffs = env.buffs();
        let dynamic = [
            (self.health < 1, "downed"),
            (self.buffs.has_flag(BuffFlags::EMITS_LIGHT, buffs), "lit"),
            (self.buffs.has_flag(BuffFlags::HIDDEN, buffs), "hidden"),
            (self.buffs.has_flag(BuffFlags::POISON, buffs), "poisoned"),
        ];
        dynamic
            .into_iter()
            .filter(|(active, _)| *active)
            .map(|(_, adjective)| adjective.to_string())
            .chain(self.adjectives.iter().cloned())
            .collect()
    }

    /// Adds or removes a stored adjective. Adding is idempotent.
    pub fn set_adjective(&mut self, adjective: &str, present: bool) {
        let position = self.adjectives.iter().position(|a| a == adjective);
        match (position, present) {
            (None, true) => self.adjectives.push(adjective.to_string()),
            (Some(index), false) => {
                self.adjectives.remove(index);
            }
            _ => {}
        }
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn update_alignment(&mut self, amount: i32) {
        self.alignment = self.alignment.adjusted(amount);
    }

    /// Alignment band name, e.g. `neutral`.
    pub fn alignment_name(&self) -> &'static str {
        self.alignment.tier().into()
    }

    // ========================================================================
    // Settings and misc data
    // ========================================================================

    pub fn setting(&self, name: &str) -> Option<&str> {
        self.settings.get(name).map(String::as_str)
    }

    /// Stores a setting; an empty value removes it.
    pub fn set_setting(&mut self, name: &str, value: &str) {
        if value.is_empty() {
            self.settings.remove(name);
        } else {
            self.settings.insert(name.to_string(), value.to_string());
        }
    }

    pub fn misc_data(&self, key: &str) -> Option<&MiscValue> {
        self.misc.get(key)
    }

    /// Stores a value; `None` removes the key.
    pub fn set_misc_data(&mut self, key: &str, value: Option<MiscValue>) {
        self.misc.set(key, value);
    }

    /// Keys starting with any of `prefixes`, prefix stripped.
    pub fn misc_data_keys(&self, prefixes: &[&str]) -> Vec<String> {
        self.misc.keys(prefixes)
    }

    pub fn masteries(&self) -> &MobMasteries {
        &self.masteries
    }

    pub fn masteries_mut(&mut self) -> &mut MobMasteries {
        &mut self.masteries
    }

    pub fn kd(&self) -> &KdStats {
        &self.kd
    }

    pub fn kd_mut(&mut self) -> &mut KdStats {
        &mut self.kd
    }

    // ========================================================================
    // Spell book
    // ========================================================================

    pub fn spells(&self) -> &BTreeMap<String, i32> {
        &self.spell_book
    }

    /// Returns false when the spell was already known.
    pub fn learn_spell(&mut self, spell_id: &str) -> bool {
        if self.spell_book.contains_key(spell_id) {
            return false;
        }
        self.spell_book.insert(spell_id.to_string(), 1);
        true
    }

    /// Known and not disabled.
    pub fn has_spell(&self, spell_id: &str) -> bool {
        self.spell_book.get(spell_id).is_some_and(|casts| *casts > 0)
    }

    pub fn disable_spell(&mut self, spell_id: &str) -> bool {
        match self.spell_book.get_mut(spell_id) {
            Some(casts) if *casts > 0 => {
                *casts = -*casts;
                true
            }
            _ => false,
        }
    }

    pub fn enable_spell(&mut self, spell_id: &str) -> bool {
        match self.spell_book.get_mut(spell_id) {
            Some(casts) if *casts < 0 => {
                *casts = -*casts;
                true
            }
            _ => false,
        }
    }

    /// Counts a successful cast of an enabled spell.
    pub fn track_spell_cast(&mut self, spell_id: &str) -> bool {
        match self.spell_book.get_mut(spell_id) {
            Some(casts) if *casts > 0 => {
                *casts += 1;
                true
            }
            _ => false,
        }
    }

    // ========================================================================
    // Keys
    // ========================================================================

    pub fn key(&self, lock_id: &str) -> Option<&str> {
        self.key_ring.get(lock_id)
    }

    /// Records a lock sequence; an empty sequence forgets it.
    pub fn set_key(&mut self, lock_id: &str, sequence: &str) {
        self.key_ring.set(lock_id, sequence);
    }

    pub fn key_count(&self) -> usize {
        self.key_ring.len()
    }

    /// Whether the character holds a key for the lock or knows its sequence.
    pub fn has_key(&self, lock_id: &str, difficulty: usize, env: &Env<'_>) -> LockKnowledge {
        self.key_ring.knowledge(lock_id, difficulty, &env.config().seed)
    }

    // ========================================================================
    // Skills
    // ========================================================================

    pub fn skills(&self) -> &SkillRanks {
        &self.skills
    }

    pub fn skill_level(&self, skill: impl AsRef<str>) -> u8 {
        self.skills.level(skill.as_ref())
    }

    pub fn set_skill(&mut self, skill: impl AsRef<str>, level: u8) {
        self.skills.set(skill.as_ref(), level);
    }

    /// Raises a skill by one rank, or to `target`. Returns the new rank.
    pub fn train_skill(&mut self, skill: impl AsRef<str>, target: Option<u8>) -> u8 {
        self.skills.train(skill.as_ref(), target)
    }

    pub fn skill_level_cost(&self, current_level: u8) -> u8 {
        SkillRanks::level_cost(current_level)
    }

    pub fn can_dual_wield(&self) -> bool {
        self.skill_level(SkillTag::DualWield) > 0
    }

    pub fn max_charmed_creatures(&self) -> usize {
        usize::from(self.skill_level(SkillTag::Tame)) + 1
    }

    // ========================================================================
    // Room memory and followers
    // ========================================================================

    /// Rooms remembered for mapping: `map rank * smarts + 5`.
    pub fn memory_capacity(&self) -> usize {
        let rank = i32::from(self.skill_level(SkillTag::Map));
        let capacity = rank * self.stat(Attribute::Smarts) + EngineConfig::ROOM_MEMORY_BASE as i32;
        usize::try_from(capacity).unwrap_or(0).max(1)
    }

    /// How far the map view spreads: `map rank + smarts / 4`.
    pub fn map_sprawl_capacity(&self) -> i32 {
        i32::from(self.skill_level(SkillTag::Map)) + (self.stat(Attribute::Smarts) >> 2)
    }

    pub fn remember_room(&mut self, room: RoomId) {
        let capacity = self.memory_capacity();
        self.room_memory.remember(room, capacity);
    }

    /// Most recent rooms, oldest first.
    pub fn room_memory(&self) -> Vec<RoomId> {
        self.room_memory.recall(self.memory_capacity())
    }

    pub fn set_room_memory(&mut self, rooms: impl IntoIterator<Item = RoomId>) {
        self.room_memory.replace(rooms);
    }

    pub fn add_follower(&mut self, user: UserId) {
        if !self.followers.contains(&user) {
            self.followers.push(user);
        }
    }

    pub fn followers(&self) -> &[UserId] {
        &self.followers
    }
}
