//! Experience, training, quests, cooldowns and buffs.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::env::{BuffFlags, BuffId, Env, QuestId};
use crate::state::{Buff, QuestToken};
use crate::stats::{
    Attribute, StatDelta, XP_SCALE_BASELINE, XpProgress, keys, scale_xp, xp_to_level,
};

use super::{Character, CharacterError, ValidateOptions};

/// Outcome of a successful [`Character::level_up`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelUp {
    /// The level just reached.
    pub level: i32,
    /// Attribute value changes caused by the new level.
    pub delta: StatDelta,
}

impl Character {
    // ========================================================================
    // Experience
    // ========================================================================

    /// Total experience needed to advance past `level`.
    pub fn xp_to_level(&self, level: i32, env: &Env<'_>) -> i64 {
        xp_to_level(level, self.tnl_scale, env.config().effective_xp_scale())
    }

    /// Experience still missing before the next level up, 0 when ready.
    pub fn xp_to_next_level(&self, env: &Env<'_>) -> i64 {
        (self.xp_to_level(self.level, env) - self.experience).max(0)
    }

    pub fn xp_progress(&self, env: &Env<'_>) -> XpProgress {
        XpProgress::at(
            self.level,
            self.experience,
            self.tnl_scale,
            env.config().effective_xp_scale(),
        )
    }

    /// Awards experience boosted by the `xpscale` modifier.
    ///
    /// Returns the amount actually added and the percentage applied.
    pub fn grant_xp(&mut self, xp: i64, env: &Env<'_>) -> (i64, i32) {
        if xp == 0 {
            return (0, XP_SCALE_BASELINE);
        }
        let scale = XP_SCALE_BASELINE + self.stat_mod(keys::XP_SCALE, env);
        let actual = scale_xp(xp, scale);
        self.experience = self.experience.saturating_add(actual);

        info!(
            character = %self.name,
            xp,
            actual,
            scale,
            total = self.experience,
            "experience granted"
        );
        (actual, scale)
    }

    /// Advances one level if enough experience has been earned.
    ///
    /// The new level grants a training point and a stat point, and restores
    /// health and mana.
    pub fn level_up(&mut self, env: &Env<'_>) -> Option<LevelUp> {
        if self.xp_to_level(self.level, env) > self.experience {
            return None;
        }

        let before = self.stats.clone();
        self.level += 1;
        self.training_points += 1;
        self.stat_points += 1;
        self.validate(env, ValidateOptions::default());

        self.health = self.health_max.value;
        self.mana = self.mana_max.value;

        let delta = self.stats.delta_since(&before);
        info!(
            character = %self.name,
            level = self.level,
            experience = self.experience,
            "level up"
        );
        Some(LevelUp {
            level: self.level,
            delta,
        })
    }

    /// Spends a stat point on `attribute`.
    pub fn train_stat(&mut self, attribute: Attribute, env: &Env<'_>) -> Result<(), CharacterError> {
        if self.stat_points < 1 {
            return Err(CharacterError::NoStatPoints);
        }
        self.stat_points -= 1;
        self.stats.get_mut(attribute).training += 1;
        self.validate(env, ValidateOptions::default());
        Ok(())
    }

    /// Spends every stat point, each on the least trained attribute.
    ///
    /// Ties go to the attribute listed first. Returns what was trained, in
    /// order.
    pub fn auto_train(&mut self, env: &Env<'_>) -> Vec<Attribute> {
        let mut trained = Vec::new();
        while self.stat_points > 0 {
            let Some(attribute) = Attribute::ALL
                .into_iter()
                .min_by_key(|attribute| self.stats.get(*attribute).training)
            else {
                break;
            };
            self.stat_points -= 1;
            self.stats.get_mut(attribute).training += 1;
            trained.push(attribute);
        }
        if !trained.is_empty() {
            self.validate(env, ValidateOptions::default());
            debug!(character = %self.name, count = trained.len(), "auto trained");
        }
        trained
    }

    // ========================================================================
    // Quests
    // ========================================================================

    /// True when the character has reached the token's step or gone past it.
    pub fn has_quest(&self, token: &QuestToken, env: &Env<'_>) -> bool {
        self.quest_progress.has(token, env.quests())
    }

    /// Moves a quest forward to the token's step. Never moves it back.
    pub fn give_quest_token(&mut self, token: &QuestToken, env: &Env<'_>) -> bool {
        let given = self.quest_progress.give(token, env.quests());
        if given {
            debug!(character = %self.name, %token, "quest progressed");
        }
        given
    }

    pub fn is_quest_done(&self, quest_id: QuestId) -> bool {
        self.quest_progress.is_done(quest_id)
    }

    pub fn clear_quest_token(&mut self, quest_id: QuestId) {
        self.quest_progress.clear(quest_id);
    }

    pub fn quest_token(&self, quest_id: QuestId) -> QuestToken {
        self.quest_progress.current(quest_id)
    }

    pub fn quest_progress(&self) -> BTreeMap<QuestId, String> {
        self.quest_progress.snapshot()
    }

    // ========================================================================
    // Cooldowns
    // ========================================================================

    pub fn try_cooldown(&mut self, tag: &str, rounds: i32) -> bool {
        self.cooldowns.try_start(tag, rounds)
    }

    pub fn cooldown(&self, tag: &str) -> i32 {
        self.cooldowns.get(tag)
    }

    pub fn cooldowns(&self) -> impl Iterator<Item = (&str, i32)> {
        self.cooldowns.iter()
    }

    pub fn prune_cooldowns(&mut self) {
        self.cooldowns.prune();
    }

    // ========================================================================
    // Buffs
    // ========================================================================

    /// Applies a catalog buff. Permanent buffs never run out.
    pub fn add_buff(
        &mut self,
        buff_id: BuffId,
        permanent: bool,
        env: &Env<'_>,
    ) -> Result<(), CharacterError> {
        let Some(spec) = env.buffs().buff(buff_id) else {
            return Err(CharacterError::BuffNotFound {
                name: self.name.clone(),
                buff_id,
            });
        };
        self.buffs.add(spec, permanent);
        self.validate(env, ValidateOptions::default());
        Ok(())
    }

    pub fn remove_buff(&mut self, buff_id: BuffId, env: &Env<'_>) -> bool {
        let removed = self.buffs.remove(buff_id);
        if removed {
            self.validate(env, ValidateOptions::default());
        }
        removed
    }

    pub fn has_buff(&self, buff_id: BuffId) -> bool {
        self.buffs.has(buff_id)
    }

    pub fn has_buff_flag(&self, flags: BuffFlags, env: &Env<'_>) -> bool {
        self.buffs.has_flag(flags, env.buffs())
    }

    /// Active buffs in the order they were applied.
    pub fn buffs(&self) -> impl Iterator<Item = &Buff> {
        self.buffs.active()
    }

    pub fn buff_triggers_left(&self, buff_id: BuffId) -> u32 {
        self.buffs.triggers_left(buff_id)
    }

    /// Records that the buff's start event was delivered.
    pub fn track_buff_started(&mut self, buff_id: BuffId) {
        self.buffs.mark_started(buff_id);
    }

    /// Advances buffs and cooldowns by one round.
    ///
    /// Returns the buffs firing this round. Buffs that used their last
    /// trigger stay in the ledger until [`prune_buffs`](Self::prune_buffs).
    pub fn round_tick(&mut self, env: &Env<'_>) -> Vec<BuffId> {
        self.cooldowns.round_tick();
        self.buffs.trigger(env.buffs())
    }

    /// Drops expired buffs and revalidates if any went.
    pub fn prune_buffs(&mut self, env: &Env<'_>) -> Vec<Buff> {
        let pruned = self.buffs.prune(env.buffs());
        if !pruned.is_empty() {
            self.validate(env, ValidateOptions::default());
        }
        pruned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::env::{BuffSpec, CatalogSnapshot, QuestDefinition, RaceDefinition, RaceId};
    use crate::stats::BaseAttributes;

    const WISDOM: BuffId = BuffId(1);
    const REGEN: BuffId = BuffId(2);

    fn catalog() -> CatalogSnapshot {
        let mut catalog = CatalogSnapshot::new();
        catalog
            .insert_race(
                RaceDefinition::new(RaceId(1), "human").with_base_stats(BaseAttributes::uniform(5)),
            )
            .unwrap();
        catalog
            .insert_race(RaceDefinition::new(RaceId(2), "elf").with_tnl_scale(1.5))
            .unwrap();
        catalog
            .insert_buff(BuffSpec::new(WISDOM, "wisdom").with_stat_mod(keys::XP_SCALE, 50))
            .unwrap();
        catalog
            .insert_buff(BuffSpec::new(REGEN, "regen").with_triggers(2, 2))
            .unwrap();
        catalog
            .insert_quest(QuestDefinition::new(QuestId(7), "rats", ["start", "cellar", "end"]))
            .unwrap();
        catalog
    }

    #[test]
    fn grant_xp_applies_scale_bonus() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let env = catalog.env(&config);
        let mut character = Character::new();

        assert_eq!(character.grant_xp(0, &env), (0, 100));
        assert_eq!(character.grant_xp(100, &env), (100, 100));

        character.add_buff(WISDOM, false, &env).unwrap();
        assert_eq!(character.grant_xp(100, &env), (150, 150));
        assert_eq!(character.experience, 1 + 100 + 150);
    }

    #[test]
    fn thresholds_follow_race_and_config() {
        let catalog = catalog();
        let config = EngineConfig::default().with_xp_scale(2.0);
        let env = catalog.env(&config);
        let mut character = Character::new().with_race(RaceId(2));
        character.validate(&env, ValidateOptions::default());

        assert_eq!(character.xp_to_level(1, &env), 5250);
        assert_eq!(character.xp_to_next_level(&env), 5249);
        let progress = character.xp_progress(&env);
        assert_eq!(progress.into_level, 1);
        assert_eq!(progress.span, 5250);
    }

    #[test]
    fn level_up_needs_the_threshold() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let env = catalog.env(&config);
        let mut character = Character::new().with_race(RaceId(1));
        character.validate(&env, ValidateOptions::default());

        character.experience = 1749;
        assert_eq!(character.level_up(&env), None);
        assert_eq!(character.level, 1);

        character.experience = 1750;
        character.health = 1;
        let level_up = character.level_up(&env).unwrap();
        assert_eq!(level_up.level, 2);
        // base 5: level 1 gives 0, level 2 gives 5 / 3 + 1
        assert_eq!(level_up.delta.get(Attribute::Strength), 2);
        assert_eq!(character.training_points, 1);
        assert_eq!(character.stat_points, 1);
        assert_eq!(character.health, character.health_max().value);
        assert_eq!(character.mana, character.mana_max().value);
        assert_eq!(character.level_up(&env), None);
    }

    #[test]
    fn training_spends_stat_points() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let env = catalog.env(&config);
        let mut character = Character::new().with_race(RaceId(1));

        assert_eq!(
            character.train_stat(Attribute::Smarts, &env),
            Err(CharacterError::NoStatPoints)
        );

        character.stat_points = 1;
        character.train_stat(Attribute::Smarts, &env).unwrap();
        assert_eq!(character.stat_points, 0);
        assert_eq!(character.stat_training(Attribute::Smarts), 1);
        assert_eq!(character.stat(Attribute::Smarts), 1);
    }

    #[test]
    fn auto_train_spreads_points() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let env = catalog.env(&config);
        let mut character = Character::new().with_race(RaceId(1));
        character.stat_points = 7;

        let trained = character.auto_train(&env);
        assert_eq!(trained.len(), 7);
        assert_eq!(trained[0], Attribute::ALL[0]);
        assert_eq!(trained[6], Attribute::ALL[0]);
        assert_eq!(character.stat_training(Attribute::ALL[0]), 2);
        assert_eq!(character.stat_training(Attribute::ALL[5]), 1);
        assert_eq!(character.stat_points, 0);
    }

    #[test]
    fn quest_tokens_only_move_forward() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let env = catalog.env(&config);
        let mut character = Character::new();
        let start = QuestToken::new(QuestId(7), "start");
        let cellar = QuestToken::new(QuestId(7), "cellar");
        let end = QuestToken::new(QuestId(7), "end");

        assert!(!character.give_quest_token(&cellar, &env));
        assert!(character.give_quest_token(&start, &env));
        assert!(character.give_quest_token(&end, &env));
        assert!(!character.give_quest_token(&cellar, &env));
        assert!(character.has_quest(&cellar, &env));
        assert!(character.is_quest_done(QuestId(7)));
        assert_eq!(character.quest_token(QuestId(7)), end);

        character.clear_quest_token(QuestId(7));
        assert!(character.quest_progress().is_empty());
        assert!(character.quest_token(QuestId(7)).is_unstarted());
    }

    #[test]
    fn unknown_buff_reports_target() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let env = catalog.env(&config);
        let mut character = Character::new().with_name("Ash");

        let err = character.add_buff(BuffId(99), false, &env).unwrap_err();
        assert_eq!(err.to_string(), "failed to add buff. target: \"Ash\" buffId: 99");
    }

    #[test]
    fn round_tick_fires_buffs_and_cools_down() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let env = catalog.env(&config);
        let mut character = Character::new();
        character.add_buff(REGEN, false, &env).unwrap();
        assert!(character.try_cooldown("bash", 2));

        assert!(character.round_tick(&env).is_empty());
        assert_eq!(character.cooldown("bash"), 1);
        assert_eq!(character.round_tick(&env), vec![REGEN]);
        assert_eq!(character.cooldown("bash"), 0);
        assert!(character.try_cooldown("bash", 2));

        character.round_tick(&env);
        assert_eq!(character.round_tick(&env), vec![REGEN]);
        assert!(!character.has_buff(REGEN));
        assert_eq!(character.prune_buffs(&env).len(), 1);
        assert_eq!(character.buffs().count(), 0);
    }
}
