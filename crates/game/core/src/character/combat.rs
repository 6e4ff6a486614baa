//! Combat intent, charm and resource pools.

use crate::env::{BuffFlags, DamageDice, Env, ItemSubKind};
use crate::state::{
    Aggro, AggroKind, AggroTarget, CharmInfo, MobInstanceId, Slot, SpellAggroInfo, UserId,
};
use crate::stats::{Attribute, ResourceKind, keys};

use super::{Character, ValidateOptions};

const CHARMED_ADJECTIVE: &str = "charmed";

impl Character {
    // ========================================================================
    // Aggro
    // ========================================================================

    pub fn aggro(&self) -> Option<&Aggro> {
        self.aggro.as_ref()
    }

    pub fn aggro_mut(&mut self) -> Option<&mut Aggro> {
        self.aggro.as_mut()
    }

    /// Starts attacking `target`.
    ///
    /// `wait_rounds` are summed when given; otherwise the weapon and offhand
    /// decide how long the attack takes. A default attack made with a
    /// shooting weapon becomes [`AggroKind::Shooting`].
    pub fn set_aggro(
        &mut self,
        target: AggroTarget,
        kind: AggroKind,
        wait_rounds: &[u32],
        env: &Env<'_>,
    ) {
        let items = env.items();
        let rounds = if wait_rounds.is_empty() {
            self.equipment.wait_rounds(items)
        } else {
            wait_rounds.iter().sum()
        };

        let shooting = self
            .equipment
            .item(Slot::Weapon)
            .and_then(|weapon| weapon.spec(items))
            .is_some_and(|spec| spec.sub_kind == ItemSubKind::Shooting);
        let kind = if kind == AggroKind::DefaultAttack && shooting {
            AggroKind::Shooting
        } else {
            kind
        };

        self.aggro = Some(Aggro::attack(target, kind, rounds));
    }

    /// Like [`set_aggro`](Self::set_aggro), for a target through `exit_name`.
    pub fn set_aggro_remote(
        &mut self,
        exit_name: &str,
        target: AggroTarget,
        kind: AggroKind,
        wait_rounds: &[u32],
        env: &Env<'_>,
    ) {
        self.set_aggro(target, kind, wait_rounds, env);
        if let Some(aggro) = &mut self.aggro {
            aggro.exit_name = Some(exit_name.to_string());
        }
    }

    /// Starts casting. Weapons play no part in the wait.
    pub fn set_cast(&mut self, wait_rounds: u32, spell: SpellAggroInfo) {
        self.aggro = Some(Aggro::cast(wait_rounds, spell));
    }

    pub fn end_aggro(&mut self) {
        self.aggro = None;
    }

    /// Turns the current intent into a retreat. No effect when not in combat.
    pub fn flee(&mut self) {
        if let Some(aggro) = &mut self.aggro {
            aggro.flee();
        }
    }

    pub fn is_aggro(&self, user: Option<UserId>, mob: Option<MobInstanceId>) -> bool {
        self.aggro
            .as_ref()
            .is_some_and(|aggro| aggro.targets(user, mob))
    }

    // ========================================================================
    // Charm
    // ========================================================================

    /// Puts the character under `user`'s control.
    ///
    /// Stops any attack on the charmer.
    pub fn charm(&mut self, user: UserId, rounds: Option<u32>, expire_command: &str) {
        self.set_adjective(CHARMED_ADJECTIVE, true);
        self.charm = Some(CharmInfo::new(user, rounds, expire_command));
        if self
            .aggro
            .as_ref()
            .is_some_and(|aggro| aggro.target.user() == Some(user))
        {
            self.aggro = None;
        }
    }

    /// Ends the charm, returning who held it.
    pub fn remove_charm(&mut self) -> Option<UserId> {
        self.set_adjective(CHARMED_ADJECTIVE, false);
        self.charm.take().map(|charm| charm.user_id)
    }

    pub fn charm_info(&self) -> Option<&CharmInfo> {
        self.charm.as_ref()
    }

    /// Counts down a timed charm. Returns true when it just ran out; the
    /// host then runs the expire command and calls
    /// [`remove_charm`](Self::remove_charm).
    pub fn tick_charm(&mut self) -> bool {
        self.charm.as_mut().is_some_and(CharmInfo::tick)
    }

    pub fn is_charmed(&self) -> bool {
        self.charm.is_some()
    }

    pub fn is_charmed_by(&self, users: &[UserId]) -> bool {
        self.charm
            .as_ref()
            .is_some_and(|charm| users.contains(&charm.user_id))
    }

    pub fn charmed_user_id(&self) -> Option<UserId> {
        self.charm.as_ref().map(|charm| charm.user_id)
    }

    /// Adds or drops a mob from the list of creatures this character charms.
    pub fn track_charmed(&mut self, mob: MobInstanceId, add: bool) {
        match self.charmed_mobs.iter().position(|tracked| *tracked == mob) {
            Some(index) if !add => {
                self.charmed_mobs.remove(index);
            }
            Some(_) => {}
            None if add => self.charmed_mobs.push(mob),
            None => {}
        }
    }

    pub fn charmed_mob_ids(&self) -> &[MobInstanceId] {
        &self.charmed_mobs
    }

    // ========================================================================
    // Resources
    // ========================================================================

    /// Applies damage or healing and returns the actual change.
    ///
    /// Dropping below zero cancels buffs that end on combat. Health never
    /// goes past its maximum or below the death floor.
    pub fn apply_health_change(&mut self, change: i32, env: &Env<'_>) -> i32 {
        let old = self.health;
        let mut new = old.saturating_add(change);
        if new < 0 {
            self.cancel_buffs_with_flag(BuffFlags::CANCEL_IF_COMBAT, env);
            new = new.max(ResourceKind::Health.current_floor());
        } else {
            new = new.min(self.health_max.value);
        }
        self.health = new;
        new - old
    }

    /// Applies a mana change within `[0, max]` and returns the actual change.
    pub fn apply_mana_change(&mut self, change: i32) -> i32 {
        let old = self.mana;
        self.mana = old
            .saturating_add(change)
            .clamp(ResourceKind::Mana.current_floor(), self.mana_max.value.max(0));
        self.mana - old
    }

    /// Restores health and mana, up to their maxima.
    pub fn heal(&mut self, health: i32, mana: i32) {
        self.health = self.health.saturating_add(health).min(self.health_max.value);
        self.mana = self.mana.saturating_add(mana).min(self.mana_max.value);
    }

    /// Spends action points. False (and nothing spent) when short.
    pub fn deduct_action_points(&mut self, amount: i32) -> bool {
        if self.action_points < amount {
            return false;
        }
        self.action_points = (self.action_points - amount).max(0);
        true
    }

    /// Down or dead.
    pub fn is_disabled(&self) -> bool {
        self.health <= 0
    }

    pub fn health_per_round(&self, env: &Env<'_>) -> i32 {
        1 + self.stat_mod(keys::HEALTH_RECOVERY, env)
    }

    pub fn mana_per_round(&self, env: &Env<'_>) -> i32 {
        1 + self.stat_mod(keys::MANA_RECOVERY, env)
    }

    /// Action points one step costs: three steps a round, one more for every
    /// 15 levels and every 15 speed.
    pub fn movement_cost(&self) -> i32 {
        let moves = 3 + self.level / 15 + self.stat(Attribute::Speed) / 15;
        1000 / moves.max(1)
    }

    /// Items the character can carry.
    pub fn carry_capacity(&self) -> i32 {
        5 + self.stat(Attribute::Strength) / 3
    }

    /// Discount earned on `price` by perception, at most 75%.
    pub fn barter_price(&self, price: i32) -> i32 {
        let factor = (f64::from(self.stat(Attribute::Perception)) / 3.0 / 100.0).min(0.75);
        (factor * f64::from(price)) as i32
    }

    /// Unarmed damage: the race's dice, grown by speed, strength and
    /// perception but never below the race's own.
    pub fn default_dice_roll(&self, env: &Env<'_>) -> DamageDice {
        let race = env
            .races()
            .race(self.race_id)
            .map(|race| race.damage)
            .unwrap_or(DamageDice::new(1, 1, 2, 0));

        let grow = |base: u8, bonus: i32| -> u8 {
            let grown = (i32::from(base) + bonus).clamp(i32::from(base), i32::from(u8::MAX));
            u8::try_from(grown).unwrap_or(base)
        };

        DamageDice {
            attacks: race.attacks,
            dice_count: grow(race.dice_count, self.stat(Attribute::Speed).div_euclid(50)),
            side_count: grow(race.side_count, self.stat(Attribute::Strength).div_euclid(12)),
            bonus: race.bonus + self.stat(Attribute::Perception).div_euclid(25),
        }
    }

    pub fn knows_first_aid(&self, env: &Env<'_>) -> bool {
        env.races()
            .race(self.race_id)
            .is_some_and(|race| race.knows_first_aid)
    }

    /// Ends every active buff carrying one of `flags`, then revalidates.
    ///
    /// Returns whether anything ended.
    pub fn cancel_buffs_with_flag(&mut self, flags: BuffFlags, env: &Env<'_>) -> bool {
        if !self.buffs.expire_with_flag(flags, env.buffs()) {
            return false;
        }
        self.validate(env, ValidateOptions::reconcile());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::env::{
        BuffId, BuffSpec, CatalogSnapshot, ItemId, ItemKind, ItemSpec, RaceDefinition, RaceId,
    };
    use crate::state::Item;
    use crate::stats::BaseAttributes;

    const BOW: ItemId = ItemId(1);
    const SWORD: ItemId = ItemId(2);
    const BUCKLER: ItemId = ItemId(3);
    const HIDE: BuffId = BuffId(5);

    fn catalog() -> CatalogSnapshot {
        let mut catalog = CatalogSnapshot::new();
        catalog
            .insert_item(
                ItemSpec::new(BOW, "bow", ItemKind::Weapon, ItemSubKind::Shooting)
                    .with_hands(2)
                    .with_wait_rounds(2),
            )
            .unwrap();
        catalog
            .insert_item(
                ItemSpec::new(SWORD, "sword", ItemKind::Weapon, ItemSubKind::Slashing)
                    .with_wait_rounds(1),
            )
            .unwrap();
        catalog
            .insert_item(
                ItemSpec::new(BUCKLER, "buckler", ItemKind::Offhand, ItemSubKind::Wearable)
                    .with_wait_rounds(1),
            )
            .unwrap();
        catalog
            .insert_buff(
                BuffSpec::new(HIDE, "hide")
                    .with_flags(BuffFlags::HIDDEN | BuffFlags::CANCEL_IF_COMBAT)
                    .with_triggers(1, 10),
            )
            .unwrap();
        catalog
            .insert_race(
                RaceDefinition::new(RaceId(1), "human").with_base_stats(BaseAttributes::uniform(5)),
            )
            .unwrap();
        catalog
    }

    #[test]
    fn shooting_weapon_turns_default_attacks_into_shots() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let env = catalog.env(&config);
        let mut character = Character::new().with_race(RaceId(1));
        character.wear(Item::new(BOW), &env).unwrap();

        character.set_aggro(AggroTarget::Mob(MobInstanceId(3)), AggroKind::DefaultAttack, &[], &env);
        let aggro = character.aggro().unwrap();
        assert_eq!(aggro.kind(), AggroKind::Shooting);
        assert_eq!(aggro.rounds_waiting, 2);

        character.set_aggro(AggroTarget::Mob(MobInstanceId(3)), AggroKind::BackStab, &[1, 3], &env);
        let aggro = character.aggro().unwrap();
        assert_eq!(aggro.kind(), AggroKind::BackStab);
        assert_eq!(aggro.rounds_waiting, 4);
    }

    #[test]
    fn wait_rounds_sum_weapon_and_offhand() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let env = catalog.env(&config);
        let mut character = Character::new().with_race(RaceId(1));
        character.wear(Item::new(SWORD), &env).unwrap();
        character.wear(Item::new(BUCKLER), &env).unwrap();

        character.set_aggro_remote("north", AggroTarget::User(UserId(8)), AggroKind::DefaultAttack, &[], &env);
        let aggro = character.aggro().unwrap();
        assert_eq!(aggro.rounds_waiting, 2);
        assert_eq!(aggro.exit_name.as_deref(), Some("north"));
        assert_eq!(aggro.kind(), AggroKind::DefaultAttack);
    }

    #[test]
    fn flee_keeps_target() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let env = catalog.env(&config);
        let mut character = Character::new();

        character.flee();
        assert!(character.aggro().is_none());

        character.set_aggro(AggroTarget::User(UserId(2)), AggroKind::DefaultAttack, &[], &env);
        character.flee();
        let aggro = character.aggro().unwrap();
        assert_eq!(aggro.kind(), AggroKind::Flee);
        assert_eq!(aggro.target, AggroTarget::User(UserId(2)));

        character.end_aggro();
        assert!(!character.is_aggro(Some(UserId(2)), None));
    }

    #[test]
    fn charm_stops_attacking_the_charmer() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let env = catalog.env(&config);
        let mut mob = Character::new();
        mob.set_aggro(AggroTarget::User(UserId(4)), AggroKind::DefaultAttack, &[], &env);

        mob.charm(UserId(4), Some(2), "emote looks confused.");
        assert!(mob.aggro().is_none());
        assert!(mob.is_charmed_by(&[UserId(1), UserId(4)]));
        assert!(mob.adjectives(&env).contains(&"charmed".to_string()));

        assert!(!mob.tick_charm());
        assert!(mob.tick_charm());
        assert_eq!(mob.remove_charm(), Some(UserId(4)));
        assert!(!mob.is_charmed());
        assert_eq!(mob.remove_charm(), None);
    }

    #[test]
    fn tracks_charmed_mobs_by_position() {
        let mut character = Character::new();
        character.track_charmed(MobInstanceId(1), true);
        character.track_charmed(MobInstanceId(2), true);
        character.track_charmed(MobInstanceId(1), true);
        character.track_charmed(MobInstanceId(3), false);
        assert_eq!(character.charmed_mob_ids(), &[MobInstanceId(1), MobInstanceId(2)]);

        character.track_charmed(MobInstanceId(1), false);
        assert_eq!(character.charmed_mob_ids(), &[MobInstanceId(2)]);
    }

    #[test]
    fn falling_below_zero_cancels_hiding() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let env = catalog.env(&config);
        let mut character = Character::new().with_race(RaceId(1));
        character.validate(&env, ValidateOptions::default());
        character.add_buff(HIDE, false, &env).unwrap();
        character.health = 5;

        assert_eq!(character.apply_health_change(-3, &env), -3);
        assert!(character.has_buff(HIDE));

        assert_eq!(character.apply_health_change(-100, &env), -12);
        assert_eq!(character.health, EngineConfig::HEALTH_FLOOR);
        assert!(!character.has_buff(HIDE));
        assert!(character.is_disabled());

        let gained = character.apply_health_change(10_000, &env);
        assert_eq!(character.health, character.health_max().value);
        assert_eq!(gained, character.health_max().value + 10);
    }

    #[test]
    fn heal_uses_each_amount_for_its_pool() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let env = catalog.env(&config);
        let mut character = Character::new().with_race(RaceId(1));
        character.validate(&env, ValidateOptions::default());
        character.health = 1;
        character.mana = 0;

        character.heal(2, 0);
        assert_eq!((character.health, character.mana), (3, 0));
        character.heal(0, 3);
        assert_eq!((character.health, character.mana), (3, 3));
        assert_eq!(character.apply_mana_change(-10), -3);
    }

    #[test]
    fn action_points_are_never_overdrawn() {
        let mut character = Character::new();
        character.action_points = 10;
        assert!(!character.deduct_action_points(11));
        assert!(character.deduct_action_points(10));
        assert_eq!(character.action_points, 0);
    }

    #[test]
    fn derived_rates() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let env = catalog.env(&config);
        let mut character = Character::new().with_race(RaceId(1));
        character.level = 30;
        character.validate(&env, ValidateOptions::default());

        // base 5 at level 30: 29 * 5 / 3 + 15 = 63
        assert_eq!(character.stat(Attribute::Speed), 63);
        assert_eq!(character.movement_cost(), 1000 / (3 + 2 + 4));
        assert_eq!(character.carry_capacity(), 5 + 21);
        assert_eq!(character.barter_price(100), 21);
        assert_eq!(character.health_per_round(&env), 1);

        let dice = character.default_dice_roll(&env);
        assert_eq!(dice.dice_count, 2);
        assert_eq!(dice.side_count, 2 + 5);
        assert_eq!(dice.bonus, 2);
    }
}
