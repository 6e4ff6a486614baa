//! Wearing and removing gear.

use std::collections::BTreeMap;

use arrayvec::ArrayVec;
use tracing::warn;

use crate::config::EngineConfig;
use crate::env::{BuffId, Env, ItemKind, ItemSubKind, RaceSize};
use crate::state::{Equipment, Item, Slot};

use super::inventory::find_by_name;
use super::{Character, ValidateOptions, WearError};

/// Items pushed out of their slots by a successful [`Character::wear`].
///
/// The caller owns them and should put them back in the backpack.
pub type Displaced = ArrayVec<Item, 2>;

impl Character {
    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    pub fn worn_items(&self) -> impl Iterator<Item = &Item> {
        self.equipment.worn().map(|(_, item)| item)
    }

    /// Hands needed to wield `item`.
    ///
    /// Shooting weapons ignore body size. Otherwise large races handle
    /// anything in one hand and small races need one extra.
    pub fn hands_required(&self, item: &Item, env: &Env<'_>) -> u8 {
        let Some(spec) = item.spec(env.items()) else {
            return 0;
        };
        if spec.sub_kind == ItemSubKind::Shooting {
            return spec.hands;
        }
        match env.races().race(self.race_id).map(|race| race.size) {
            Some(RaceSize::Large) => 1,
            Some(RaceSize::Small) => spec.hands.saturating_add(1),
            _ => spec.hands,
        }
    }

    /// Equips `item`, returning whatever it pushed out.
    ///
    /// On error nothing changed and `item` is dropped from consideration;
    /// the caller still holds its own copy.
    pub fn wear(&mut self, item: Item, env: &Env<'_>) -> Result<Displaced, WearError> {
        let items = env.items();
        let spec = item
            .spec(items)
            .filter(|spec| spec.is_equippable())
            .ok_or(WearError::NotEquippable)?;

        let hands = self.hands_required(&item, env);
        if hands > EngineConfig::MAX_HANDS {
            return Err(WearError::TooManyHands);
        }

        let can_dual_wield = self.can_dual_wield();
        let mut displaced = Displaced::new();

        // a second one-handed weapon goes to the free offhand
        if spec.kind == ItemKind::Weapon && hands < 2 {
            let current = self.equipment.item(Slot::Weapon);
            let both_claws = spec.sub_kind == ItemSubKind::Claws
                && current
                    .and_then(|weapon| weapon.spec(items))
                    .is_some_and(|weapon| weapon.sub_kind == ItemSubKind::Claws);
            let current_one_handed =
                current.is_some_and(|weapon| self.hands_required(weapon, env) == 1);

            if (can_dual_wield || both_claws)
                && current_one_handed
                && self.equipment.is_empty(Slot::Offhand)
            {
                self.equipment.place(Slot::Offhand, item);
                self.finish_equipment_change(&displaced, env);
                return Ok(displaced);
            }
        }

        let slot = Slot::for_kind(spec.kind).ok_or(WearError::Unrecognized)?;
        if self.equipment.is_disabled(slot) {
            return Err(WearError::SlotDisabled(slot));
        }

        match slot {
            Slot::Weapon => {
                if let Some(current) = self.equipment.item(Slot::Weapon)
                    && current.is_cursed(items)
                {
                    return Err(WearError::Cursed(current.name(items).to_string()));
                }
                if !self.equipment.is_disabled(Slot::Offhand) {
                    let offhand_is_weapon = self
                        .equipment
                        .item(Slot::Offhand)
                        .and_then(|offhand| offhand.spec(items))
                        .is_some_and(|offhand| offhand.kind == ItemKind::Weapon);
                    if hands == 2 || (!can_dual_wield && offhand_is_weapon) {
                        displaced.extend(self.equipment.take(Slot::Offhand));
                    }
                }
            }
            Slot::Offhand => {
                if !self.equipment.is_disabled(Slot::Weapon)
                    && let Some(weapon) = self.equipment.item(Slot::Weapon)
                    && self.hands_required(weapon, env) == 2
                {
                    if weapon.is_cursed(items) {
                        return Err(WearError::Cursed(weapon.name(items).to_string()));
                    }
                    displaced.extend(self.equipment.take(Slot::Weapon));
                }
            }
            _ => {}
        }

        displaced.extend(self.equipment.place(slot, item));
        self.finish_equipment_change(&displaced, env);
        Ok(displaced)
    }

    /// Takes this exact item instance off. False when it is not worn.
    pub fn remove_from_body(&mut self, item: &Item, env: &Env<'_>) -> bool {
        let Some(removed) = self
            .equipment
            .find_instance(item)
            .and_then(|slot| self.equipment.take(slot))
        else {
            return false;
        };
        self.finish_equipment_change(&[removed], env);
        true
    }

    /// Replaces the spawn-granted permanent buffs.
    pub fn set_perma_buffs(&mut self, buff_ids: impl IntoIterator<Item = BuffId>, env: &Env<'_>) {
        self.perma_buff_ids = buff_ids.into_iter().collect();
        self.finish_equipment_change(&[], env);
    }

    pub fn perma_buff_ids(&self) -> &[BuffId] {
        &self.perma_buff_ids
    }

    fn finish_equipment_change(&mut self, removed: &[Item], env: &Env<'_>) {
        self.reconcile_worn_buffs(removed, env);
        self.validate(env, ValidateOptions::default());
    }

    /// Adds or removes gear-granted buffs to match what is worn.
    ///
    /// Spawn and racial buffs always stay. `removed` lists items that just
    /// came off and no longer grant anything. Returns whether the ledger
    /// changed.
    pub fn reconcile_worn_buffs(&mut self, removed: &[Item], env: &Env<'_>) -> bool {
        let items = env.items();
        let mut counts: BTreeMap<BuffId, i32> = BTreeMap::new();

        for buff_id in &self.perma_buff_ids {
            counts.insert(*buff_id, EngineConfig::PERMANENT_BUFF_WEIGHT);
        }
        if let Some(race) = env.races().race(self.race_id) {
            for buff_id in &race.buff_ids {
                counts.insert(*buff_id, EngineConfig::PERMANENT_BUFF_WEIGHT);
            }
        }
        for buff in self.buffs.entries().iter().filter(|buff| buff.permanent) {
            counts.entry(buff.buff_id).or_insert(0);
        }
        for spec in self.worn_items().filter_map(|item| item.spec(items)) {
            for buff_id in &spec.worn_buff_ids {
                *counts.entry(*buff_id).or_insert(0) += 1;
            }
        }
        for spec in removed.iter().filter_map(|item| item.spec(items)) {
            for buff_id in &spec.worn_buff_ids {
                *counts.entry(*buff_id).or_insert(0) -= 1;
            }
        }

        let mut changed = false;
        for (buff_id, count) in counts {
            if count < 1 {
                changed |= self.buffs.remove(buff_id);
                continue;
            }
            match env.buffs().buff(buff_id) {
                Some(spec) => changed |= self.buffs.add(spec, true),
                None => warn!(character = %self.name, %buff_id, "unknown worn buff skipped"),
            }
        }
        changed
    }

    /// Percent of incoming damage blocked by gear, at most 100.
    ///
    /// A shield-like offhand (anything but a weapon or holdable) adds half
    /// again.
    pub fn defense(&self, env: &Env<'_>) -> i32 {
        let items = env.items();
        let mut reduction: i32 = self
            .worn_items()
            .filter_map(|item| item.spec(items))
            .map(|spec| spec.damage_reduction)
            .sum();

        let has_shield = self
            .equipment
            .item(Slot::Offhand)
            .and_then(|offhand| offhand.spec(items))
            .is_some_and(|spec| !matches!(spec.kind, ItemKind::Weapon | ItemKind::Holdable));
        if has_shield {
            reduction = reduction * 3 / 2;
        }
        reduction.min(EngineConfig::DEFENSE_CAP)
    }

    pub fn gear_value(&self, env: &Env<'_>) -> i32 {
        self.worn_items()
            .filter_map(|item| item.spec(env.items()))
            .map(|spec| spec.value)
            .sum()
    }

    pub fn find_on_body(&self, name: &str, env: &Env<'_>) -> Option<&Item> {
        find_by_name(name, self.worn_items(), env.items())
    }

    /// Lifts the curse from every worn cursed item. Returns the items freed.
    pub fn uncurse(&mut self, env: &Env<'_>) -> Vec<Item> {
        let items = env.items();
        let mut freed = Vec::new();
        for item in self.equipment.worn_mut() {
            if item.is_cursed(items) {
                item.uncursed = true;
                freed.push(item.clone());
            }
        }
        freed
    }
}
