//! Buff ledger carried by a character.
//!
//! Entries refer to catalog buffs by id. Expired entries stay in the ledger
//! (so the host can fire their end events) until [`Buffs::prune`] removes
//! them; every query ignores them.

use crate::env::{BuffFlags, BuffId, BuffOracle, BuffSpec};

/// Trigger count given to permanent buffs.
pub const TRIGGERS_UNLIMITED: u32 = 1_000_000_000;

/// One applied buff.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Buff {
    pub buff_id: BuffId,
    /// The start event has been delivered.
    pub started: bool,
    /// Granted by worn gear, race or spawn data rather than a timed effect.
    pub permanent: bool,
    pub round_counter: u32,
    pub triggers_left: u32,
}

impl Buff {
    pub fn is_expired(&self) -> bool {
        self.triggers_left == 0
    }

    pub fn stat_mod(&self, name: &str, buffs: &dyn BuffOracle) -> i32 {
        if self.is_expired() {
            return 0;
        }
        buffs.buff(self.buff_id).map_or(0, |spec| spec.stat_mods.get(name))
    }

    fn flags(&self, buffs: &dyn BuffOracle) -> BuffFlags {
        buffs
            .buff(self.buff_id)
            .map_or(BuffFlags::empty(), |spec| spec.flags)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Buffs {
    list: Vec<Buff>,
}

impl Buffs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `spec`, refreshing it when already present.
    ///
    /// Permanent buffs never run out of triggers. Returns whether the ledger
    /// changed.
    pub fn add(&mut self, spec: &BuffSpec, permanent: bool) -> bool {
        let triggers_left = if permanent {
            TRIGGERS_UNLIMITED
        } else {
            spec.trigger_count
        };

        if let Some(existing) = self.list.iter_mut().find(|b| b.buff_id == spec.id) {
            let changed = existing.triggers_left != triggers_left || existing.permanent != permanent;
            existing.triggers_left = triggers_left;
            existing.permanent = permanent;
            return changed;
        }

        self.list.push(Buff {
            buff_id: spec.id,
            started: false,
            permanent,
            round_counter: 0,
            triggers_left,
        });
        true
    }

    /// Expires `buff_id`. Returns false when it was not active.
    pub fn remove(&mut self, buff_id: BuffId) -> bool {
        match self
            .list
            .iter_mut()
            .find(|b| b.buff_id == buff_id && !b.is_expired())
        {
            Some(buff) => {
                buff.triggers_left = 0;
                true
            }
            None => false,
        }
    }

    pub fn has(&self, buff_id: BuffId) -> bool {
        self.active().any(|b| b.buff_id == buff_id)
    }

    pub fn get(&self, buff_id: BuffId) -> Option<&Buff> {
        self.active().find(|b| b.buff_id == buff_id)
    }

    pub fn triggers_left(&self, buff_id: BuffId) -> u32 {
        self.get(buff_id).map_or(0, |b| b.triggers_left)
    }

    /// True when any active buff carries one of `flags`.
    pub fn has_flag(&self, flags: BuffFlags, buffs: &dyn BuffOracle) -> bool {
        self.active().any(|b| b.flags(buffs).intersects(flags))
    }

    /// Expires every active buff carrying one of `flags`.
    ///
    /// Returns whether anything was expired.
    pub fn expire_with_flag(&mut self, flags: BuffFlags, buffs: &dyn BuffOracle) -> bool {
        let mut found = false;
        for buff in self.list.iter_mut().filter(|b| !b.is_expired()) {
            if buff.flags(buffs).intersects(flags) {
                buff.triggers_left = 0;
                found = true;
            }
        }
        found
    }

    pub fn ids_with_flag(&self, flags: BuffFlags, buffs: &dyn BuffOracle) -> Vec<BuffId> {
        self.active()
            .filter(|b| b.flags(buffs).intersects(flags))
            .map(|b| b.buff_id)
            .collect()
    }

    /// Sum of the named modifier across active buffs.
    pub fn stat_mod(&self, name: &str, buffs: &dyn BuffOracle) -> i32 {
        self.list.iter().map(|b| b.stat_mod(name, buffs)).sum()
    }

    pub fn mark_started(&mut self, buff_id: BuffId) {
        if let Some(buff) = self.list.iter_mut().find(|b| b.buff_id == buff_id) {
            buff.started = true;
        }
    }

    /// Advances every buff by one round and returns those firing this round.
    pub fn trigger(&mut self, buffs: &dyn BuffOracle) -> Vec<BuffId> {
        let mut fired = Vec::new();
        for buff in self.list.iter_mut().filter(|b| !b.is_expired()) {
            let Some(spec) = buffs.buff(buff.buff_id) else {
                continue;
            };
            buff.round_counter += 1;
            if buff.round_counter % spec.effective_round_interval() == 0 {
                fired.push(buff.buff_id);
                if buff.triggers_left == TRIGGERS_UNLIMITED {
                    buff.round_counter = 0;
                } else {
                    buff.triggers_left -= 1;
                }
            }
        }
        fired
    }

    /// Removes expired buffs and buffs the catalog no longer knows.
    pub fn prune(&mut self, buffs: &dyn BuffOracle) -> Vec<Buff> {
        let (kept, pruned) = std::mem::take(&mut self.list)
            .into_iter()
            .partition(|b| !b.is_expired() && buffs.buff(b.buff_id).is_some());
        self.list = kept;
        pruned
    }

    /// Active buffs in application order.
    pub fn active(&self) -> impl Iterator<Item = &Buff> {
        self.list.iter().filter(|b| !b.is_expired())
    }

    /// Every entry, expired ones included.
    pub fn entries(&self) -> &[Buff] {
        &self.list
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::CatalogSnapshot;

    fn catalog() -> CatalogSnapshot {
        let mut catalog = CatalogSnapshot::new();
        catalog
            .insert_buff(
                BuffSpec::new(BuffId(1), "strength")
                    .with_stat_mod("strength", 2)
                    .with_triggers(1, 3),
            )
            .unwrap();
        catalog
            .insert_buff(
                BuffSpec::new(BuffId(2), "hidden")
                    .with_flags(BuffFlags::HIDDEN | BuffFlags::CANCEL_ON_ACTION)
                    .with_triggers(2, 2),
            )
            .unwrap();
        catalog
    }

    #[test]
    fn add_refreshes_existing_entry() {
        let catalog = catalog();
        let spec = catalog.buff(BuffId(1)).unwrap();
        let mut ledger = Buffs::new();

        assert!(ledger.add(spec, false));
        assert_eq!(ledger.triggers_left(BuffId(1)), 3);
        assert!(!ledger.add(spec, false));
        assert!(ledger.add(spec, true));
        assert_eq!(ledger.triggers_left(BuffId(1)), TRIGGERS_UNLIMITED);
        assert_eq!(ledger.entries().len(), 1);
    }

    #[test]
    fn removed_buffs_stop_counting_until_pruned() {
        let catalog = catalog();
        let mut ledger = Buffs::new();
        ledger.add(catalog.buff(BuffId(1)).unwrap(), false);
        assert_eq!(ledger.stat_mod("strength", &catalog), 2);

        assert!(ledger.remove(BuffId(1)));
        assert!(!ledger.remove(BuffId(1)));
        assert!(!ledger.has(BuffId(1)));
        assert_eq!(ledger.stat_mod("strength", &catalog), 0);

        let pruned = ledger.prune(&catalog);
        assert_eq!(pruned.len(), 1);
        assert!(ledger.is_empty());
    }

    #[test]
    fn flags_can_be_queried_and_expired() {
        let catalog = catalog();
        let mut ledger = Buffs::new();
        ledger.add(catalog.buff(BuffId(1)).unwrap(), false);
        ledger.add(catalog.buff(BuffId(2)).unwrap(), false);

        assert!(ledger.has_flag(BuffFlags::HIDDEN, &catalog));
        assert!(!ledger.has_flag(BuffFlags::POISON, &catalog));
        assert_eq!(ledger.ids_with_flag(BuffFlags::CANCEL_ON_ACTION, &catalog), vec![BuffId(2)]);

        assert!(ledger.expire_with_flag(BuffFlags::CANCEL_ON_ACTION, &catalog));
        assert!(!ledger.has_flag(BuffFlags::HIDDEN, &catalog));
        assert!(ledger.has(BuffId(1)));
    }

    #[test]
    fn trigger_respects_interval_and_count() {
        let catalog = catalog();
        let mut ledger = Buffs::new();
        ledger.add(catalog.buff(BuffId(2)).unwrap(), false);

        assert!(ledger.trigger(&catalog).is_empty());
        assert_eq!(ledger.trigger(&catalog), vec![BuffId(2)]);
        assert!(ledger.trigger(&catalog).is_empty());
        assert_eq!(ledger.trigger(&catalog), vec![BuffId(2)]);
        assert!(!ledger.has(BuffId(2)));
    }
}
