//! In-memory catalog backing every oracle.
//!
//! Hosts build a [`CatalogSnapshot`] once (usually from the content crate's
//! loaders) and hand out an [`Env`] that borrows it. Lookups never allocate.

use std::collections::BTreeMap;

use super::{
    BuffId, BuffOracle, BuffSpec, Env, ItemId, ItemOracle, ItemSpec, OracleError, QuestDefinition,
    QuestId, QuestOracle, RaceDefinition, RaceId, RaceOracle,
};
use crate::config::EngineConfig;

// ============================================================================
// Snapshot
// ============================================================================

/// Owned catalog of items, races, buffs and quests.
#[derive(Clone, Debug, Default)]
pub struct CatalogSnapshot {
    items: BTreeMap<ItemId, ItemSpec>,
    races: BTreeMap<RaceId, RaceDefinition>,
    buffs: BTreeMap<BuffId, BuffSpec>,
    quests: BTreeMap<QuestId, QuestDefinition>,
}

impl CatalogSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item definition. Weapons are normalized on insert.
    pub fn insert_item(&mut self, spec: ItemSpec) -> Result<(), OracleError> {
        if self.items.contains_key(&spec.id) {
            return Err(OracleError::DuplicateItem(spec.id));
        }
        self.items.insert(spec.id, spec.normalized());
        Ok(())
    }

    pub fn insert_race(&mut self, race: RaceDefinition) -> Result<(), OracleError> {
        if self.races.contains_key(&race.id) {
            return Err(OracleError::DuplicateRace(race.id));
        }
        self.races.insert(race.id, race);
        Ok(())
    }

    pub fn insert_buff(&mut self, spec: BuffSpec) -> Result<(), OracleError> {
        if self.buffs.contains_key(&spec.id) {
            return Err(OracleError::DuplicateBuff(spec.id));
        }
        self.buffs.insert(spec.id, spec);
        Ok(())
    }

    /// Adds a quest. Quests need at least one step and unique step names,
    /// since progress is ordered by step position.
    pub fn insert_quest(&mut self, quest: QuestDefinition) -> Result<(), OracleError> {
        if self.quests.contains_key(&quest.id) {
            return Err(OracleError::DuplicateQuest(quest.id));
        }
        if quest.steps.is_empty() {
            return Err(OracleError::InvalidQuest {
                id: quest.id,
                reason: "no steps",
            });
        }
        let repeated = quest
            .steps
            .iter()
            .enumerate()
            .any(|(i, step)| quest.steps[..i].contains(step));
        if repeated {
            return Err(OracleError::InvalidQuest {
                id: quest.id,
                reason: "repeated step name",
            });
        }
        self.quests.insert(quest.id, quest);
        Ok(())
    }

    pub fn items(&self) -> impl Iterator<Item = &ItemSpec> {
        self.items.values()
    }

    pub fn races(&self) -> impl Iterator<Item = &RaceDefinition> {
        self.races.values()
    }

    pub fn buffs(&self) -> impl Iterator<Item = &BuffSpec> {
        self.buffs.values()
    }

    pub fn quests(&self) -> impl Iterator<Item = &QuestDefinition> {
        self.quests.values()
    }

    /// Borrows this catalog as an environment with the default scaling.
    pub fn env<'a>(&'a self, config: &'a EngineConfig) -> Env<'a> {
        Env::new(self, self, self, self, config)
    }
}

// ============================================================================
// Oracle implementations
// ============================================================================

impl ItemOracle for CatalogSnapshot {
    fn item(&self, id: ItemId) -> Option<&ItemSpec> {
        self.items.get(&id)
    }
}

impl RaceOracle for CatalogSnapshot {
    fn race(&self, id: RaceId) -> Option<&RaceDefinition> {
        self.races.get(&id)
    }
}

impl BuffOracle for CatalogSnapshot {
    fn buff(&self, id: BuffId) -> Option<&BuffSpec> {
        self.buffs.get(&id)
    }
}

impl QuestOracle for CatalogSnapshot {
    fn quest(&self, id: QuestId) -> Option<&QuestDefinition> {
        self.quests.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ItemKind, ItemSubKind};

    #[test]
    fn duplicates_are_rejected() {
        let mut catalog = CatalogSnapshot::new();
        let sword = ItemSpec::new(ItemId(1), "sword", ItemKind::Weapon, ItemSubKind::Slashing);
        catalog.insert_item(sword.clone()).unwrap();

        assert_eq!(
            catalog.insert_item(sword),
            Err(OracleError::DuplicateItem(ItemId(1)))
        );
    }

    #[test]
    fn quests_need_distinct_steps() {
        let mut catalog = CatalogSnapshot::new();
        let empty = QuestDefinition::new(QuestId(1), "Nothing", Vec::<String>::new());
        let repeated = QuestDefinition::new(QuestId(2), "Loop", ["start", "middle", "start"]);

        assert!(matches!(
            catalog.insert_quest(empty),
            Err(OracleError::InvalidQuest { .. })
        ));
        assert!(matches!(
            catalog.insert_quest(repeated),
            Err(OracleError::InvalidQuest { .. })
        ));
        assert_eq!(catalog.quests().count(), 0);
    }

    #[test]
    fn weapons_are_normalized_on_insert() {
        let mut catalog = CatalogSnapshot::new();
        let mut club = ItemSpec::new(ItemId(7), "club", ItemKind::Weapon, ItemSubKind::Bludgeoning);
        club.hands = 0;
        club.damage.attacks = 0;
        catalog.insert_item(club).unwrap();

        let stored = catalog.item(ItemId(7)).unwrap();
        assert_eq!(stored.hands, 1);
        assert_eq!(stored.damage.attacks, 1);
    }
}
