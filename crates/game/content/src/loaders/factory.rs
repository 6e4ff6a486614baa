//! Content factory for building the catalog from data files.

use std::path::{Path, PathBuf};

use anyhow::Context;
use mud_core::{
    BuffId, BuffSpec, CatalogSnapshot, EngineConfig, ItemSpec, QuestDefinition, RaceDefinition,
};
use tracing::{info, warn};

use crate::loaders::{BuffLoader, ConfigLoader, ItemLoader, LoadResult, QuestLoader, RaceLoader};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── items.ron
/// ├── races.ron
/// ├── buffs.ron
/// └── quests.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load engine configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<EngineConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<Vec<ItemSpec>> {
        ItemLoader::load(&self.data_dir.join("items.ron"))
    }

    /// Load race definitions from `races.ron`.
    pub fn load_races(&self) -> LoadResult<Vec<RaceDefinition>> {
        RaceLoader::load(&self.data_dir.join("races.ron"))
    }

    /// Load buff specs from `buffs.ron`.
    pub fn load_buffs(&self) -> LoadResult<Vec<BuffSpec>> {
        BuffLoader::load(&self.data_dir.join("buffs.ron"))
    }

    /// Load quest definitions from `quests.ron`.
    pub fn load_quests(&self) -> LoadResult<Vec<QuestDefinition>> {
        QuestLoader::load(&self.data_dir.join("quests.ron"))
    }

    /// Loads every catalog file into one snapshot.
    ///
    /// Duplicate ids and malformed quests are errors. Items and races that
    /// grant buffs missing from `buffs.ron` are logged and kept; those buffs
    /// are skipped when granted.
    pub fn load_catalog(&self) -> LoadResult<CatalogSnapshot> {
        let mut catalog = CatalogSnapshot::new();

        for spec in self.load_buffs()? {
            catalog.insert_buff(spec).context("Invalid buffs.ron")?;
        }
        for spec in self.load_items()? {
            catalog.insert_item(spec).context("Invalid items.ron")?;
        }
        for race in self.load_races()? {
            catalog.insert_race(race).context("Invalid races.ron")?;
        }
        for quest in self.load_quests()? {
            catalog.insert_quest(quest).context("Invalid quests.ron")?;
        }

        check_buff_references(&catalog);
        info!(
            data_dir = %self.data_dir.display(),
            items = catalog.items().count(),
            races = catalog.races().count(),
            buffs = catalog.buffs().count(),
            quests = catalog.quests().count(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Returns how many dangling buff references were found.
fn check_buff_references(catalog: &CatalogSnapshot) -> usize {
    let known = |id: BuffId| catalog.buffs().any(|buff| buff.id == id);
    let mut dangling = 0;

    for item in catalog.items() {
        for buff_id in item.worn_buff_ids.iter().filter(|id| !known(**id)) {
            warn!(item = %item.id, %buff_id, "item grants a buff missing from the catalog");
            dangling += 1;
        }
    }
    for race in catalog.races() {
        for buff_id in race.buff_ids.iter().filter(|id| !known(**id)) {
            warn!(race = %race.id, %buff_id, "race grants a buff missing from the catalog");
            dangling += 1;
        }
    }
    dangling
}
