//! Traits describing read-only world data.
//!
//! Oracles expose item, race, buff and quest definitions. The [`Env`]
//! aggregate bundles them with the engine configuration and the level
//! scaling formula so character operations can reach everything they need
//! without hard coupling to concrete catalog implementations.
mod buffs;
mod error;
mod items;
mod quests;
mod races;
mod snapshot;

pub use buffs::{BuffFlags, BuffId, BuffOracle, BuffSpec};
pub use error::OracleError;
pub use items::{DamageDice, ItemId, ItemKind, ItemOracle, ItemSpec, ItemSubKind};
pub use quests::{QuestDefinition, QuestId, QuestOracle};
pub use races::{RaceDefinition, RaceId, RaceOracle, RaceSize};
pub use snapshot::CatalogSnapshot;

use crate::config::EngineConfig;
use crate::stats::{LevelScaling, StandardScaling};

static STANDARD_SCALING: StandardScaling = StandardScaling;

/// Read-only context for every character operation.
#[derive(Clone, Copy)]
pub struct Env<'a> {
    items: &'a dyn ItemOracle,
    races: &'a dyn RaceOracle,
    buffs: &'a dyn BuffOracle,
    quests: &'a dyn QuestOracle,
    config: &'a EngineConfig,
    scaling: &'a dyn LevelScaling,
}

impl<'a> Env<'a> {
    pub fn new(
        items: &'a dyn ItemOracle,
        races: &'a dyn RaceOracle,
        buffs: &'a dyn BuffOracle,
        quests: &'a dyn QuestOracle,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            items,
            races,
            buffs,
            quests,
            config,
            scaling: &STANDARD_SCALING,
        }
    }

    /// Replaces the level scaling formula.
    pub fn with_scaling(mut self, scaling: &'a dyn LevelScaling) -> Self {
        self.scaling = scaling;
        self
    }

    pub fn items(&self) -> &'a dyn ItemOracle {
        self.items
    }

    pub fn races(&self) -> &'a dyn RaceOracle {
        self.races
    }

    pub fn buffs(&self) -> &'a dyn BuffOracle {
        self.buffs
    }

    pub fn quests(&self) -> &'a dyn QuestOracle {
        self.quests
    }

    pub fn config(&self) -> &'a EngineConfig {
        self.config
    }

    pub fn scaling(&self) -> &'a dyn LevelScaling {
        self.scaling
    }
}

impl std::fmt::Debug for Env<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Env")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
