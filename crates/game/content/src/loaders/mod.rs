//! Content loaders for reading game data from files.
//!
//! Catalog files are RON, engine configuration is TOML. Every loader returns
//! plain `mud-core` types; [`ContentFactory`] assembles them into a
//! [`mud_core::CatalogSnapshot`].

pub mod buffs;
pub mod config;
pub mod factory;
pub mod item;
pub mod quests;
pub mod races;

pub use buffs::BuffLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use item::ItemLoader;
pub use quests::QuestLoader;
pub use races::RaceLoader;

use std::path::Path;

use serde::de::DeserializeOwned;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Reads and parses a RON file, naming `what` in parse errors.
pub(crate) fn read_ron<T: DeserializeOwned>(path: &Path, what: &str) -> LoadResult<T> {
    let content = read_file(path)?;
    ron::from_str(&content).map_err(|e| {
        anyhow::anyhow!("Failed to parse {} RON ({}): {}", what, path.display(), e)
    })
}
