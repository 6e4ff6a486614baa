//! Data-driven content definitions and loaders.
//!
//! This crate provides loaders for the RON/TOML data files a world is built
//! from:
//! - Item, race, buff and quest catalogs (RON)
//! - Engine configuration (TOML)
//!
//! Content is read once at startup, assembled into a
//! [`mud_core::CatalogSnapshot`] and consulted through its oracles. It never
//! appears in saved character state; characters refer to it by id.
//!
//! Sample data ships under `data/`.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    BuffLoader, ConfigLoader, ContentFactory, ItemLoader, LoadResult, QuestLoader, RaceLoader,
};
