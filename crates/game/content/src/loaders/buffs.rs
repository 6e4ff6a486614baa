//! Buff catalog loader.

use std::path::Path;

use mud_core::BuffSpec;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_ron};

/// Buff catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuffCatalog {
    pub buffs: Vec<BuffSpec>,
}

/// Loader for buff specs from RON files.
pub struct BuffLoader;

impl BuffLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<BuffSpec>> {
        let catalog: BuffCatalog = read_ron(path, "buff catalog")?;
        Ok(catalog.buffs)
    }
}
