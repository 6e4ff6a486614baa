//! Item catalog loader.

use std::path::Path;

use mud_core::ItemSpec;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_ron};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemSpec>,
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item catalog from a RON file.
    ///
    /// Weapons are normalized (at least one hand, one attack) on load.
    pub fn load(path: &Path) -> LoadResult<Vec<ItemSpec>> {
        let catalog: ItemCatalog = read_ron(path, "item catalog")?;
        Ok(catalog.items.into_iter().map(ItemSpec::normalized).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mud_core::{BuffId, ItemId, ItemKind, ItemSubKind};
    use tempfile::TempDir;

    #[test]
    fn test_load_items() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("items.ron");
        std::fs::write(
            &path,
            r#"(
                items: [
                    (id: 1, name: "club", kind: weapon, sub_kind: bludgeoning, wait_rounds: 1),
                    (
                        id: 2,
                        name: "glowing ring",
                        kind: ring,
                        sub_kind: wearable,
                        worn_buff_ids: [4],
                        stat_mods: {"Strength": 2},
                    ),
                ],
            )"#,
        )
        .unwrap();

        let items = ItemLoader::load(&path).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, ItemId(1));
        assert_eq!(items[0].kind, ItemKind::Weapon);
        assert_eq!(items[0].hands, 1);
        assert_eq!(items[1].sub_kind, ItemSubKind::Wearable);
        assert_eq!(items[1].worn_buff_ids, vec![BuffId(4)]);
        assert_eq!(items[1].hands, 0);
        assert_eq!(items[1].stat_mods.get("strength"), 2);
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.ron");
        std::fs::write(&path, "(items: [(id: \"one\")])").unwrap();

        let err = ItemLoader::load(&path).unwrap_err().to_string();
        assert!(err.contains("item catalog"));
        assert!(err.contains("broken.ron"));
    }

    #[test]
    fn test_missing_file() {
        let err = ItemLoader::load(Path::new("/nonexistent/items.ron"))
            .unwrap_err()
            .to_string();
        assert!(err.starts_with("Failed to read file"));
    }
}
