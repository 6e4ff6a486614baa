//! Quest catalog loader.

use std::path::Path;

use mud_core::QuestDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_ron};

/// Quest catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestCatalog {
    pub quests: Vec<QuestDefinition>,
}

/// Loader for quest definitions from RON files.
///
/// Step lists are checked when the quests are inserted into a catalog, not
/// here.
pub struct QuestLoader;

impl QuestLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<QuestDefinition>> {
        let catalog: QuestCatalog = read_ron(path, "quest catalog")?;
        Ok(catalog.quests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mud_core::QuestId;
    use tempfile::TempDir;

    #[test]
    fn test_load_quests() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("quests.ron");
        std::fs::write(
            &path,
            r#"(
                quests: [
                    (id: 1, name: "lost ring", steps: ["start", "found", "end"]),
                    (id: 2, name: "hidden door", secret: true, steps: ["end"]),
                ],
            )"#,
        )
        .unwrap();

        let quests = QuestLoader::load(&path).unwrap();
        assert_eq!(quests[0].id, QuestId(1));
        assert_eq!(quests[0].position("found"), Some(1));
        assert!(quests[1].secret);
        assert!(quests[1].is_single_step());
    }
}
