//! Race catalog loader.

use std::path::Path;

use mud_core::RaceDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_ron};

/// Race catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceCatalog {
    pub races: Vec<RaceDefinition>,
}

/// Loader for race definitions from RON files.
pub struct RaceLoader;

impl RaceLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<RaceDefinition>> {
        let catalog: RaceCatalog = read_ron(path, "race catalog")?;
        Ok(catalog.races)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mud_core::{Attribute, RaceId, RaceSize, Slot, SlotSet};
    use tempfile::TempDir;

    #[test]
    fn test_load_races() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("races.ron");
        std::fs::write(
            &path,
            r#"(
                races: [
                    (
                        id: 1,
                        name: "ogre",
                        size: large,
                        tnl_scale: 1.4,
                        base_stats: (strength: 8, vitality: 7),
                        damage: (attacks: 1, dice_count: 1, side_count: 8, bonus: 2),
                    ),
                    (id: 2, name: "serpent", disabled_slots: "GLOVES | FEET"),
                ],
            )"#,
        )
        .unwrap();

        let races = RaceLoader::load(&path).unwrap();
        assert_eq!(races.len(), 2);

        let ogre = &races[0];
        assert_eq!(ogre.id, RaceId(1));
        assert_eq!(ogre.size, RaceSize::Large);
        assert_eq!(ogre.base_stats.get(Attribute::Strength), 8);
        assert_eq!(ogre.base_stats.get(Attribute::Speed), 0);
        assert_eq!(ogre.damage.to_string(), "1d8+2");

        let serpent = &races[1];
        assert!(serpent.disabled_slots.contains_slot(Slot::Feet));
        assert!(!serpent.disabled_slots.contains_slot(Slot::Ring));
        assert_eq!(serpent.effective_tnl_scale(), RaceDefinition::DEFAULT_TNL_SCALE);
    }

    #[test]
    fn test_disabled_slots_round_trip_as_text() {
        let serpent = RaceDefinition::new(RaceId(2), "serpent")
            .with_disabled_slots(SlotSet::from_iter([Slot::Gloves, Slot::Feet]));
        let catalog = RaceCatalog {
            races: vec![serpent],
        };

        let text = ron::to_string(&catalog).unwrap();
        assert!(text.contains(r#""GLOVES | FEET""#));

        let reloaded: RaceCatalog = ron::from_str(&text).unwrap();
        assert_eq!(reloaded.races[0].disabled_slots, catalog.races[0].disabled_slots);
    }
}
