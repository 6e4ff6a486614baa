use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::env::{ItemId, ItemOracle, ItemSpec};

static NEXT_ITEM_UID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of one item instance.
///
/// Two swords from the same blueprint share an [`ItemId`] but never an
/// `ItemUid`; equipment and inventory operations match on this.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemUid(pub u64);

impl ItemUid {
    /// Allocates a fresh uid.
    pub fn next() -> Self {
        Self(NEXT_ITEM_UID.fetch_add(1, Ordering::Relaxed))
    }

    /// Makes sure uids restored from saved data are never handed out again.
    pub fn reserve(self) {
        NEXT_ITEM_UID.fetch_max(self.0.saturating_add(1), Ordering::Relaxed);
    }
}

impl fmt::Display for ItemUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One concrete item carried or worn by a character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    pub uid: ItemUid,
    pub uses: i32,
    /// A remove-curse effect has lifted this instance's curse.
    pub uncursed: bool,
}

impl Item {
    /// New instance of `id` with no uses.
    pub fn new(id: ItemId) -> Self {
        Self {
            id,
            uid: ItemUid::next(),
            uses: 0,
            uncursed: false,
        }
    }

    /// New instance of `id` starting with the blueprint's uses.
    pub fn from_spec(spec: &ItemSpec) -> Self {
        Self {
            uses: spec.uses,
            ..Self::new(spec.id)
        }
    }

    pub fn spec<'a>(&self, items: &'a dyn ItemOracle) -> Option<&'a ItemSpec> {
        items.item(self.id)
    }

    /// Same physical item, not merely the same blueprint.
    pub fn same_instance(&self, other: &Item) -> bool {
        self.uid == other.uid
    }

    /// Cursed unless a remove-curse effect lifted it.
    pub fn is_cursed(&self, items: &dyn ItemOracle) -> bool {
        !self.uncursed && self.spec(items).is_some_and(|spec| spec.cursed)
    }

    pub fn name<'a>(&self, items: &'a dyn ItemOracle) -> &'a str {
        self.spec(items).map_or("", |spec| spec.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instances_of_one_blueprint_are_distinct() {
        let a = Item::new(ItemId(5));
        let b = Item::new(ItemId(5));
        assert_ne!(a.uid, b.uid);
        assert!(a.same_instance(&a.clone()));
        assert!(!a.same_instance(&b));
    }

    #[test]
    fn reserve_skips_restored_uids() {
        let restored = ItemUid(u64::from(u32::MAX) + 10);
        restored.reserve();
        assert!(ItemUid::next() > restored);
    }
}
