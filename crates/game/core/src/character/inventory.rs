//! Backpack operations.

use crate::env::{Env, ItemId, ItemKind, ItemOracle};
use crate::state::{Item, ItemUid};

use super::Character;

impl Character {
    pub fn backpack_items(&self) -> &[Item] {
        &self.items
    }

    /// Puts an item in the backpack. Items without a catalog id are refused.
    pub fn store_item(&mut self, item: Item) -> bool {
        if item.id.is_none() {
            return false;
        }
        item.uid.reserve();
        self.items.push(item);
        true
    }

    /// Removes this exact instance. Returns false when it is not carried.
    pub fn remove_item(&mut self, item: &Item) -> bool {
        match self.items.iter().rposition(|carried| carried.same_instance(item)) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Replaces a carried instance with an updated copy.
    ///
    /// An item whose last use was just spent is destroyed instead.
    pub fn update_item(&mut self, original: &Item, replacement: Item) -> bool {
        let Some(index) = self
            .items
            .iter()
            .rposition(|carried| carried.same_instance(original))
        else {
            return false;
        };
        if original.uses >= 1 && replacement.uses < 1 {
            self.items.remove(index);
        } else {
            self.items[index] = replacement;
        }
        true
    }

    /// Spends one use of a carried item, destroying it when none remain.
    ///
    /// Returns the uses left, 0 when the item is gone or not carried.
    pub fn use_item(&mut self, item: &Item) -> i32 {
        let Some(index) = self
            .items
            .iter()
            .rposition(|carried| carried.same_instance(item))
        else {
            return 0;
        };
        let uses_left = (self.items[index].uses - 1).max(0);
        if uses_left == 0 {
            self.items.remove(index);
        } else {
            self.items[index].uses = uses_left;
        }
        uses_left
    }

    pub fn find_in_backpack(&self, name: &str, env: &Env<'_>) -> Option<&Item> {
        find_by_name(name, self.items.iter(), env.items())
    }

    /// A carried key that opens `lock_id`.
    pub fn find_key_in_backpack(&self, lock_id: &str, env: &Env<'_>) -> Option<&Item> {
        self.items.iter().find(|item| {
            item.spec(env.items()).is_some_and(|spec| {
                spec.kind == ItemKind::Key
                    && spec
                        .key_lock_id
                        .as_deref()
                        .is_some_and(|key_lock| key_lock.eq_ignore_ascii_case(lock_id))
            })
        })
    }
}

/// Resolves a player-typed item reference.
///
/// `!<id>` selects by catalog id and `!<id>:<uid>` by instance. Otherwise an
/// exact (case-insensitive) name match wins over the first partial one.
pub(crate) fn find_by_name<'i>(
    name: &str,
    mut candidates: impl Iterator<Item = &'i Item>,
    items: &dyn ItemOracle,
) -> Option<&'i Item> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    if let Some(selector) = name.strip_prefix('!') {
        let (id, uid) = match selector.split_once(':') {
            Some((id, uid)) => (id, uid.parse().ok().map(ItemUid)),
            None => (selector, None),
        };
        let id = id.parse().ok().map(ItemId);
        return candidates.find(|item| match uid {
            Some(uid) => item.uid == uid,
            None => Some(item.id) == id,
        });
    }

    let wanted = name.to_lowercase();
    let mut partial = None;
    for item in candidates {
        let item_name = item.name(items).to_lowercase();
        if item_name == wanted {
            return Some(item);
        }
        if partial.is_none() && item_name.contains(&wanted) {
            partial = Some(item);
        }
    }
    partial
}
