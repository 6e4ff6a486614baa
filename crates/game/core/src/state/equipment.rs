//! Equipment slots worn by a character.
//!
//! Every character has the same ten slots. A slot is empty, holds exactly one
//! item, or is disabled because the character's race cannot use it. Disabled
//! is distinct from empty: nothing may be placed into a disabled slot.

use bitflags::bitflags;

use crate::env::{ItemKind, ItemOracle};
use crate::state::Item;

/// Named equipment slot.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Slot {
    Weapon,
    Offhand,
    Head,
    Neck,
    Body,
    Belt,
    Gloves,
    Ring,
    Legs,
    Feet,
}

impl Slot {
    /// All slots in storage order.
    pub const ALL: [Slot; 10] = [
        Slot::Weapon,
        Slot::Offhand,
        Slot::Head,
        Slot::Neck,
        Slot::Body,
        Slot::Belt,
        Slot::Gloves,
        Slot::Ring,
        Slot::Legs,
        Slot::Feet,
    ];

    pub const COUNT: usize = Self::ALL.len();

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Slot an item of `kind` is worn in. Holdables share the offhand.
    pub const fn for_kind(kind: ItemKind) -> Option<Slot> {
        match kind {
            ItemKind::Weapon => Some(Slot::Weapon),
            ItemKind::Offhand | ItemKind::Holdable => Some(Slot::Offhand),
            ItemKind::Head => Some(Slot::Head),
            ItemKind::Neck => Some(Slot::Neck),
            ItemKind::Body => Some(Slot::Body),
            ItemKind::Belt => Some(Slot::Belt),
            ItemKind::Gloves => Some(Slot::Gloves),
            ItemKind::Ring => Some(Slot::Ring),
            ItemKind::Legs => Some(Slot::Legs),
            ItemKind::Feet => Some(Slot::Feet),
            _ => None,
        }
    }

    pub const fn flag(self) -> SlotSet {
        SlotSet::from_bits_retain(1 << self as u16)
    }
}

bitflags! {
    /// Set of slots, used by races to declare the slots they cannot use.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct SlotSet: u16 {
        const WEAPON  = 1 << 0;
        const OFFHAND = 1 << 1;
        const HEAD    = 1 << 2;
        const NECK    = 1 << 3;
        const BODY    = 1 << 4;
        const BELT    = 1 << 5;
        const GLOVES  = 1 << 6;
        const RING    = 1 << 7;
        const LEGS    = 1 << 8;
        const FEET    = 1 << 9;
    }
}

impl SlotSet {
    pub fn contains_slot(self, slot: Slot) -> bool {
        self.contains(slot.flag())
    }

    pub fn slots(self) -> impl Iterator<Item = Slot> {
        Slot::ALL.into_iter().filter(move |slot| self.contains_slot(*slot))
    }
}

impl FromIterator<Slot> for SlotSet {
    fn from_iter<T: IntoIterator<Item = Slot>>(iter: T) -> Self {
        iter.into_iter()
            .fold(SlotSet::empty(), |set, slot| set | slot.flag())
    }
}

/// Contents of one slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SlotState {
    #[default]
    Empty,
    /// The character's race cannot use this slot.
    Disabled,
    Worn(Item),
}

impl SlotState {
    pub fn item(&self) -> Option<&Item> {
        match self {
            Self::Worn(item) => Some(item),
            Self::Empty | Self::Disabled => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }
}

/// The ten equipment slots of a character, indexed by [`Slot`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    slots: [SlotState; Slot::COUNT],
}

impl Equipment {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: Slot) -> &SlotState {
        &self.slots[slot.index()]
    }

    pub fn item(&self, slot: Slot) -> Option<&Item> {
        self.get(slot).item()
    }

    pub fn is_disabled(&self, slot: Slot) -> bool {
        self.get(slot).is_disabled()
    }

    pub fn is_empty(&self, slot: Slot) -> bool {
        self.get(slot).is_empty()
    }

    /// Puts `item` into `slot`, returning the previous occupant.
    ///
    /// Callers check [`Self::is_disabled`] first; placing into a disabled
    /// slot overrides the disable.
    pub fn place(&mut self, slot: Slot, item: Item) -> Option<Item> {
        match std::mem::replace(&mut self.slots[slot.index()], SlotState::Worn(item)) {
            SlotState::Worn(previous) => Some(previous),
            SlotState::Empty | SlotState::Disabled => None,
        }
    }

    /// Empties `slot`, returning what it held. Disabled slots stay disabled.
    pub fn take(&mut self, slot: Slot) -> Option<Item> {
        let state = &mut self.slots[slot.index()];
        if state.is_disabled() {
            return None;
        }
        match std::mem::take(state) {
            SlotState::Worn(item) => Some(item),
            SlotState::Empty | SlotState::Disabled => None,
        }
    }

    /// Disables `slot`, returning the item it held.
    pub fn disable(&mut self, slot: Slot) -> Option<Item> {
        match std::mem::replace(&mut self.slots[slot.index()], SlotState::Disabled) {
            SlotState::Worn(item) => Some(item),
            SlotState::Empty | SlotState::Disabled => None,
        }
    }

    /// Turns every disabled slot back into an empty one.
    pub fn enable_all(&mut self) {
        for state in &mut self.slots {
            if state.is_disabled() {
                *state = SlotState::Empty;
            }
        }
    }

    /// Slot holding this exact item instance.
    pub fn find_instance(&self, item: &Item) -> Option<Slot> {
        self.worn()
            .find(|(_, worn)| worn.same_instance(item))
            .map(|(slot, _)| slot)
    }

    /// Worn items with their slots, in slot order.
    pub fn worn(&self) -> impl Iterator<Item = (Slot, &Item)> {
        Slot::ALL
            .into_iter()
            .zip(self.slots.iter())
            .filter_map(|(slot, state)| state.item().map(|item| (slot, item)))
    }

    pub fn worn_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.slots.iter_mut().filter_map(|state| match state {
            SlotState::Worn(item) => Some(item),
            SlotState::Empty | SlotState::Disabled => None,
        })
    }

    /// Sum of the named modifier across all worn items.
    pub fn stat_mod(&self, name: &str, items: &dyn ItemOracle) -> i32 {
        self.worn()
            .filter_map(|(_, item)| item.spec(items))
            .map(|spec| spec.stat_mods.get(name))
            .sum()
    }

    /// Extra attack rounds imposed by the weapon and offhand.
    pub fn wait_rounds(&self, items: &dyn ItemOracle) -> u32 {
        [Slot::Weapon, Slot::Offhand]
            .into_iter()
            .filter_map(|slot| self.item(slot))
            .filter_map(|item| item.spec(items))
            .map(|spec| spec.wait_rounds)
            .sum()
    }
}
