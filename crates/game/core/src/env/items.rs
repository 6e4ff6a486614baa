use std::fmt;

use crate::env::BuffId;
use crate::stats::StatMods;

/// Read-only access to the item catalog.
pub trait ItemOracle: Send + Sync {
    fn item(&self, id: ItemId) -> Option<&ItemSpec>;
}

/// Catalog identifier of an item blueprint.
///
/// `ItemId::NONE` (0) never refers to a real item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(pub u32);

impl ItemId {
    pub const NONE: Self = Self(0);

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == Self::NONE.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Primary item category. Equippable kinds map onto equipment slots.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ItemKind {
    Weapon,
    /// Shields and similar blocking gear.
    Offhand,
    /// Torches, orbs and other things held rather than worn.
    Holdable,
    Head,
    Neck,
    Body,
    Belt,
    Gloves,
    Ring,
    Legs,
    Feet,
    Potion,
    Food,
    Drink,
    Scroll,
    Grenade,
    Junk,
    Readable,
    Key,
    #[default]
    Object,
    Gemstone,
    Lockpicks,
    Botanical,
}

/// Secondary item category: how the item is used, or for weapons how it hits.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ItemSubKind {
    Wearable,
    Drinkable,
    Edible,
    Usable,
    Throwable,
    #[default]
    Mundane,
    Generic,
    Bludgeoning,
    Cleaving,
    Stabbing,
    Slashing,
    /// Bows, crossbows and firearms. Hand count is never adjusted for size.
    Shooting,
    Claws,
    Whipping,
}

impl ItemSubKind {
    /// Sub-kinds that can be used to attack from behind.
    pub const fn can_backstab(self) -> bool {
        matches!(
            self,
            Self::Cleaving | Self::Stabbing | Self::Slashing | Self::Claws
        )
    }
}

/// Dice expression for weapon or unarmed damage: `attacks x (count)d(sides)+bonus`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DamageDice {
    pub attacks: u8,
    pub dice_count: u8,
    pub side_count: u8,
    pub bonus: i32,
}

impl DamageDice {
    pub const fn new(attacks: u8, dice_count: u8, side_count: u8, bonus: i32) -> Self {
        Self {
            attacks,
            dice_count,
            side_count,
            bonus,
        }
    }
}

impl fmt::Display for DamageDice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.attacks > 1 {
            write!(f, "{}@", self.attacks)?;
        }
        write!(f, "{}d{}", self.dice_count, self.side_count)?;
        if self.bonus > 0 {
            write!(f, "+{}", self.bonus)?;
        } else if self.bonus < 0 {
            write!(f, "{}", self.bonus)?;
        }
        Ok(())
    }
}

/// Item blueprint as published by the catalog.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ItemSpec {
    pub id: ItemId,
    pub name: String,
    pub kind: ItemKind,
    pub sub_kind: ItemSubKind,
    pub value: i32,
    /// Uses a fresh instance starts with.
    pub uses: i32,
    pub hands: u8,
    /// Extra rounds each attack with this item requires.
    pub wait_rounds: u32,
    /// Buffs applied while the item is worn and expired when it comes off.
    pub worn_buff_ids: Vec<BuffId>,
    /// Percentage of damage blocked.
    pub damage_reduction: i32,
    pub damage: DamageDice,
    pub stat_mods: StatMods,
    /// Cannot be swapped out once equipped.
    pub cursed: bool,
    /// Lock this key opens, if the item is a key.
    pub key_lock_id: Option<String>,
}

impl ItemSpec {
    pub fn new(id: ItemId, name: impl Into<String>, kind: ItemKind, sub_kind: ItemSubKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            sub_kind,
            ..Self::default()
        }
        .normalized()
    }

    pub fn with_hands(mut self, hands: u8) -> Self {
        self.hands = hands;
        self
    }

    pub fn with_wait_rounds(mut self, wait_rounds: u32) -> Self {
        self.wait_rounds = wait_rounds;
        self
    }

    pub fn with_worn_buff(mut self, buff_id: BuffId) -> Self {
        self.worn_buff_ids.push(buff_id);
        self
    }

    pub fn with_damage_reduction(mut self, damage_reduction: i32) -> Self {
        self.damage_reduction = damage_reduction;
        self
    }

    pub fn with_stat_mod(mut self, name: &str, amount: i32) -> Self {
        self.stat_mods.insert(name, amount);
        self
    }

    pub fn with_value(mut self, value: i32) -> Self {
        self.value = value;
        self
    }

    pub fn cursed(mut self) -> Self {
        self.cursed = true;
        self
    }

    pub fn with_key_lock(mut self, lock_id: impl Into<String>) -> Self {
        self.key_lock_id = Some(lock_id.into());
        self
    }

    /// Fills in values the catalog may omit: weapons wield with at least one
    /// hand and attack at least once.
    pub fn normalized(mut self) -> Self {
        if self.kind == ItemKind::Weapon {
            self.hands = self.hands.max(1);
            self.damage.attacks = self.damage.attacks.max(1);
        }
        self
    }

    /// True for anything that can go into an equipment slot.
    pub fn is_equippable(&self) -> bool {
        self.kind == ItemKind::Weapon || self.sub_kind == ItemSubKind::Wearable
    }
}
