use std::fmt;

use crate::env::{BuffId, DamageDice};
use crate::state::SlotSet;
use crate::stats::BaseAttributes;

/// Read-only access to race definitions.
pub trait RaceOracle: Send + Sync {
    fn race(&self, id: RaceId) -> Option<&RaceDefinition>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RaceId(pub u32);

impl fmt::Display for RaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "race#{}", self.0)
    }
}

/// Body size class. Affects how many hands a weapon needs.
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
pub enum RaceSize {
    /// Mouse or dog sized. Weapons need one extra hand.
    Small,
    #[default]
    Medium,
    /// Troll sized and up. Any weapon fits in one hand.
    Large,
}

/// Race blueprint as published by the catalog.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RaceDefinition {
    pub id: RaceId,
    pub name: String,
    pub size: RaceSize,
    /// Multiplier on experience-to-level thresholds.
    pub tnl_scale: f64,
    pub base_stats: BaseAttributes,
    /// Slots members of this race can never use.
    pub disabled_slots: SlotSet,
    /// Buffs members of this race always carry.
    pub buff_ids: Vec<BuffId>,
    /// Unarmed damage.
    pub damage: DamageDice,
    pub unarmed_name: String,
    pub knows_first_aid: bool,
    pub default_alignment: i8,
}

impl RaceDefinition {
    pub const DEFAULT_TNL_SCALE: f64 = 1.0;

    pub fn new(id: RaceId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_size(mut self, size: RaceSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_base_stats(mut self, base_stats: BaseAttributes) -> Self {
        self.base_stats = base_stats;
        self
    }

    pub fn with_disabled_slots(mut self, slots: SlotSet) -> Self {
        self.disabled_slots = slots;
        self
    }

    pub fn with_buff(mut self, buff_id: BuffId) -> Self {
        self.buff_ids.push(buff_id);
        self
    }

    pub fn with_tnl_scale(mut self, tnl_scale: f64) -> Self {
        self.tnl_scale = tnl_scale;
        self
    }

    /// TNL scale actually applied; non-positive values fall back to 1.0.
    pub fn effective_tnl_scale(&self) -> f64 {
        if self.tnl_scale.is_finite() && self.tnl_scale > 0.0 {
            self.tnl_scale
        } else {
            Self::DEFAULT_TNL_SCALE
        }
    }
}

impl Default for RaceDefinition {
    fn default() -> Self {
        Self {
            id: RaceId::default(),
            name: String::new(),
            size: RaceSize::default(),
            tnl_scale: Self::DEFAULT_TNL_SCALE,
            base_stats: BaseAttributes::default(),
            disabled_slots: SlotSet::empty(),
            buff_ids: Vec::new(),
            damage: DamageDice::new(1, 1, 2, 0),
            unarmed_name: "fists".to_string(),
            knows_first_aid: false,
            default_alignment: 0,
        }
    }
}
