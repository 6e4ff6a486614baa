use std::fmt;

use bitflags::bitflags;

use crate::stats::StatMods;

/// Read-only access to buff definitions.
pub trait BuffOracle: Send + Sync {
    fn buff(&self, id: BuffId) -> Option<&BuffSpec>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BuffId(pub u32);

impl fmt::Display for BuffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "buff#{}", self.0)
    }
}

bitflags! {
    /// Behaviors a buff enables or prevents while active.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct BuffFlags: u32 {
        // behavioral
        const NO_COMBAT        = 1 << 0;
        const NO_MOVEMENT      = 1 << 1;
        const NO_FLEE          = 1 << 2;
        const CANCEL_IF_COMBAT = 1 << 3;
        const CANCEL_ON_ACTION = 1 << 4;
        const CANCEL_ON_WATER  = 1 << 5;
        // death preventing
        const REVIVE_ON_DEATH  = 1 << 6;
        // gear
        const PERMA_GEAR       = 1 << 7;
        const REMOVE_CURSE     = 1 << 8;
        // harmful
        const POISON           = 1 << 9;
        const DRUNK            = 1 << 10;
        // useful
        const HIDDEN           = 1 << 11;
        const ACCURACY         = 1 << 12;
        const BLINK            = 1 << 13;
        const EMITS_LIGHT      = 1 << 14;
        const SUPER_HEARING    = 1 << 15;
        const NIGHT_VISION     = 1 << 16;
        const WARMED           = 1 << 17;
        const HYDRATED         = 1 << 18;
        const THIRSTY          = 1 << 19;
    }
}

/// Buff blueprint as published by the catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BuffSpec {
    pub id: BuffId,
    pub name: String,
    /// Hidden from the player's buff listing.
    pub secret: bool,
    /// Triggers every `round_interval` rounds.
    pub round_interval: u32,
    /// Triggers before the buff wears off.
    pub trigger_count: u32,
    pub stat_mods: StatMods,
    pub flags: BuffFlags,
}

impl BuffSpec {
    pub fn new(id: BuffId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            round_interval: 1,
            trigger_count: 1,
            ..Self::default()
        }
    }

    pub fn with_flags(mut self, flags: BuffFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_stat_mod(mut self, name: &str, amount: i32) -> Self {
        self.stat_mods.insert(name, amount);
        self
    }

    pub fn with_triggers(mut self, round_interval: u32, trigger_count: u32) -> Self {
        self.round_interval = round_interval;
        self.trigger_count = trigger_count;
        self
    }

    /// Interval used for trigger arithmetic; a zero interval fires every round.
    pub fn effective_round_interval(&self) -> u32 {
        self.round_interval.max(1)
    }
}
