//! Resource pools: health, mana and action points.
//!
//! Each pool has a stored current value and a derived maximum. The maximum
//! is a [`StatInfo`] whose `mods` come from the formulas below and whose
//! `value` goes through the same level scaling as the attributes.
//!
//! Formulas for the maximum's modifier input:
//! - health = 5 + healthmax modifiers + level + vitality x 4
//! - mana = 4 + manamax modifiers + level + mysticism x 3
//! - action points = 200

use crate::config::EngineConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceKind {
    Health,
    Mana,
    ActionPoints,
}

impl ResourceKind {
    /// Lowest value the maximum may take.
    pub const fn maximum_floor(self) -> i32 {
        match self {
            Self::Health => EngineConfig::HEALTH_MAX_FLOOR,
            Self::Mana => EngineConfig::MANA_MAX_FLOOR,
            Self::ActionPoints => EngineConfig::ACTION_POINTS_MAX_FLOOR,
        }
    }

    /// Lowest value the current amount may take.
    pub const fn current_floor(self) -> i32 {
        match self {
            Self::Health => EngineConfig::HEALTH_FLOOR,
            Self::Mana | Self::ActionPoints => 0,
        }
    }

    /// Caps `current` at `maximum` without raising it, then applies the floor.
    pub fn clamp_current(self, current: i32, maximum: i32) -> i32 {
        current.min(maximum).max(self.current_floor())
    }

    pub fn clamp_maximum(self, maximum: i32) -> i32 {
        maximum.max(self.maximum_floor())
    }
}

pub fn health_max_mods(level: i32, vitality: i32, bonus: i32) -> i32 {
    5 + bonus + level + vitality * 4
}

pub fn mana_max_mods(level: i32, mysticism: i32, bonus: i32) -> i32 {
    4 + bonus + level + mysticism * 3
}

pub const fn action_points_max_mods() -> i32 {
    EngineConfig::ACTION_POINTS_BASE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_formula_reference_point() {
        // vitality 20 at level 10 with no modifiers
        assert_eq!(health_max_mods(10, 20, 0), 95);
        assert_eq!(mana_max_mods(10, 20, 0), 74);
        assert_eq!(action_points_max_mods(), 200);
    }

    #[test]
    fn current_is_capped_not_raised() {
        assert_eq!(ResourceKind::Health.clamp_current(50, 30), 30);
        assert_eq!(ResourceKind::Health.clamp_current(12, 30), 12);
        assert_eq!(ResourceKind::Health.clamp_current(-40, 30), -10);
        assert_eq!(ResourceKind::Mana.clamp_current(-5, 30), 0);
    }

    #[test]
    fn maxima_have_floors() {
        assert_eq!(ResourceKind::Health.clamp_maximum(-3), 1);
        assert_eq!(ResourceKind::Mana.clamp_maximum(-3), 0);
        assert_eq!(ResourceKind::ActionPoints.clamp_maximum(10), 50);
        assert_eq!(ResourceKind::ActionPoints.clamp_maximum(210), 210);
    }
}
