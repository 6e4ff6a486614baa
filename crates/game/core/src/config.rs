/// Engine configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Global multiplier applied to every experience-to-level threshold.
    pub xp_scale: f64,

    /// Seed mixed into lock sequences so every world has its own combinations.
    pub seed: String,

    /// Zone assigned to characters that have none.
    pub starting_zone: String,

    /// Name assigned to characters that have none.
    pub default_name: String,

    /// Description assigned to characters that have none.
    pub default_description: String,
}

impl EngineConfig {
    // ===== compile-time constants =====
    pub const ALIGNMENT_MIN: i8 = -100;
    pub const ALIGNMENT_MAX: i8 = 100;
    /// Current health may sit this far below zero before death is final.
    pub const HEALTH_FLOOR: i32 = -10;
    pub const HEALTH_MAX_FLOOR: i32 = 1;
    pub const MANA_MAX_FLOOR: i32 = 0;
    pub const ACTION_POINTS_BASE: i32 = 200;
    pub const ACTION_POINTS_MAX_FLOOR: i32 = 50;
    pub const MAX_SKILL_LEVEL: u8 = 4;
    pub const MAX_HANDS: u8 = 2;
    pub const ROOM_MEMORY_BASE: usize = 5;
    pub const DEFENSE_CAP: i32 = 100;
    /// Weighting attached to spawn and racial buffs during worn-buff reconciliation.
    pub const PERMANENT_BUFF_WEIGHT: i32 = 100;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_XP_SCALE: f64 = 1.0;
    pub const DEFAULT_ZONE: &'static str = "Nowhere";
    pub const DEFAULT_NAME: &'static str = "Nameless";
    pub const DEFAULT_DESCRIPTION: &'static str = "They seem thoroughly uninteresting.";
    pub const DEFAULT_STARTING_HEALTH: i32 = 10;
    pub const DEFAULT_STARTING_MANA: i32 = 10;
    pub const DEFAULT_STARTING_GOLD: i32 = 25;
    pub const DEFAULT_STARTING_BANK: i32 = 100;

    pub fn new() -> Self {
        Self {
            xp_scale: Self::DEFAULT_XP_SCALE,
            seed: String::new(),
            starting_zone: Self::DEFAULT_ZONE.to_string(),
            default_name: Self::DEFAULT_NAME.to_string(),
            default_description: Self::DEFAULT_DESCRIPTION.to_string(),
        }
    }

    pub fn with_xp_scale(mut self, xp_scale: f64) -> Self {
        self.xp_scale = xp_scale;
        self
    }

    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = seed.into();
        self
    }

    /// XP scale actually applied; non-positive or non-finite values fall back to 1.0.
    pub fn effective_xp_scale(&self) -> f64 {
        if self.xp_scale.is_finite() && self.xp_scale > 0.0 {
            self.xp_scale
        } else {
            Self::DEFAULT_XP_SCALE
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_xp_scale_falls_back_to_default() {
        assert_eq!(EngineConfig::new().with_xp_scale(0.0).effective_xp_scale(), 1.0);
        assert_eq!(EngineConfig::new().with_xp_scale(-2.5).effective_xp_scale(), 1.0);
        assert_eq!(EngineConfig::new().with_xp_scale(f64::NAN).effective_xp_scale(), 1.0);
        assert_eq!(EngineConfig::new().with_xp_scale(1.5).effective_xp_scale(), 1.5);
    }
}
