//! Character statistics: attributes, resource pools, experience and alignment.
//!
//! Everything here is pure arithmetic over plain values. The character's
//! validation pipeline decides when each formula runs.
pub mod alignment;
pub mod attributes;
pub mod experience;
pub mod formula;
pub mod modifiers;
pub mod resources;

pub use alignment::{Alignment, AlignmentTier};
pub use attributes::{Attribute, BaseAttributes, StatDelta, StatInfo, Statistics};
pub use experience::{XP_SCALE_BASELINE, XpProgress, scale_xp, xp_to_level};
pub use formula::{LevelScaling, StandardScaling};
pub use modifiers::{StatMods, keys};
pub use resources::{ResourceKind, action_points_max_mods, health_max_mods, mana_max_mods};
