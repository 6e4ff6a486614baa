//! Level scaling for layered statistics.

use crate::stats::StatInfo;

/// Turns a statistic's inputs into its effective value at a level.
///
/// Implementations must be monotonically non-decreasing in `training`,
/// `mods` and `level` (for a fixed non-negative base) and must not depend on
/// anything but their arguments, so that validation stays idempotent.
pub trait LevelScaling: Send + Sync {
    fn value(&self, stat: &StatInfo, level: i32) -> i32;
}

/// Default blend: one third of the base per level beyond the first, half a
/// point per level, plus training and modifiers.
///
/// Levels below 1 count as level 1 and negative bases count as zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StandardScaling;

impl StandardScaling {
    /// Level-driven portion of the value.
    pub const fn gains(base: i32, level: i32) -> i32 {
        let level = if level < 1 { 1 } else { level };
        let base = if base < 0 { 0 } else { base };
        (level - 1) * base / 3 + level / 2
    }
}

impl LevelScaling for StandardScaling {
    fn value(&self, stat: &StatInfo, level: i32) -> i32 {
        Self::gains(stat.base, level) + stat.training + stat.mods
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gains_at_reference_points() {
        assert_eq!(StandardScaling::gains(1, 1), 0);
        assert_eq!(StandardScaling::gains(5, 10), 20);
        assert_eq!(StandardScaling::gains(1, 10), 8);
        assert_eq!(StandardScaling::gains(10, 0), 0);
        assert_eq!(StandardScaling::gains(-4, 7), 3);
    }

    #[test]
    fn value_is_monotone_in_every_input() {
        let scaling = StandardScaling;
        for base in 0..12 {
            for level in 1..30 {
                let stat = StatInfo { base, training: 2, mods: -1, value: 0 };
                let v = scaling.value(&stat, level);

                assert!(scaling.value(&stat, level + 1) >= v);
                assert!(scaling.value(&StatInfo { base: base + 1, ..stat }, level) >= v);
                assert!(scaling.value(&StatInfo { training: 3, ..stat }, level) >= v);
                assert!(scaling.value(&StatInfo { mods: 0, ..stat }, level) >= v);
            }
        }
    }
}
