//! Experience thresholds and scaling.

/// Experience needed to advance past `level`.
///
/// `(1000 + 750 * level^2) * tnl_scale * xp_scale`, truncated. Strictly
/// increasing in `level` for positive scales.
pub fn xp_to_level(level: i32, tnl_scale: f64, xp_scale: f64) -> i64 {
    let level = i64::from(level.max(0));
    let raw = 1000 + 750 * level * level;
    (raw as f64 * tnl_scale * xp_scale) as i64
}

/// Position within the current level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct XpProgress {
    /// Experience earned since reaching the current level.
    pub into_level: i64,
    /// Experience the current level spans.
    pub span: i64,
}

impl XpProgress {
    pub fn at(level: i32, experience: i64, tnl_scale: f64, xp_scale: f64) -> Self {
        let floor = if level <= 1 {
            0
        } else {
            xp_to_level(level - 1, tnl_scale, xp_scale)
        };
        let ceiling = xp_to_level(level, tnl_scale, xp_scale);
        Self {
            into_level: experience - floor,
            span: ceiling - floor,
        }
    }
}

/// Baseline experience scale, in percent.
pub const XP_SCALE_BASELINE: i32 = 100;

/// Applies a percentage bonus to an experience award.
///
/// Scales below 100% are treated as 100%: modifiers can boost experience
/// gains but never reduce them.
pub fn scale_xp(xp: i64, scale_percent: i32) -> i64 {
    if scale_percent <= XP_SCALE_BASELINE {
        return xp;
    }
    (xp as f64 * f64::from(scale_percent) / f64::from(XP_SCALE_BASELINE)) as i64
}
