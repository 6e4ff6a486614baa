use std::fmt;

use crate::config::EngineConfig;

/// Moral standing, always within [-100, 100] after validation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Alignment(pub i8);

impl Alignment {
    pub const MIN: Self = Self(EngineConfig::ALIGNMENT_MIN);
    pub const MAX: Self = Self(EngineConfig::ALIGNMENT_MAX);
    pub const NEUTRAL: Self = Self(0);

    pub fn clamped(self) -> Self {
        Self(self.0.clamp(Self::MIN.0, Self::MAX.0))
    }

    /// Shifts alignment by `amount`, saturating at the bounds.
    pub fn adjusted(self, amount: i32) -> Self {
        let shifted = (i32::from(self.0) + amount)
            .clamp(i32::from(Self::MIN.0), i32::from(Self::MAX.0));
        // in range after the clamp above
        Self(shifted as i8)
    }

    pub fn tier(self) -> AlignmentTier {
        AlignmentTier::of(self)
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tier())
    }
}

/// Named alignment band.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum AlignmentTier {
    Unholy,
    Evil,
    Suspicious,
    Neutral,
    Good,
    Virtuous,
    Holy,
}

impl AlignmentTier {
    /// Upper bound (inclusive) of each band below `Holy`.
    const TABLE: [(i8, AlignmentTier); 6] = [
        (-60, AlignmentTier::Unholy),
        (-40, AlignmentTier::Evil),
        (-20, AlignmentTier::Suspicious),
        (19, AlignmentTier::Neutral),
        (39, AlignmentTier::Good),
        (59, AlignmentTier::Virtuous),
    ];

    pub fn of(alignment: Alignment) -> Self {
        Self::TABLE
            .iter()
            .find(|(upper, _)| alignment.0 <= *upper)
            .map_or(AlignmentTier::Holy, |(_, tier)| *tier)
    }
}
