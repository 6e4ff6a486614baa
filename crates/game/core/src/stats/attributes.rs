//! The six character attributes and their layered values.
//!
//! Each attribute keeps its inputs separately:
//! - `base`: race-provided starting point (copied from the catalog on validate)
//! - `training`: points the player spent
//! - `mods`: sum of equipment and buff modifiers
//!
//! `value` is derived from those inputs and the character level by a
//! [`LevelScaling`] formula. Only the validation pipeline writes it.

use crate::stats::LevelScaling;

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
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Attribute {
    Strength,
    Speed,
    Smarts,
    Vitality,
    Mysticism,
    Perception,
}

impl Attribute {
    pub const ALL: [Attribute; 6] = [
        Attribute::Strength,
        Attribute::Speed,
        Attribute::Smarts,
        Attribute::Vitality,
        Attribute::Mysticism,
        Attribute::Perception,
    ];

    pub const COUNT: usize = Self::ALL.len();

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Modifier key for this attribute.
    pub fn mod_key(self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Speed => "speed",
            Self::Smarts => "smarts",
            Self::Vitality => "vitality",
            Self::Mysticism => "mysticism",
            Self::Perception => "perception",
        }
    }
}

/// One layered statistic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatInfo {
    pub training: i32,
    pub value: i32,
    pub base: i32,
    pub mods: i32,
}

impl StatInfo {
    pub const fn with_base(base: i32) -> Self {
        Self {
            training: 0,
            value: 0,
            base,
            mods: 0,
        }
    }

    /// Recomputes `value` from the inputs at `level`.
    pub fn recalculate(&mut self, level: i32, scaling: &dyn LevelScaling) {
        self.value = scaling.value(self, level);
    }
}

/// Race-provided attribute bases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BaseAttributes {
    pub strength: i32,
    pub speed: i32,
    pub smarts: i32,
    pub vitality: i32,
    pub mysticism: i32,
    pub perception: i32,
}

impl BaseAttributes {
    pub const fn uniform(value: i32) -> Self {
        Self {
            strength: value,
            speed: value,
            smarts: value,
            vitality: value,
            mysticism: value,
            perception: value,
        }
    }

    pub const fn get(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Speed => self.speed,
            Attribute::Smarts => self.smarts,
            Attribute::Vitality => self.vitality,
            Attribute::Mysticism => self.mysticism,
            Attribute::Perception => self.perception,
        }
    }

    pub fn set(&mut self, attribute: Attribute, value: i32) {
        match attribute {
            Attribute::Strength => self.strength = value,
            Attribute::Speed => self.speed = value,
            Attribute::Smarts => self.smarts = value,
            Attribute::Vitality => self.vitality = value,
            Attribute::Mysticism => self.mysticism = value,
            Attribute::Perception => self.perception = value,
        }
    }

    pub fn with(mut self, attribute: Attribute, value: i32) -> Self {
        self.set(attribute, value);
        self
    }
}

impl Default for BaseAttributes {
    fn default() -> Self {
        Self::uniform(1)
    }
}

/// All six attributes of a character, indexed by [`Attribute`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Statistics {
    stats: [StatInfo; Attribute::COUNT],
}

impl Statistics {
    pub fn from_bases(bases: &BaseAttributes) -> Self {
        Self {
            stats: Attribute::ALL.map(|attribute| StatInfo::with_base(bases.get(attribute))),
        }
    }

    pub fn get(&self, attribute: Attribute) -> &StatInfo {
        &self.stats[attribute.index()]
    }

    pub fn get_mut(&mut self, attribute: Attribute) -> &mut StatInfo {
        &mut self.stats[attribute.index()]
    }

    /// Current derived value.
    pub fn value(&self, attribute: Attribute) -> i32 {
        self.get(attribute).value
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, &StatInfo)> {
        Attribute::ALL.into_iter().zip(self.stats.iter())
    }

    pub fn apply_bases(&mut self, bases: &BaseAttributes) {
        for attribute in Attribute::ALL {
            self.get_mut(attribute).base = bases.get(attribute);
        }
    }

    pub fn recalculate(&mut self, level: i32, scaling: &dyn LevelScaling) {
        for stat in &mut self.stats {
            stat.recalculate(level, scaling);
        }
    }

    /// Per-attribute change in `value` from `before` to `self`.
    pub fn delta_since(&self, before: &Statistics) -> StatDelta {
        StatDelta(Attribute::ALL.map(|attribute| {
            self.value(attribute) - before.value(attribute)
        }))
    }
}

impl Default for Statistics {
    fn default() -> Self {
        Self::from_bases(&BaseAttributes::default())
    }
}

/// Attribute value changes, e.g. the gains from a level-up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatDelta([i32; Attribute::COUNT]);

impl StatDelta {
    pub fn get(&self, attribute: Attribute) -> i32 {
        self.0[attribute.index()]
    }

    /// Attributes that changed, with their change.
    pub fn changed(&self) -> impl Iterator<Item = (Attribute, i32)> + '_ {
        Attribute::ALL
            .into_iter()
            .map(|attribute| (attribute, self.get(attribute)))
            .filter(|(_, change)| *change != 0)
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|change| *change == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StandardScaling;

    #[test]
    fn attribute_names_round_trip_through_strum() {
        assert_eq!(Attribute::Mysticism.to_string(), "mysticism");
        assert_eq!("SMARTS".parse::<Attribute>(), Ok(Attribute::Smarts));
        for attribute in Attribute::ALL {
            assert_eq!(attribute.as_ref(), attribute.mod_key());
        }
    }

    #[test]
    fn delta_reports_changed_attributes() {
        let bases = BaseAttributes::uniform(3).with(Attribute::Vitality, 6);
        let mut stats = Statistics::from_bases(&bases);
        stats.recalculate(1, &StandardScaling);
        let before = stats.clone();

        stats.recalculate(4, &StandardScaling);
        let delta = stats.delta_since(&before);

        // level 1 -> 4: (3*3)/3 + 2 - 0 = 5 for base 3, (3*6)/3 + 2 - 0 = 8 for base 6
        assert_eq!(delta.get(Attribute::Strength), 5);
        assert_eq!(delta.get(Attribute::Vitality), 8);
        assert_eq!(delta.changed().count(), 6);
        assert!(!delta.is_zero());
    }
}
