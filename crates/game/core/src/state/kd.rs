use std::collections::BTreeMap;

use crate::state::MobId;

/// Kill and death tallies.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KdStats {
    pub total_kills: u32,
    pub kills: BTreeMap<MobId, u32>,
    /// Keyed by lowercase race name.
    pub race_kills: BTreeMap<String, u32>,
    /// Keyed by lowercase zone name.
    pub zone_kills: BTreeMap<String, u32>,
    pub total_deaths: u32,
}

impl KdStats {
    /// Records one kill of `mob` (a `race`) in `zone`.
    pub fn add_kill(&mut self, mob: MobId, race: &str, zone: &str) {
        self.total_kills += 1;
        *self.kills.entry(mob).or_default() += 1;
        *self.race_kills.entry(race.to_lowercase()).or_default() += 1;
        *self.zone_kills.entry(zone.to_lowercase()).or_default() += 1;
    }

    pub fn add_death(&mut self) {
        self.total_deaths += 1;
    }

    /// Kills of the listed mobs, or all kills when the list is empty.
    pub fn mob_kills(&self, mobs: &[MobId]) -> u32 {
        if mobs.is_empty() {
            return self.total_kills;
        }
        mobs.iter().filter_map(|mob| self.kills.get(mob)).sum()
    }

    pub fn race_kills(&self, race: &str) -> u32 {
        self.race_kills.get(&race.to_lowercase()).copied().unwrap_or(0)
    }

    pub fn zone_kills(&self, zone: &str) -> u32 {
        self.zone_kills.get(&zone.to_lowercase()).copied().unwrap_or(0)
    }

    /// Kills per death; plain kill count before the first death.
    pub fn kd_ratio(&self) -> f64 {
        if self.total_deaths == 0 {
            return f64::from(self.total_kills);
        }
        f64::from(self.total_kills) / f64::from(self.total_deaths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tallies_by_mob_race_and_zone() {
        let mut kd = KdStats::default();
        kd.add_kill(MobId(1), "Rat", "Sewers");
        kd.add_kill(MobId(1), "rat", "sewers");
        kd.add_kill(MobId(2), "Goblin", "Sewers");

        assert_eq!(kd.mob_kills(&[]), 3);
        assert_eq!(kd.mob_kills(&[MobId(1)]), 2);
        assert_eq!(kd.race_kills("RAT"), 2);
        assert_eq!(kd.zone_kills("sewers"), 3);
        assert_eq!(kd.kd_ratio(), 3.0);

        kd.add_death();
        kd.add_death();
        assert_eq!(kd.kd_ratio(), 1.5);
    }
}
