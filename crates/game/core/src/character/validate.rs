//! The recalculation pipeline.
//!
//! [`Character::validate`] runs [`ValidationStage::PIPELINE`] in order. Each
//! stage reads only inputs that earlier stages have settled, so running the
//! pipeline twice yields the same character. When equipment or buffs change
//! part-way through (items forced out of disabled slots, worn buffs
//! reconciled) the [`ValidationStage::RECALCULATION`] stages run once more.

use tracing::debug;

use crate::config::EngineConfig;
use crate::env::Env;
use crate::state::Item;
use crate::stats::{
    Attribute, ResourceKind, action_points_max_mods, health_max_mods, keys, mana_max_mods,
};

use super::Character;

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum ValidationStage {
    /// Name, description, zone, level and experience get usable values.
    FillDefaults,
    /// Attribute bases and TNL scale come from the race.
    RaceBase,
    /// Attribute modifiers are summed from gear and buffs.
    Modifiers,
    /// Attribute values are derived through the level scaling formula.
    Attributes,
    /// Health, mana and action point maxima are derived.
    ResourceMaximums,
    /// Maxima get their floors; current health and mana are capped.
    ClampResources,
    PruneCooldowns,
    ClampAlignment,
    /// Slots the race cannot use are disabled, evicting their items.
    EnforceDisabledSlots,
    /// Buffs granted by worn items are added or removed to match the gear.
    ReconcileWornBuffs,
}

impl ValidationStage {
    pub const PIPELINE: [ValidationStage; 10] = [
        ValidationStage::FillDefaults,
        ValidationStage::RaceBase,
        ValidationStage::Modifiers,
        ValidationStage::Attributes,
        ValidationStage::ResourceMaximums,
        ValidationStage::ClampResources,
        ValidationStage::PruneCooldowns,
        ValidationStage::ClampAlignment,
        ValidationStage::EnforceDisabledSlots,
        ValidationStage::ReconcileWornBuffs,
    ];

    /// Stages deriving values from gear and buffs.
    pub const RECALCULATION: [ValidationStage; 4] = [
        ValidationStage::Modifiers,
        ValidationStage::Attributes,
        ValidationStage::ResourceMaximums,
        ValidationStage::ClampResources,
    ];
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Reconcile worn-item buffs even when no item was displaced.
    pub reconcile_worn_buffs: bool,
}

impl ValidateOptions {
    pub const fn reconcile() -> Self {
        Self {
            reconcile_worn_buffs: true,
        }
    }
}

/// What a validation pass changed beyond derived values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Items taken out of newly disabled slots. They are already back in the
    /// backpack.
    pub displaced: Vec<Item>,
    /// The buff ledger changed during reconciliation.
    pub buffs_changed: bool,
}

impl Character {
    /// Brings every derived field back in line with its inputs.
    pub fn validate(&mut self, env: &Env<'_>, options: ValidateOptions) -> ValidationReport {
        let mut report = ValidationReport::default();

        for stage in ValidationStage::PIPELINE {
            if stage == ValidationStage::ReconcileWornBuffs
                && !options.reconcile_worn_buffs
                && report.displaced.is_empty()
            {
                continue;
            }
            self.stage(stage, env, &mut report);
        }

        if !report.displaced.is_empty() || report.buffs_changed {
            debug!(
                character = %self.name,
                displaced = report.displaced.len(),
                buffs_changed = report.buffs_changed,
                "recalculating after equipment change"
            );
            for stage in ValidationStage::RECALCULATION {
                self.stage(stage, env, &mut report);
            }
        }

        report
    }

    /// Runs a single stage on its own.
    pub fn run_stage(&mut self, stage: ValidationStage, env: &Env<'_>) -> ValidationReport {
        let mut report = ValidationReport::default();
        self.stage(stage, env, &mut report);
        report
    }

    fn stage(&mut self, stage: ValidationStage, env: &Env<'_>, report: &mut ValidationReport) {
        match stage {
            ValidationStage::FillDefaults => self.fill_defaults(env.config()),
            ValidationStage::RaceBase => {
                if let Some(race) = env.races().race(self.race_id) {
                    self.stats.apply_bases(&race.base_stats);
                    self.tnl_scale = race.effective_tnl_scale();
                }
            }
            ValidationStage::Modifiers => {
                for attribute in Attribute::ALL {
                    let mods = self.stat_mod(attribute.mod_key(), env);
                    self.stats.get_mut(attribute).mods = mods;
                }
            }
            ValidationStage::Attributes => {
                self.stats.recalculate(self.level, env.scaling());
            }
            ValidationStage::ResourceMaximums => {
                self.health_max.mods = health_max_mods(
                    self.level,
                    self.stat(Attribute::Vitality),
                    self.stat_mod(keys::HEALTH_MAX, env),
                );
                self.mana_max.mods = mana_max_mods(
                    self.level,
                    self.stat(Attribute::Mysticism),
                    self.stat_mod(keys::MANA_MAX, env),
                );
                self.action_points_max.mods = action_points_max_mods();

                let scaling = env.scaling();
                self.health_max.recalculate(self.level, scaling);
                self.mana_max.recalculate(self.level, scaling);
                self.action_points_max.recalculate(self.level, scaling);
            }
            ValidationStage::ClampResources => self.clamp_resources(),
            ValidationStage::PruneCooldowns => self.cooldowns.prune(),
            ValidationStage::ClampAlignment => self.alignment = self.alignment.clamped(),
            ValidationStage::EnforceDisabledSlots => {
                let displaced = self.enforce_disabled_slots(env);
                report.displaced.extend(displaced);
            }
            ValidationStage::ReconcileWornBuffs => {
                // displaced items already left their slots, so nothing is subtracted
                report.buffs_changed |= self.reconcile_worn_buffs(&[], env);
            }
        }
    }

    fn fill_defaults(&mut self, config: &EngineConfig) {
        if self.description.is_empty() {
            self.description = config.default_description.clone();
        }
        if self.zone.is_empty() {
            self.zone = config.starting_zone.clone();
        }
        if self.name.is_empty() {
            self.name = config.default_name.clone();
        }
        self.level = self.level.max(1);
        self.experience = self.experience.max(1);

        // restored items must never collide with freshly minted ones
        for item in self.items.iter().chain(self.equipment.worn().map(|(_, item)| item)) {
            item.uid.reserve();
        }
    }

    fn clamp_resources(&mut self) {
        self.health_max.value = ResourceKind::Health.clamp_maximum(self.health_max.value);
        self.mana_max.value = ResourceKind::Mana.clamp_maximum(self.mana_max.value);
        self.action_points_max.value =
            ResourceKind::ActionPoints.clamp_maximum(self.action_points_max.value);

        self.health = ResourceKind::Health.clamp_current(self.health, self.health_max.value);
        self.mana = ResourceKind::Mana.clamp_current(self.mana, self.mana_max.value);
    }

    fn enforce_disabled_slots(&mut self, env: &Env<'_>) -> Vec<Item> {
        let Some(race) = env.races().race(self.race_id) else {
            return Vec::new();
        };

        self.equipment.enable_all();
        let mut displaced = Vec::new();
        for slot in race.disabled_slots.slots() {
            if let Some(item) = self.equipment.disable(slot) {
                debug!(
                    character = %self.name,
                    %slot,
                    uid = %item.uid,
                    "item found in disabled slot, moved to backpack"
                );
                displaced.push(item);
            }
        }
        for item in &displaced {
            self.store_item(item.clone());
        }
        displaced
    }
}
