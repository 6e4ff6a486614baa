//! Combat targeting state.
//!
//! A character without an [`Aggro`] is idle. An active aggro records who is
//! being attacked (or which spell is being cast), how, and how many rounds
//! must pass before the attack lands.

use crate::state::{MobInstanceId, UserId};

/// Intent of an active aggro.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AggroKind {
    #[default]
    DefaultAttack,
    Shooting,
    BackStab,
    SpellCast,
    Flee,
}

/// Who an aggro is aimed at. Never both a player and a mob.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AggroTarget {
    #[default]
    None,
    User(UserId),
    Mob(MobInstanceId),
}

impl AggroTarget {
    pub fn user(self) -> Option<UserId> {
        match self {
            Self::User(id) => Some(id),
            Self::None | Self::Mob(_) => None,
        }
    }

    pub fn mob(self) -> Option<MobInstanceId> {
        match self {
            Self::Mob(id) => Some(id),
            Self::None | Self::User(_) => None,
        }
    }
}

/// Targets of a spell being cast.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellAggroInfo {
    pub spell_id: String,
    pub target_user_ids: Vec<UserId>,
    pub target_mob_instance_ids: Vec<MobInstanceId>,
}

impl SpellAggroInfo {
    pub fn new(spell_id: impl Into<String>) -> Self {
        Self {
            spell_id: spell_id.into(),
            ..Self::default()
        }
    }

    pub fn with_user(mut self, user: UserId) -> Self {
        self.target_user_ids.push(user);
        self
    }

    pub fn with_mob(mut self, mob: MobInstanceId) -> Self {
        self.target_mob_instance_ids.push(mob);
        self
    }
}

/// An active combat intent.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aggro {
    pub target: AggroTarget,
    kind: AggroKind,
    /// Rounds left before the attack or spell resolves.
    pub rounds_waiting: u32,
    /// Exit the target is reached through, for attacks into adjacent rooms.
    pub exit_name: Option<String>,
    spell: Option<SpellAggroInfo>,
}

impl Aggro {
    /// Attack intent. A `SpellCast` kind here carries no targets; use
    /// [`Aggro::cast`] to record them.
    pub fn attack(target: AggroTarget, kind: AggroKind, rounds_waiting: u32) -> Self {
        Self {
            target,
            kind,
            rounds_waiting,
            exit_name: None,
            spell: None,
        }
    }

    pub fn cast(rounds_waiting: u32, spell: SpellAggroInfo) -> Self {
        Self {
            target: AggroTarget::None,
            kind: AggroKind::SpellCast,
            rounds_waiting,
            exit_name: None,
            spell: Some(spell),
        }
    }

    pub fn kind(&self) -> AggroKind {
        self.kind
    }

    /// Spell targets, present only while casting.
    pub fn spell(&self) -> Option<&SpellAggroInfo> {
        self.spell.as_ref()
    }

    /// Turns the intent into a retreat, keeping the target.
    pub fn flee(&mut self) {
        self.kind = AggroKind::Flee;
        self.spell = None;
    }

    /// Counts down one round of waiting. Returns true once nothing is left
    /// to wait for.
    pub fn tick_wait(&mut self) -> bool {
        self.rounds_waiting = self.rounds_waiting.saturating_sub(1);
        self.rounds_waiting == 0
    }

    /// True when this aggro is aimed at the given player or mob.
    ///
    /// While casting, membership in the spell's target lists also counts.
    pub fn targets(&self, user: Option<UserId>, mob: Option<MobInstanceId>) -> bool {
        if mob.is_some() && self.target.mob() == mob {
            return true;
        }
        if user.is_some() && self.target.user() == user {
            return true;
        }
        if self.kind != AggroKind::SpellCast {
            return false;
        }
        let Some(spell) = &self.spell else {
            return false;
        };
        user.is_some_and(|id| spell.target_user_ids.contains(&id))
            || mob.is_some_and(|id| spell.target_mob_instance_ids.contains(&id))
    }
}
