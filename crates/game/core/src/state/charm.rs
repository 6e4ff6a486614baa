use crate::state::UserId;

/// A mob under a player's control.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharmInfo {
    pub user_id: UserId,
    /// Rounds until the charm breaks; `None` lasts until removed.
    pub rounds_remaining: Option<u32>,
    /// Command the mob runs when the charm expires.
    pub expire_command: String,
}

impl CharmInfo {
    pub fn new(user_id: UserId, rounds: Option<u32>, expire_command: impl Into<String>) -> Self {
        Self {
            user_id,
            rounds_remaining: rounds,
            expire_command: expire_command.into(),
        }
    }

    /// Counts down one round. Returns true when the charm just ran out.
    pub fn tick(&mut self) -> bool {
        match &mut self.rounds_remaining {
            Some(rounds) => {
                *rounds = rounds.saturating_sub(1);
                *rounds == 0
            }
            None => false,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.rounds_remaining == Some(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timed_charm_expires() {
        let mut charm = CharmInfo::new(UserId(1), Some(2), "emote shakes its head");
        assert!(!charm.tick());
        assert!(charm.tick());
        assert!(charm.is_expired());

        let mut permanent = CharmInfo::new(UserId(1), None, "");
        assert!(!permanent.tick());
        assert!(!permanent.is_expired());
    }
}
