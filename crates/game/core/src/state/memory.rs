use std::collections::VecDeque;

use crate::state::RoomId;

/// Recently visited rooms, oldest first.
///
/// Capacity is supplied per call because it grows with the character's
/// mapping skill. The buffer retains up to twice the capacity before
/// trimming so a temporary capacity drop does not erase history.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoomMemory {
    history: VecDeque<RoomId>,
}

impl RoomMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a visit, forgetting the oldest rooms when full.
    pub fn remember(&mut self, room: RoomId, capacity: usize) {
        let capacity = capacity.max(1);
        if self.history.len() >= capacity * 2 {
            let keep = capacity - 1;
            let drop = self.history.len() - keep;
            self.history.drain(..drop);
        }
        self.history.push_back(room);
    }

    /// The most recent `capacity` rooms, oldest first.
    pub fn recall(&self, capacity: usize) -> Vec<RoomId> {
        let skip = self.history.len().saturating_sub(capacity);
        self.history.iter().skip(skip).copied().collect()
    }

    pub fn replace(&mut self, rooms: impl IntoIterator<Item = RoomId>) {
        self.history = rooms.into_iter().collect();
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
