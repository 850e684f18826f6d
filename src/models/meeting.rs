//! Recurring meeting blocks.

use serde::{Deserialize, Serialize};

use super::{Day, SlotId, PERIODS_PER_DAY};

/// A recurring weekly meeting that blocks one grid slot for its
/// participants.
///
/// Participants are teacher ids. Teachers outside the participant list
/// keep the slot available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingBlock {
    /// Grid slot the meeting occupies every week.
    pub slot: SlotId,
    /// Teacher ids attending the meeting.
    pub participants: Vec<String>,
}

impl MeetingBlock {
    /// Creates a meeting at the given slot with no participants.
    pub fn new(slot: SlotId) -> Self {
        Self {
            slot,
            participants: Vec::new(),
        }
    }

    /// Adds one participant.
    pub fn with_participant(mut self, teacher_id: impl Into<String>) -> Self {
        self.participants.push(teacher_id.into());
        self
    }

    /// Builds a meeting from 0-based wire indices, the shape external
    /// settings documents use. Returns `None` when either index is out
    /// of range.
    pub fn from_indices(day_index: usize, period_index: u8, participants: Vec<String>) -> Option<Self> {
        let day = Day::from_index(day_index)?;
        if period_index >= PERIODS_PER_DAY {
            return None;
        }
        Some(Self {
            slot: SlotId::new(day, period_index + 1),
            participants,
        })
    }

    /// Whether the given teacher attends this meeting.
    pub fn involves(&self, teacher_id: &str) -> bool {
        self.participants.iter().any(|id| id == teacher_id)
    }
}
