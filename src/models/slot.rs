//! Week grid: days, periods, time slots, and blocked slots.
//!
//! The teaching week is a fixed grid of 5 days × 7 periods = 35 slots.
//! Slots are ordered day-major ("slot-table order"): all of Sunday's
//! periods, then Monday's, and so on. Deterministic placement (the
//! optimizer's relocation pass) always walks slots in this order.
//!
//! Meeting blocks carve per-teacher holes out of the grid: a blocked
//! slot is unavailable to the meeting's participants only, not to the
//! whole school.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use super::MeetingBlock;

/// Number of teaching days per week.
pub const DAY_COUNT: usize = 5;
/// Number of periods per teaching day.
pub const PERIODS_PER_DAY: u8 = 7;
/// Total number of slots in the weekly grid.
pub const SLOT_COUNT: usize = DAY_COUNT * PERIODS_PER_DAY as usize;
/// Minute-of-day at which period 1 starts (08:00).
pub const FIRST_PERIOD_MINUTE: u16 = 8 * 60;
/// Length of one period in minutes.
pub const PERIOD_MINUTES: u16 = 45;

/// A teaching day. The school week runs Sunday through Thursday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
}

impl Day {
    /// All teaching days in week order.
    pub const ALL: [Day; DAY_COUNT] = [
        Day::Sunday,
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
    ];

    /// Returns the day at a 0-based week index.
    pub fn from_index(index: usize) -> Option<Day> {
        Self::ALL.get(index).copied()
    }

    /// 0-based week index (Sunday = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Three-letter abbreviation ("Sun", "Mon", ...).
    pub fn short_name(self) -> &'static str {
        match self {
            Day::Sunday => "Sun",
            Day::Monday => "Mon",
            Day::Tuesday => "Tue",
            Day::Wednesday => "Wed",
            Day::Thursday => "Thu",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Day::Sunday => "Sunday",
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
        };
        f.write_str(name)
    }
}

/// Identity of one grid cell: a (day, period) pair.
///
/// Periods are 1-based (1..=7). The derived ordering is day-major then
/// period, which is exactly slot-table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotId {
    /// Teaching day.
    pub day: Day,
    /// Period within the day, 1-based.
    pub period: u8,
}

impl SlotId {
    /// Creates a slot id. Callers at external boundaries should resolve
    /// targets through [`SlotGrid::slot_at`] instead, which validates
    /// the period range.
    pub fn new(day: Day, period: u8) -> Self {
        Self { day, period }
    }

    /// Linear index in slot-table order (0..35).
    pub fn index(self) -> usize {
        self.day.index() * PERIODS_PER_DAY as usize + (self.period as usize - 1)
    }

    /// Inverse of [`SlotId::index`].
    pub fn from_index(index: usize) -> Option<SlotId> {
        if index >= SLOT_COUNT {
            return None;
        }
        let day = Day::from_index(index / PERIODS_PER_DAY as usize)?;
        let period = (index % PERIODS_PER_DAY as usize) as u8 + 1;
        Some(SlotId { day, period })
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} P{}", self.day.short_name(), self.period)
    }
}

/// One cell of the weekly grid with its time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Grid cell identity.
    pub id: SlotId,
    /// Start time, minutes since midnight.
    pub start_minute: u16,
    /// End time, minutes since midnight.
    pub end_minute: u16,
}

impl TimeSlot {
    /// Teaching day of this slot.
    pub fn day(&self) -> Day {
        self.id.day
    }

    /// 1-based period of this slot.
    pub fn period(&self) -> u8 {
        self.id.period
    }

    /// Start time formatted as "HH:MM".
    pub fn start_label(&self) -> String {
        minute_label(self.start_minute)
    }

    /// End time formatted as "HH:MM".
    pub fn end_label(&self) -> String {
        minute_label(self.end_minute)
    }
}

fn minute_label(minute: u16) -> String {
    format!("{:02}:{:02}", minute / 60, minute % 60)
}

/// The fixed weekly grid of 35 time slots.
///
/// Built once; slots are stored in slot-table order. Period 1 starts at
/// 08:00 and periods run back to back, 45 minutes each.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotGrid {
    slots: Vec<TimeSlot>,
}

impl SlotGrid {
    /// Builds the full grid.
    pub fn new() -> Self {
        let mut slots = Vec::with_capacity(SLOT_COUNT);
        for day in Day::ALL {
            for period in 1..=PERIODS_PER_DAY {
                let start = FIRST_PERIOD_MINUTE + (period as u16 - 1) * PERIOD_MINUTES;
                slots.push(TimeSlot {
                    id: SlotId::new(day, period),
                    start_minute: start,
                    end_minute: start + PERIOD_MINUTES,
                });
            }
        }
        Self { slots }
    }

    /// All slots in slot-table order.
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    /// Number of slots (always [`SLOT_COUNT`]).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the grid is empty (never, kept for API symmetry).
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Looks up a slot by day and 1-based period.
    ///
    /// Returns `None` for an out-of-range period; this is the validation
    /// point for externally supplied targets.
    pub fn slot_at(&self, day: Day, period: u8) -> Option<&TimeSlot> {
        if period < 1 || period > PERIODS_PER_DAY {
            return None;
        }
        self.slots.get(SlotId::new(day, period).index())
    }
}

impl Default for SlotGrid {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-teacher blocked slots derived from the meeting list.
///
/// A meeting blocks its slot for the meeting's participants only.
/// Pure value computed from its inputs; recompute when meetings change.
#[derive(Debug, Clone, Default)]
pub struct BlockedSlots {
    by_teacher: HashMap<String, HashSet<SlotId>>,
}

impl BlockedSlots {
    /// Creates an empty mapping (no teacher is blocked anywhere).
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the mapping from a meeting list.
    pub fn from_meetings(meetings: &[MeetingBlock]) -> Self {
        let mut by_teacher: HashMap<String, HashSet<SlotId>> = HashMap::new();
        for meeting in meetings {
            for teacher_id in &meeting.participants {
                by_teacher
                    .entry(teacher_id.clone())
                    .or_default()
                    .insert(meeting.slot);
            }
        }
        Self { by_teacher }
    }

    /// Blocks one slot for one teacher.
    pub fn with_blocked(mut self, teacher_id: impl Into<String>, slot: SlotId) -> Self {
        self.by_teacher
            .entry(teacher_id.into())
            .or_default()
            .insert(slot);
        self
    }

    /// Whether a slot is blocked for a teacher.
    pub fn is_blocked(&self, teacher_id: &str, slot: SlotId) -> bool {
        self.by_teacher
            .get(teacher_id)
            .is_some_and(|slots| slots.contains(&slot))
    }

    /// Number of blocked slots for a teacher.
    pub fn blocked_count(&self, teacher_id: &str) -> usize {
        self.by_teacher.get(teacher_id).map_or(0, HashSet::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_shape() {
        let grid = SlotGrid::new();
        assert_eq!(grid.len(), SLOT_COUNT);
        assert_eq!(grid.slots().first().map(|s| s.id), Some(SlotId::new(Day::Sunday, 1)));
        assert_eq!(
            grid.slots().last().map(|s| s.id),
            Some(SlotId::new(Day::Thursday, PERIODS_PER_DAY))
        );
    }

    #[test]
    fn test_slot_table_order() {
        let grid = SlotGrid::new();
        for (index, slot) in grid.slots().iter().enumerate() {
            assert_eq!(slot.id.index(), index);
            assert_eq!(SlotId::from_index(index), Some(slot.id));
        }
        // Derived ordering matches linear index order
        let mut sorted: Vec<SlotId> = grid.slots().iter().map(|s| s.id).collect();
        sorted.sort();
        assert_eq!(sorted, grid.slots().iter().map(|s| s.id).collect::<Vec<_>>());
    }

    #[test]
    fn test_period_times() {
        let grid = SlotGrid::new();
        let first = grid.slot_at(Day::Sunday, 1).unwrap();
        assert_eq!(first.start_label(), "08:00");
        assert_eq!(first.end_label(), "08:45");

        let third = grid.slot_at(Day::Monday, 3).unwrap();
        assert_eq!(third.start_label(), "09:30");
        assert_eq!(third.end_label(), "10:15");
    }

    #[test]
    fn test_slot_at_validates_period() {
        let grid = SlotGrid::new();
        assert!(grid.slot_at(Day::Sunday, 0).is_none());
        assert!(grid.slot_at(Day::Sunday, PERIODS_PER_DAY + 1).is_none());
        assert!(grid.slot_at(Day::Thursday, PERIODS_PER_DAY).is_some());
    }

    #[test]
    fn test_day_indexing() {
        assert_eq!(Day::from_index(0), Some(Day::Sunday));
        assert_eq!(Day::from_index(4), Some(Day::Thursday));
        assert_eq!(Day::from_index(5), None);
        assert_eq!(Day::Wednesday.index(), 3);
    }

    #[test]
    fn test_slot_id_display() {
        assert_eq!(SlotId::new(Day::Sunday, 1).to_string(), "Sun P1");
        assert_eq!(SlotId::new(Day::Thursday, 7).to_string(), "Thu P7");
    }

    #[test]
    fn test_from_index_bounds() {
        assert!(SlotId::from_index(SLOT_COUNT).is_none());
        assert_eq!(
            SlotId::from_index(SLOT_COUNT - 1),
            Some(SlotId::new(Day::Thursday, PERIODS_PER_DAY))
        );
    }

    #[test]
    fn test_blocked_slots_participants_only() {
        let meeting = MeetingBlock::new(SlotId::new(Day::Monday, 2))
            .with_participant("t1")
            .with_participant("t2");
        let blocked = BlockedSlots::from_meetings(&[meeting]);

        assert!(blocked.is_blocked("t1", SlotId::new(Day::Monday, 2)));
        assert!(blocked.is_blocked("t2", SlotId::new(Day::Monday, 2)));
        // Not a participant → not blocked
        assert!(!blocked.is_blocked("t3", SlotId::new(Day::Monday, 2)));
        // Participant, different slot → not blocked
        assert!(!blocked.is_blocked("t1", SlotId::new(Day::Monday, 3)));
    }

    #[test]
    fn test_blocked_slots_merge_across_meetings() {
        let meetings = vec![
            MeetingBlock::new(SlotId::new(Day::Sunday, 1)).with_participant("t1"),
            MeetingBlock::new(SlotId::new(Day::Tuesday, 5)).with_participant("t1"),
        ];
        let blocked = BlockedSlots::from_meetings(&meetings);
        assert_eq!(blocked.blocked_count("t1"), 2);
        assert_eq!(blocked.blocked_count("t2"), 0);
    }
}
