//! Timetable load statistics.
//!
//! Aggregates a session list into the counts host views render:
//! totals by kind, per-teacher load, and per-day load. Computed from
//! scratch on each call; the timetable stays the single source of
//! truth.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{Day, Timetable, DAY_COUNT};

/// Session counts for one teacher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherLoad {
    /// Regular teaching sessions.
    pub basic: usize,
    /// Standby cover sessions.
    pub standby: usize,
}

impl TeacherLoad {
    /// Total sessions of either kind.
    pub fn total(&self) -> usize {
        self.basic + self.standby
    }
}

/// Aggregated view of one timetable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableStats {
    /// Total regular teaching sessions.
    pub basic_total: usize,
    /// Total standby cover sessions.
    pub standby_total: usize,
    /// Load per teacher id.
    pub per_teacher: HashMap<String, TeacherLoad>,
    /// Sessions per day, indexed by [`Day::index`].
    pub per_day: [usize; DAY_COUNT],
}

impl TimetableStats {
    /// Computes statistics for a timetable.
    pub fn calculate(timetable: &Timetable) -> Self {
        let mut stats = Self::default();
        for session in timetable.sessions() {
            let load = stats.per_teacher.entry(session.teacher_id.clone()).or_default();
            if session.is_basic() {
                load.basic += 1;
                stats.basic_total += 1;
            } else {
                load.standby += 1;
                stats.standby_total += 1;
            }
            stats.per_day[session.slot.day.index()] += 1;
        }
        stats
    }

    /// Total sessions of either kind.
    pub fn session_total(&self) -> usize {
        self.basic_total + self.standby_total
    }

    /// The day carrying the most sessions, if any are scheduled.
    /// Earlier days win ties.
    pub fn busiest_day(&self) -> Option<Day> {
        if self.session_total() == 0 {
            return None;
        }
        let mut best = Day::Sunday;
        for day in Day::ALL {
            if self.per_day[day.index()] > self.per_day[best.index()] {
                best = day;
            }
        }
        Some(best)
    }
}
