//! Basic-session generation.
//!
//! Builds a fresh timetable for the roster in one deterministic sweep
//! with randomized placement inside it.
//!
//! # Algorithm
//!
//! For every (class, subject) pairing, in roster order:
//!
//! 1. Cap the unit count at `min(weekly_hours, MAX_WEEKLY_SESSIONS)`.
//! 2. Pick the first teacher in roster order whose subject set contains
//!    the subject's name. No teacher → every unit of the pairing is
//!    reported unplaced.
//! 3. For each unit, draw a slot through the placement policy, skipping
//!    meeting-blocked slots and slots where the teacher already stands.
//!    Draws are bounded by the grid size; exhaustion reports the unit
//!    unplaced and moves on.
//!
//! Placement failures are recorded, never raised: a timetable with a
//! few holes is still a usable timetable.

use crate::models::{BlockedSlots, Session, SlotGrid, Timetable};
use crate::placement::{draw_teacher_free_slot, SlotPicker};
use crate::settings::Roster;

/// Ceiling on sessions per (class, subject) pairing per week.
pub const MAX_WEEKLY_SESSIONS: u32 = 5;

/// Why one session unit could not be placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnplacedReason {
    /// No teacher in the roster teaches the subject.
    NoCapableTeacher,
    /// The bounded slot draw found no free slot for the teacher.
    NoFreeSlot {
        /// Teacher the unit was destined for.
        teacher_id: String,
    },
}

/// One session unit that generation could not place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnplacedUnit {
    /// Class the unit belongs to.
    pub class_id: String,
    /// Subject the unit belongs to.
    pub subject_id: String,
    /// Why placement failed.
    pub reason: UnplacedReason,
}

/// Outcome of one generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Sessions successfully placed.
    pub placed: usize,
    /// Units that could not be placed, in attempt order.
    pub unplaced: Vec<UnplacedUnit>,
    /// Non-fatal notices, e.g. a skipped automatic snapshot.
    pub warnings: Vec<String>,
}

impl GenerationReport {
    /// Whether every requested unit was placed.
    pub fn fully_placed(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// Total units the run attempted.
    pub fn attempted(&self) -> usize {
        self.placed + self.unplaced.len()
    }
}

/// Generates a fresh set of basic sessions for the roster.
///
/// The returned timetable replaces whatever the caller held before;
/// generation never merges into an existing session list.
pub fn generate(
    roster: &Roster,
    grid: &SlotGrid,
    blocked: &BlockedSlots,
    picker: &mut dyn SlotPicker,
) -> (Timetable, GenerationReport) {
    let mut timetable = Timetable::new();
    let mut report = GenerationReport::default();

    for class in &roster.classes {
        for subject in &roster.subjects {
            let units = subject.weekly_hours.min(MAX_WEEKLY_SESSIONS);
            let teacher = roster.teachers.iter().find(|t| t.teaches(&subject.name));

            let Some(teacher) = teacher else {
                log::debug!("no teacher for subject '{}', skipping {} unit(s)", subject.name, units);
                for _ in 0..units {
                    report.unplaced.push(UnplacedUnit {
                        class_id: class.id.clone(),
                        subject_id: subject.id.clone(),
                        reason: UnplacedReason::NoCapableTeacher,
                    });
                }
                continue;
            };

            for _ in 0..units {
                match draw_teacher_free_slot(grid, &timetable, blocked, &teacher.id, picker) {
                    Some(slot) => {
                        let id = timetable.allocate_id();
                        timetable.add_session(Session::basic(
                            id,
                            &teacher.id,
                            &class.id,
                            &subject.id,
                            slot,
                        ));
                        report.placed += 1;
                    }
                    None => {
                        report.unplaced.push(UnplacedUnit {
                            class_id: class.id.clone(),
                            subject_id: subject.id.clone(),
                            reason: UnplacedReason::NoFreeSlot {
                                teacher_id: teacher.id.clone(),
                            },
                        });
                    }
                }
            }
        }
    }

    log::info!(
        "generated {} session(s), {} unplaced",
        report.placed,
        report.unplaced.len()
    );
    (timetable, report)
}
