//! Two-phase timetable optimization.
//!
//! # Algorithm
//!
//! **Phase 1, spread.** For each teacher in roster order, take their
//! basic sessions in list order and deal them across the week:
//! `per_day = ceil(count / 5)` sessions per day, periods counted up
//! from 1. Session `i` lands on day `i / per_day`, period
//! `(i % per_day) + 1`. This evens the weekly load per teacher but
//! ignores what other teachers and classes are doing, so it may create
//! collisions.
//!
//! **Phase 2, repair.** Detect all double-bookings, then for each
//! conflict keep the first involved session where it is and move every
//! other one to the first slot, in slot-table order, that is free for
//! both its teacher and its class. Freeness is checked against the live
//! session list, so earlier repairs constrain later ones. A session
//! with no such slot stays put and is counted unresolved.
//!
//! The returned conflict list is the phase-2 input, i.e. the state
//! after spreading and before repair. The pass does not re-scan after
//! repair; callers wanting a post-repair view run
//! [`detector::find_conflicts`] again.

use crate::detector;
use crate::models::{
    Conflict, Day, SessionId, SlotGrid, SlotId, Teacher, Timetable, DAY_COUNT, PERIODS_PER_DAY,
};

/// Outcome of one optimization pass.
#[derive(Debug, Clone)]
pub struct OptimizeReport {
    /// Double-bookings found after spreading, before repair.
    pub conflicts: Vec<Conflict>,
    /// Sessions the repair phase moved to a free slot.
    pub relocated: usize,
    /// Sessions the repair phase could not place.
    pub unresolved: usize,
}

impl OptimizeReport {
    /// Number of conflicts the repair phase worked on.
    pub fn detected(&self) -> usize {
        self.conflicts.len()
    }

    /// Whether spreading produced a collision-free week outright.
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// Runs both phases over the timetable in place.
///
/// `teachers` supplies the iteration order for the spread phase;
/// sessions of teachers absent from the list keep their slots.
pub fn optimize(timetable: &mut Timetable, grid: &SlotGrid, teachers: &[Teacher]) -> OptimizeReport {
    spread(timetable, teachers);
    let conflicts = detector::find_conflicts(timetable);
    let (relocated, unresolved) = repair(timetable, grid, &conflicts);
    log::info!(
        "optimize: {} conflict(s) after spreading, {} relocated, {} unresolved",
        conflicts.len(),
        relocated,
        unresolved
    );
    OptimizeReport {
        conflicts,
        relocated,
        unresolved,
    }
}

fn spread(timetable: &mut Timetable, teachers: &[Teacher]) {
    for teacher in teachers {
        let ids: Vec<SessionId> = timetable
            .sessions()
            .iter()
            .filter(|s| s.is_basic() && s.teacher_id == teacher.id)
            .map(|s| s.id)
            .collect();
        if ids.is_empty() {
            continue;
        }
        let per_day = ids.len().div_ceil(DAY_COUNT);
        for (position, id) in ids.iter().enumerate() {
            let day = Day::ALL[position / per_day];
            // Loads beyond grid capacity pile into the last period; the
            // repair phase reports what it cannot relocate.
            let offset = position % per_day;
            let period = offset.min(PERIODS_PER_DAY as usize - 1) as u8 + 1;
            if let Some(session) = timetable.session_mut(*id) {
                session.slot = SlotId::new(day, period);
            }
        }
    }
}

fn repair(timetable: &mut Timetable, grid: &SlotGrid, conflicts: &[Conflict]) -> (usize, usize) {
    let mut relocated = 0;
    let mut unresolved = 0;
    for conflict in conflicts {
        for &session_id in conflict.sessions.iter().skip(1) {
            let Some(session) = timetable.session(session_id) else {
                continue;
            };
            let teacher_id = session.teacher_id.clone();
            let class_id = session.class_id.clone();

            let target = grid.slots().iter().map(|s| s.id).find(|&slot| {
                !timetable.teacher_occupied_at(&teacher_id, slot)
                    && class_id
                        .as_deref()
                        .map_or(true, |class| !timetable.class_occupied_at(class, slot))
            });

            match target {
                Some(slot) => {
                    if let Some(session) = timetable.session_mut(session_id) {
                        session.slot = slot;
                        relocated += 1;
                        log::debug!("relocated {session_id} to {slot}");
                    }
                }
                None => unresolved += 1,
            }
        }
    }
    (relocated, unresolved)
}
