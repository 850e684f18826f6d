//! Standby cover distribution.
//!
//! After the basic timetable is locked, each teacher receives up to
//! `min(standby_quota, MAX_STANDBY_PER_TEACHER)` standby sessions.
//! Placement draws slots through the placement policy and accepts any
//! slot that is not meeting-blocked and holds no basic session of the
//! same teacher. An existing standby session does not make a slot
//! unavailable, so two standby duties of one teacher may share a slot;
//! detection reports that as a teacher double-booking if it happens.
//!
//! The pass is additive: existing sessions are never touched, only new
//! standby sessions appended.

use crate::models::{BlockedSlots, Session, SlotGrid, Teacher, Timetable};
use crate::placement::{draw_teacher_free_slot, SlotPicker};

/// Ceiling on standby sessions per teacher per week.
pub const MAX_STANDBY_PER_TEACHER: u32 = 6;

/// One standby unit that distribution could not place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnplacedStandby {
    /// Teacher the unit was destined for.
    pub teacher_id: String,
}

/// Outcome of one distribution run.
#[derive(Debug, Clone, Default)]
pub struct DistributionReport {
    /// Standby sessions successfully appended.
    pub placed: usize,
    /// Units that found no acceptable slot within the draw bound.
    pub unplaced: Vec<UnplacedStandby>,
}

impl DistributionReport {
    /// Whether every requested unit was placed.
    pub fn fully_placed(&self) -> bool {
        self.unplaced.is_empty()
    }
}

/// Appends standby sessions for every teacher with a standby quota.
pub fn distribute(
    timetable: &mut Timetable,
    teachers: &[Teacher],
    grid: &SlotGrid,
    blocked: &BlockedSlots,
    picker: &mut dyn SlotPicker,
) -> DistributionReport {
    let mut report = DistributionReport::default();

    for teacher in teachers {
        let units = teacher.standby_quota.min(MAX_STANDBY_PER_TEACHER);
        for _ in 0..units {
            match draw_teacher_free_slot(grid, timetable, blocked, &teacher.id, picker) {
                Some(slot) => {
                    let id = timetable.allocate_id();
                    timetable.add_session(Session::standby(id, &teacher.id, slot));
                    report.placed += 1;
                }
                None => {
                    report.unplaced.push(UnplacedStandby {
                        teacher_id: teacher.id.clone(),
                    });
                }
            }
        }
    }

    log::info!(
        "distributed {} standby session(s), {} unplaced",
        report.placed,
        report.unplaced.len()
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Day, SlotId};
    use crate::placement::{RandomPicker, SequentialPicker};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn slot(day: Day, period: u8) -> SlotId {
        SlotId::new(day, period)
    }

    fn timetable_with_basics(teacher: &str, slots: &[SlotId]) -> Timetable {
        let mut timetable = Timetable::new();
        for &at in slots {
            let id = timetable.allocate_id();
            timetable.add_session(Session::basic(id, teacher, "c1", "math", at));
        }
        timetable
    }

    #[test]
    fn test_distribution_is_additive() {
        let mut timetable = timetable_with_basics("t1", &[slot(Day::Sunday, 1)]);
        let before: Vec<_> = timetable.sessions().to_vec();

        let grid = SlotGrid::new();
        let teachers = vec![Teacher::new("t1").with_standby_quota(2)];
        let mut picker = SequentialPicker::new();
        let report = distribute(&mut timetable, &teachers, &grid, &BlockedSlots::new(), &mut picker);

        assert_eq!(report.placed, 2);
        assert_eq!(timetable.session_count(), 3);
        // The original sessions are untouched
        assert_eq!(&timetable.sessions()[..1], &before[..]);
        assert_eq!(timetable.standby_sessions().len(), 2);
    }

    #[test]
    fn test_quota_capped_at_maximum() {
        let mut timetable = Timetable::new();
        let grid = SlotGrid::new();
        let teachers = vec![Teacher::new("t1").with_standby_quota(9)];
        let mut picker = SequentialPicker::new();

        let report = distribute(&mut timetable, &teachers, &grid, &BlockedSlots::new(), &mut picker);
        assert_eq!(report.placed, MAX_STANDBY_PER_TEACHER as usize);
    }

    #[test]
    fn test_standby_avoids_basics_and_meeting_blocks() {
        let grid = SlotGrid::new();
        let basic_slots = [slot(Day::Sunday, 1), slot(Day::Monday, 2), slot(Day::Tuesday, 3)];
        let blocked_slot = slot(Day::Wednesday, 4);

        for seed in 0..20 {
            let mut timetable = timetable_with_basics("t1", &basic_slots);
            let blocked = BlockedSlots::new().with_blocked("t1", blocked_slot);
            let teachers = vec![Teacher::new("t1").with_standby_quota(6)];
            let mut picker = RandomPicker::new(SmallRng::seed_from_u64(seed));

            distribute(&mut timetable, &teachers, &grid, &blocked, &mut picker);

            for session in timetable.standby_sessions() {
                assert!(!basic_slots.contains(&session.slot), "seed {seed} hit a basic slot");
                assert_ne!(session.slot, blocked_slot, "seed {seed} hit a blocked slot");
            }
        }
    }

    #[test]
    fn test_fully_booked_teacher_gets_no_standby() {
        let grid = SlotGrid::new();
        let all_slots: Vec<SlotId> = grid.slots().iter().map(|s| s.id).collect();
        let mut timetable = timetable_with_basics("t1", &all_slots);

        let teachers = vec![Teacher::new("t1").with_standby_quota(3)];
        let mut picker = SequentialPicker::new();
        let report = distribute(&mut timetable, &teachers, &grid, &BlockedSlots::new(), &mut picker);

        assert_eq!(report.placed, 0);
        assert_eq!(report.unplaced.len(), 3);
        assert!(report.unplaced.iter().all(|u| u.teacher_id == "t1"));
        assert!(!report.fully_placed());
    }

    #[test]
    fn test_teachers_processed_in_roster_order() {
        let mut timetable = Timetable::new();
        let grid = SlotGrid::new();
        let teachers = vec![
            Teacher::new("t1").with_standby_quota(1),
            Teacher::new("t2").with_standby_quota(1),
        ];
        let mut picker = SequentialPicker::new();

        distribute(&mut timetable, &teachers, &grid, &BlockedSlots::new(), &mut picker);

        let order: Vec<&str> = timetable
            .sessions()
            .iter()
            .map(|s| s.teacher_id.as_str())
            .collect();
        assert_eq!(order, vec!["t1", "t2"]);
    }
}
