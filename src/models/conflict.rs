//! Double-booking conflicts.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{SessionId, SlotId};

/// Severity applied to every double-booking. The scale is 0..=100;
/// double-bookings always report at the high end.
pub const DOUBLE_BOOKING_SEVERITY: i32 = 90;

/// Which resource is double-booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictKind {
    /// One teacher holds two or more sessions in the same slot.
    TeacherDoubleBooked,
    /// One class receives two or more sessions in the same slot.
    ClassDoubleBooked,
}

/// One detected double-booking: a slot, the shared resource, and every
/// session involved in scan order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    /// Conflict category.
    pub kind: ConflictKind,
    /// Slot where the collision happens.
    pub slot: SlotId,
    /// Id of the shared teacher or class.
    pub entity_id: String,
    /// Involved sessions, ordered as encountered in the session list.
    pub sessions: Vec<SessionId>,
    /// Severity on a 0..=100 scale.
    pub severity: i32,
}

impl Conflict {
    /// Creates a teacher double-booking conflict.
    pub fn teacher_double_booked(
        slot: SlotId,
        teacher_id: impl Into<String>,
        sessions: Vec<SessionId>,
    ) -> Self {
        Self {
            kind: ConflictKind::TeacherDoubleBooked,
            slot,
            entity_id: teacher_id.into(),
            sessions,
            severity: DOUBLE_BOOKING_SEVERITY,
        }
    }

    /// Creates a class double-booking conflict.
    pub fn class_double_booked(
        slot: SlotId,
        class_id: impl Into<String>,
        sessions: Vec<SessionId>,
    ) -> Self {
        Self {
            kind: ConflictKind::ClassDoubleBooked,
            slot,
            entity_id: class_id.into(),
            sessions,
            severity: DOUBLE_BOOKING_SEVERITY,
        }
    }

    /// Number of sessions involved.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            ConflictKind::TeacherDoubleBooked => "teacher",
            ConflictKind::ClassDoubleBooked => "class",
        };
        write!(
            f,
            "{} {} double-booked at {} (",
            what, self.entity_id, self.slot
        )?;
        for (i, session) in self.sessions.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{session}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Day;

    #[test]
    fn test_factories_set_high_severity() {
        let slot = SlotId::new(Day::Sunday, 1);
        let teacher = Conflict::teacher_double_booked(slot, "t1", vec![SessionId(1), SessionId(2)]);
        let class = Conflict::class_double_booked(slot, "c1", vec![SessionId(1), SessionId(3)]);

        assert_eq!(teacher.kind, ConflictKind::TeacherDoubleBooked);
        assert_eq!(teacher.severity, DOUBLE_BOOKING_SEVERITY);
        assert_eq!(class.kind, ConflictKind::ClassDoubleBooked);
        assert_eq!(class.severity, DOUBLE_BOOKING_SEVERITY);
        assert_eq!(teacher.session_count(), 2);
    }

    #[test]
    fn test_display() {
        let conflict = Conflict::teacher_double_booked(
            SlotId::new(Day::Monday, 2),
            "t9",
            vec![SessionId(4), SessionId(8)],
        );
        assert_eq!(
            conflict.to_string(),
            "teacher t9 double-booked at Mon P2 (S4, S8)"
        );
    }
}
