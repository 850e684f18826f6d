//! Scheduled sessions.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::SlotId;

/// Identity of one scheduled session, unique within a timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

/// What kind of duty a session represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionKind {
    /// Regular teaching: a teacher, a class, and a subject.
    Basic,
    /// Substitute cover: a teacher on call, no class or subject.
    Standby,
}

/// One placement of a teacher into a grid slot.
///
/// Basic sessions carry a class and a subject; standby sessions carry
/// neither. The `locked` flag is host-UI state marking sessions pinned
/// by hand; the engine stores it but does not act on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Identity within the owning timetable.
    pub id: SessionId,
    /// Assigned teacher.
    pub teacher_id: String,
    /// Receiving class; `None` for standby sessions.
    pub class_id: Option<String>,
    /// Subject taught; `None` for standby sessions.
    pub subject_id: Option<String>,
    /// Grid slot the session occupies.
    pub slot: SlotId,
    /// Duty kind.
    pub kind: SessionKind,
    /// Pinned by hand in the host UI.
    pub locked: bool,
}

impl Session {
    /// Creates a regular teaching session.
    pub fn basic(
        id: SessionId,
        teacher_id: impl Into<String>,
        class_id: impl Into<String>,
        subject_id: impl Into<String>,
        slot: SlotId,
    ) -> Self {
        Self {
            id,
            teacher_id: teacher_id.into(),
            class_id: Some(class_id.into()),
            subject_id: Some(subject_id.into()),
            slot,
            kind: SessionKind::Basic,
            locked: false,
        }
    }

    /// Creates a standby cover session.
    pub fn standby(id: SessionId, teacher_id: impl Into<String>, slot: SlotId) -> Self {
        Self {
            id,
            teacher_id: teacher_id.into(),
            class_id: None,
            subject_id: None,
            slot,
            kind: SessionKind::Standby,
            locked: false,
        }
    }

    /// Whether this is a regular teaching session.
    pub fn is_basic(&self) -> bool {
        self.kind == SessionKind::Basic
    }

    /// Whether this is a standby cover session.
    pub fn is_standby(&self) -> bool {
        self.kind == SessionKind::Standby
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Day;

    #[test]
    fn test_basic_session() {
        let session = Session::basic(
            SessionId(1),
            "t1",
            "c1",
            "math",
            SlotId::new(Day::Sunday, 1),
        );
        assert!(session.is_basic());
        assert_eq!(session.class_id.as_deref(), Some("c1"));
        assert_eq!(session.subject_id.as_deref(), Some("math"));
        assert!(!session.locked);
    }

    #[test]
    fn test_standby_session_has_no_class() {
        let session = Session::standby(SessionId(2), "t1", SlotId::new(Day::Monday, 3));
        assert!(session.is_standby());
        assert!(session.class_id.is_none());
        assert!(session.subject_id.is_none());
    }

    #[test]
    fn test_session_id_display() {
        assert_eq!(SessionId(17).to_string(), "S17");
    }
}
