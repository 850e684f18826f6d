//! The timetable aggregate.
//!
//! A [`Timetable`] owns the flat session list plus the id allocator
//! that numbers new sessions. Every engine operation reads or mutates
//! this one value; snapshots and the edit backup clone it whole, so
//! restoring a clone restores identity allocation too.

use serde::{Deserialize, Serialize};

use super::{Session, SessionId, SlotId};

/// A weekly timetable: the session list and its id allocator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetable {
    sessions: Vec<Session>,
    next_id: u64,
}

impl Timetable {
    /// Creates an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out the next session id. Ids are never reused within one
    /// timetable value.
    pub fn allocate_id(&mut self) -> SessionId {
        self.next_id += 1;
        SessionId(self.next_id)
    }

    /// Appends a session.
    pub fn add_session(&mut self, session: Session) {
        self.sessions.push(session);
    }

    /// All sessions in insertion order.
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Number of sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the timetable holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Looks up a session by id.
    pub fn session(&self, id: SessionId) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Looks up a session by id for mutation.
    pub fn session_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        self.sessions.iter_mut().find(|s| s.id == id)
    }

    /// Every session occupying the given slot.
    pub fn sessions_at(&self, slot: SlotId) -> Vec<&Session> {
        self.sessions.iter().filter(|s| s.slot == slot).collect()
    }

    /// Every session assigned to the given teacher.
    pub fn sessions_for_teacher(&self, teacher_id: &str) -> Vec<&Session> {
        self.sessions
            .iter()
            .filter(|s| s.teacher_id == teacher_id)
            .collect()
    }

    /// Every session received by the given class.
    pub fn sessions_for_class(&self, class_id: &str) -> Vec<&Session> {
        self.sessions
            .iter()
            .filter(|s| s.class_id.as_deref() == Some(class_id))
            .collect()
    }

    /// All regular teaching sessions.
    pub fn basic_sessions(&self) -> Vec<&Session> {
        self.sessions.iter().filter(|s| s.is_basic()).collect()
    }

    /// All standby cover sessions.
    pub fn standby_sessions(&self) -> Vec<&Session> {
        self.sessions.iter().filter(|s| s.is_standby()).collect()
    }

    /// Whether the teacher holds any session (of either kind) at the slot.
    pub fn teacher_occupied_at(&self, teacher_id: &str, slot: SlotId) -> bool {
        self.sessions
            .iter()
            .any(|s| s.teacher_id == teacher_id && s.slot == slot)
    }

    /// Whether the teacher holds a basic session at the slot. Standby
    /// placement uses this check: an existing standby does not make a
    /// slot unavailable.
    pub fn teacher_basic_at(&self, teacher_id: &str, slot: SlotId) -> bool {
        self.sessions
            .iter()
            .any(|s| s.is_basic() && s.teacher_id == teacher_id && s.slot == slot)
    }

    /// Whether the class receives any session at the slot.
    pub fn class_occupied_at(&self, class_id: &str, slot: SlotId) -> bool {
        self.sessions
            .iter()
            .any(|s| s.class_id.as_deref() == Some(class_id) && s.slot == slot)
    }
}
