//! Interactive transfer types and the move log.
//!
//! A transfer reassigns one session to a (teacher, day, period)
//! target. The engine checks the target first; collisions come back as
//! [`TransferOutcome::NeedsOverride`] without touching the timetable,
//! and the host re-submits with the override flag set once the user
//! confirms. Committed moves append a [`TransferRecord`] to the
//! process-lifetime [`TransferLog`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Conflict, Day, Session, SessionId, SlotId};

/// One requested session move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    /// Session to move.
    pub session: SessionId,
    /// Teacher the session should belong to after the move.
    pub teacher_id: String,
    /// Target day.
    pub day: Day,
    /// Target period, 1-based.
    pub period: u8,
    /// Commit even if the target slot collides.
    pub override_conflicts: bool,
}

impl TransferRequest {
    /// Creates a request without the override flag.
    pub fn new(session: SessionId, teacher_id: impl Into<String>, day: Day, period: u8) -> Self {
        Self {
            session,
            teacher_id: teacher_id.into(),
            day,
            period,
            override_conflicts: false,
        }
    }

    /// Sets the override flag.
    pub fn with_override(mut self) -> Self {
        self.override_conflicts = true;
        self
    }
}

/// What a transfer request led to.
#[derive(Debug, Clone)]
pub enum TransferOutcome {
    /// The move was committed and logged.
    Moved(TransferRecord),
    /// The target collides and the request did not carry the override
    /// flag; nothing was changed. The conflicts describe what already
    /// stands at the target.
    NeedsOverride(Vec<Conflict>),
}

impl TransferOutcome {
    /// Whether the move was committed.
    pub fn is_moved(&self) -> bool {
        matches!(self, TransferOutcome::Moved(_))
    }
}

/// One committed move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    /// Position in the log, starting at 1.
    pub seq: u64,
    /// Human-readable description of the move.
    pub description: String,
    /// How many conflicts the user overrode to commit this move.
    pub conflicts_overridden: usize,
    /// When the move was committed.
    pub at: DateTime<Utc>,
}

/// Append-only record of committed moves. Survives undo: a reverted
/// edit keeps its log entries, matching what the user actually did.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransferLog {
    entries: Vec<TransferRecord>,
    next_seq: u64,
}

impl TransferLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry and returns it.
    pub(crate) fn record(&mut self, description: String, conflicts_overridden: usize) -> &TransferRecord {
        self.next_seq += 1;
        self.entries.push(TransferRecord {
            seq: self.next_seq,
            description,
            conflicts_overridden,
            at: Utc::now(),
        });
        // Just pushed, so the list cannot be empty
        &self.entries[self.entries.len() - 1]
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[TransferRecord] {
        &self.entries
    }

    /// The most recent entry.
    pub fn last(&self) -> Option<&TransferRecord> {
        self.entries.last()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds the log line for a move, from the session's pre-move state.
pub(crate) fn describe_move(session: &Session, target_teacher: &str, target: SlotId) -> String {
    let what = match (&session.class_id, &session.subject_id) {
        (Some(class), Some(subject)) => format!("{subject} for {class}"),
        _ => "standby".to_string(),
    };
    format!(
        "{} ({what}): {} {} -> {} {}",
        session.id, session.teacher_id, session.slot, target_teacher, target
    )
}
