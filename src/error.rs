//! Engine error taxonomy.
//!
//! Hard failures only. Placement shortfalls (no capable teacher, no
//! free slot after bounded retries) are not errors: the operations
//! report them as counts and carry on, because a partially filled
//! timetable is still useful to the school.

use thiserror::Error;

use crate::engine::SnapshotId;
use crate::models::{Day, SessionId};

/// Convenience alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by [`TimetableEngine`](crate::engine::TimetableEngine)
/// operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Standby distribution was requested on an unlocked timetable.
    #[error("timetable must be locked before distributing standby cover")]
    NotLocked,

    /// A basic session move was requested while the timetable is locked.
    #[error("basic sessions cannot be moved while the timetable is locked")]
    TimetableLocked,

    /// The snapshot store already holds its maximum number of entries.
    #[error("snapshot store is full ({capacity} snapshots); delete one first")]
    StoreFull {
        /// Store capacity at the time of the rejection.
        capacity: usize,
    },

    /// A snapshot delete was attempted without the confirmation flag.
    #[error("deleting a snapshot requires confirmation")]
    ConfirmationRequired,

    /// The referenced session does not exist in the timetable.
    #[error("no session {0} in the timetable")]
    SessionNotFound(SessionId),

    /// The referenced snapshot does not exist in the store.
    #[error("no snapshot {0} in the store")]
    SnapshotNotFound(SnapshotId),

    /// A transfer target does not name a real grid slot.
    #[error("no slot at {day} period {period}")]
    InvalidSlot {
        /// Requested day.
        day: Day,
        /// Requested 1-based period.
        period: u8,
    },

    /// The optimizer aborted mid-run; the pre-run timetable was restored.
    #[error("optimizer aborted; the previous timetable was restored")]
    OptimizeFailed,
}
