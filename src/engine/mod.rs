//! The timetable engine facade.
//!
//! [`TimetableEngine`] owns the working [`Timetable`] and every piece
//! of state the scheduling workflow needs around it: the weekly grid,
//! the lock gate, the snapshot store, the transfer log, the pending
//! edit backup, and the placement policy. Hosts drive the whole
//! workflow through this one value; the operation modules stay callable
//! on bare timetables for embedders that bring their own state.
//!
//! The engine is single-threaded: operations take `&mut self` and run
//! to completion. Wrap the engine in a mutex if a host needs to share
//! it across threads.

mod lock;
mod store;
mod transfer;

pub use lock::LockGate;
pub use store::{SnapshotId, SnapshotStore, TimetableSnapshot, MAX_SNAPSHOTS};
pub use transfer::{TransferLog, TransferOutcome, TransferRecord, TransferRequest};

use chrono::Utc;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::{Duration, Instant};

use crate::detector;
use crate::error::{EngineError, EngineResult};
use crate::generator::{self, GenerationReport};
use crate::models::{BlockedSlots, Conflict, SessionId, SlotGrid, Teacher, Timetable};
use crate::optimizer::{self, OptimizeReport};
use crate::placement::{RandomPicker, SlotPicker};
use crate::settings::Roster;
use crate::standby::{self, DistributionReport};
use crate::summary::TimetableStats;

/// How long a committed move counts as "recent" for host highlighting.
const RECENTLY_MOVED_WINDOW: Duration = Duration::from_secs(3);

/// Owns one school's working timetable and drives every operation on it.
///
/// # Example
///
/// ```
/// use timetable_engine::engine::TimetableEngine;
/// use timetable_engine::models::{ClassRoom, Subject, Teacher};
/// use timetable_engine::placement::SequentialPicker;
/// use timetable_engine::settings::Roster;
///
/// let roster = Roster::new(
///     vec![Teacher::new("t1").with_subject("Math").with_standby_quota(1)],
///     vec![ClassRoom::new("c1")],
///     vec![Subject::new("math").with_name("Math").with_weekly_hours(2)],
/// );
///
/// let mut engine = TimetableEngine::new().with_picker(SequentialPicker::new());
/// let report = engine.generate(&roster);
/// assert_eq!(report.placed, 2);
///
/// engine.lock();
/// let cover = engine.distribute_standby(&roster).unwrap();
/// assert_eq!(cover.placed, 1);
/// assert!(engine.detect().is_empty());
/// ```
#[derive(Debug)]
pub struct TimetableEngine {
    grid: SlotGrid,
    timetable: Timetable,
    gate: LockGate,
    store: SnapshotStore,
    transfer_log: TransferLog,
    edit_backup: Option<Timetable>,
    last_moved: Option<(SessionId, Instant)>,
    picker: Box<dyn SlotPicker>,
}

impl TimetableEngine {
    /// Creates an engine with an empty timetable and random placement.
    pub fn new() -> Self {
        Self {
            grid: SlotGrid::new(),
            timetable: Timetable::new(),
            gate: LockGate::default(),
            store: SnapshotStore::new(),
            transfer_log: TransferLog::new(),
            edit_backup: None,
            last_moved: None,
            picker: Box::new(RandomPicker::from_thread_rng()),
        }
    }

    /// Replaces the placement policy.
    pub fn with_picker<P: SlotPicker + 'static>(mut self, picker: P) -> Self {
        self.picker = Box::new(picker);
        self
    }

    /// The weekly grid.
    pub fn grid(&self) -> &SlotGrid {
        &self.grid
    }

    /// The working timetable. All mutation goes through operations.
    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    // ======== lock gate ========

    /// Whether the basic timetable is locked.
    pub fn is_locked(&self) -> bool {
        self.gate.is_locked()
    }

    /// Locks the basic timetable.
    pub fn lock(&mut self) {
        self.gate.lock();
    }

    /// Unlocks the basic timetable.
    pub fn unlock(&mut self) {
        self.gate.unlock();
    }

    // ======== scheduling operations ========

    /// Generates a fresh basic timetable for the roster, replacing the
    /// working timetable, then autosaves into the day's snapshot.
    ///
    /// A failed autosave (store at capacity with no same-day entry)
    /// downgrades to a report warning; the generated timetable stands.
    pub fn generate(&mut self, roster: &Roster) -> GenerationReport {
        let blocked = BlockedSlots::from_meetings(&roster.meetings);
        let (timetable, mut report) =
            generator::generate(roster, &self.grid, &blocked, self.picker.as_mut());
        self.timetable = timetable;
        self.edit_backup = None;
        self.last_moved = None;

        let today = Utc::now().date_naive();
        if let Err(err) =
            self.store
                .save_for_day(today, format!("auto-{today}"), "generator", self.timetable.clone())
        {
            log::warn!("automatic snapshot skipped: {err}");
            report.warnings.push(format!("automatic snapshot skipped: {err}"));
        }
        report
    }

    /// Scans the working timetable for double-bookings.
    pub fn detect(&self) -> Vec<Conflict> {
        detector::find_conflicts(&self.timetable)
    }

    /// Runs the two-phase optimizer over the working timetable.
    ///
    /// The timetable is backed up first; if the pass aborts, the backup
    /// is restored and [`EngineError::OptimizeFailed`] returned, so a
    /// half-optimized week is never left behind.
    pub fn optimize(&mut self, teachers: &[Teacher]) -> EngineResult<OptimizeReport> {
        let backup = self.timetable.clone();
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            optimizer::optimize(&mut self.timetable, &self.grid, teachers)
        }));
        match outcome {
            Ok(report) => Ok(report),
            Err(_) => {
                self.timetable = backup;
                log::error!("optimizer aborted, previous timetable restored");
                Err(EngineError::OptimizeFailed)
            }
        }
    }

    /// Distributes standby cover. Requires the lock gate to be locked;
    /// an unlocked engine refuses without touching the timetable.
    pub fn distribute_standby(&mut self, roster: &Roster) -> EngineResult<DistributionReport> {
        if !self.gate.is_locked() {
            return Err(EngineError::NotLocked);
        }
        let blocked = BlockedSlots::from_meetings(&roster.meetings);
        Ok(standby::distribute(
            &mut self.timetable,
            &roster.teachers,
            &self.grid,
            &blocked,
            self.picker.as_mut(),
        ))
    }

    // ======== interactive transfer ========

    /// Moves one session to a (teacher, day, period) target.
    ///
    /// The target is checked first: collisions without the override
    /// flag come back as [`TransferOutcome::NeedsOverride`] and nothing
    /// changes. A committed move captures a pre-edit backup (once per
    /// editing round), appends to the transfer log, and marks the
    /// session recently moved.
    ///
    /// Basic sessions refuse to move while the timetable is locked;
    /// standby sessions move in either state.
    pub fn transfer(&mut self, request: &TransferRequest) -> EngineResult<TransferOutcome> {
        let session = self
            .timetable
            .session(request.session)
            .ok_or(EngineError::SessionNotFound(request.session))?;
        if session.is_basic() && self.gate.is_locked() {
            return Err(EngineError::TimetableLocked);
        }
        let target = self
            .grid
            .slot_at(request.day, request.period)
            .ok_or(EngineError::InvalidSlot {
                day: request.day,
                period: request.period,
            })?
            .id;

        let conflicts = detector::conflicts_at_slot(
            &self.timetable,
            target,
            &request.teacher_id,
            session.class_id.as_deref(),
            request.session,
        );
        if !conflicts.is_empty() && !request.override_conflicts {
            return Ok(TransferOutcome::NeedsOverride(conflicts));
        }

        let description = transfer::describe_move(session, &request.teacher_id, target);
        if self.edit_backup.is_none() {
            self.edit_backup = Some(self.timetable.clone());
        }
        let session = self
            .timetable
            .session_mut(request.session)
            .ok_or(EngineError::SessionNotFound(request.session))?;
        session.teacher_id = request.teacher_id.clone();
        session.slot = target;
        self.last_moved = Some((request.session, Instant::now()));

        let record = self.transfer_log.record(description, conflicts.len()).clone();
        log::info!("transfer committed: {}", record.description);
        Ok(TransferOutcome::Moved(record))
    }

    /// Whether an editing round is open (a backup exists).
    pub fn has_pending_edits(&self) -> bool {
        self.edit_backup.is_some()
    }

    /// Accepts the current editing round; the backup is dropped and the
    /// moves become permanent.
    pub fn commit_edits(&mut self) {
        self.edit_backup = None;
    }

    /// Reverts every move of the current editing round in one step.
    /// Returns whether there was anything to revert. The transfer log
    /// keeps its entries.
    pub fn discard_edits(&mut self) -> bool {
        match self.edit_backup.take() {
            Some(backup) => {
                self.timetable = backup;
                self.last_moved = None;
                true
            }
            None => false,
        }
    }

    /// The session moved within the last few seconds, if any. Hosts use
    /// this for a brief highlight after a drop.
    pub fn recently_moved(&self) -> Option<SessionId> {
        self.recently_moved_at(Instant::now())
    }

    fn recently_moved_at(&self, now: Instant) -> Option<SessionId> {
        self.last_moved.and_then(|(id, at)| {
            (now.saturating_duration_since(at) <= RECENTLY_MOVED_WINDOW).then_some(id)
        })
    }

    /// The committed-move log.
    pub fn transfer_log(&self) -> &TransferLog {
        &self.transfer_log
    }

    // ======== snapshots ========

    /// Saves the working timetable as a named snapshot.
    pub fn save_snapshot(
        &mut self,
        name: impl Into<String>,
        created_by: impl Into<String>,
    ) -> EngineResult<SnapshotId> {
        self.store.save(name, created_by, self.timetable.clone())
    }

    /// Replaces the working timetable with a stored snapshot and marks
    /// it active. Any open editing round is dropped: the loaded state
    /// is the new baseline.
    pub fn load_snapshot(&mut self, id: SnapshotId) -> EngineResult<()> {
        self.timetable = self.store.load(id)?;
        self.edit_backup = None;
        self.last_moved = None;
        Ok(())
    }

    /// Deletes a snapshot; refuses without `confirmed`.
    pub fn delete_snapshot(&mut self, id: SnapshotId, confirmed: bool) -> EngineResult<()> {
        self.store.delete(id, confirmed)
    }

    /// All stored snapshots in save order.
    pub fn snapshots(&self) -> &[TimetableSnapshot] {
        self.store.snapshots()
    }

    /// The active snapshot, if any.
    pub fn active_snapshot(&self) -> Option<&TimetableSnapshot> {
        self.store.active()
    }

    // ======== reporting ========

    /// Load statistics for the working timetable.
    pub fn stats(&self) -> TimetableStats {
        TimetableStats::calculate(&self.timetable)
    }
}

impl Default for TimetableEngine {
    fn default() -> Self {
        Self::new()
    }
}
