//! Named timetable snapshots.
//!
//! The store keeps up to [`MAX_SNAPSHOTS`] full timetable copies. One
//! snapshot may be flagged active, meaning it was the last one loaded
//! into the working timetable (or was the first ever saved). Loading
//! moves the flag; deleting the active snapshot removes the flag with
//! it and no other snapshot inherits it, so a store can hold entries
//! with none active. Long-standing behavior that host views rely on.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::EngineError;
use crate::models::Timetable;

/// Maximum number of snapshots the store holds.
pub const MAX_SNAPSHOTS: usize = 10;

/// Identity of one stored snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SnapshotId(pub u64);

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named full copy of a timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableSnapshot {
    /// Identity within the store.
    pub id: SnapshotId,
    /// Display name.
    pub name: String,
    /// When the snapshot was saved or last overwritten.
    pub created_at: DateTime<Utc>,
    /// Who saved it, e.g. a user name or "generator".
    pub created_by: String,
    /// The preserved timetable.
    pub timetable: Timetable,
    /// Whether this is the snapshot most recently loaded into the
    /// working timetable.
    pub is_active: bool,
}

/// Bounded collection of snapshots with active-flag bookkeeping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotStore {
    snapshots: Vec<TimetableSnapshot>,
    next_id: u64,
}

impl SnapshotStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves a snapshot.
    ///
    /// Fails with [`EngineError::StoreFull`] at capacity; the store is
    /// left untouched. The first snapshot saved into an empty store is
    /// marked active.
    pub fn save(
        &mut self,
        name: impl Into<String>,
        created_by: impl Into<String>,
        timetable: Timetable,
    ) -> Result<SnapshotId, EngineError> {
        if self.snapshots.len() >= MAX_SNAPSHOTS {
            return Err(EngineError::StoreFull {
                capacity: MAX_SNAPSHOTS,
            });
        }
        self.next_id += 1;
        let id = SnapshotId(self.next_id);
        self.snapshots.push(TimetableSnapshot {
            id,
            name: name.into(),
            created_at: Utc::now(),
            created_by: created_by.into(),
            timetable,
            is_active: self.snapshots.is_empty(),
        });
        Ok(id)
    }

    /// Saves keyed by calendar day: if a snapshot from `day` already
    /// exists, its payload and timestamp are overwritten in place,
    /// otherwise a new snapshot is saved. Generation autosaves through
    /// this so repeated runs on one day share a single entry.
    pub fn save_for_day(
        &mut self,
        day: NaiveDate,
        name: impl Into<String>,
        created_by: impl Into<String>,
        timetable: Timetable,
    ) -> Result<SnapshotId, EngineError> {
        if let Some(snapshot) = self
            .snapshots
            .iter_mut()
            .find(|s| s.created_at.date_naive() == day)
        {
            snapshot.timetable = timetable;
            snapshot.created_at = Utc::now();
            return Ok(snapshot.id);
        }
        self.save(name, created_by, timetable)
    }

    /// Loads a snapshot's timetable and marks it as the active one.
    pub fn load(&mut self, id: SnapshotId) -> Result<Timetable, EngineError> {
        if !self.snapshots.iter().any(|s| s.id == id) {
            return Err(EngineError::SnapshotNotFound(id));
        }
        let mut loaded = None;
        for snapshot in &mut self.snapshots {
            snapshot.is_active = snapshot.id == id;
            if snapshot.is_active {
                loaded = Some(snapshot.timetable.clone());
            }
        }
        loaded.ok_or(EngineError::SnapshotNotFound(id))
    }

    /// Deletes a snapshot. Requires `confirmed`; a bare call is
    /// refused so hosts must put a confirmation step in front.
    ///
    /// Deleting the active snapshot leaves the store with no active
    /// entry.
    pub fn delete(&mut self, id: SnapshotId, confirmed: bool) -> Result<(), EngineError> {
        if !confirmed {
            return Err(EngineError::ConfirmationRequired);
        }
        let index = self
            .snapshots
            .iter()
            .position(|s| s.id == id)
            .ok_or(EngineError::SnapshotNotFound(id))?;
        self.snapshots.remove(index);
        Ok(())
    }

    /// Looks up a snapshot.
    pub fn get(&self, id: SnapshotId) -> Option<&TimetableSnapshot> {
        self.snapshots.iter().find(|s| s.id == id)
    }

    /// The active snapshot, if any.
    pub fn active(&self) -> Option<&TimetableSnapshot> {
        self.snapshots.iter().find(|s| s.is_active)
    }

    /// All snapshots in save order.
    pub fn snapshots(&self) -> &[TimetableSnapshot] {
        &self.snapshots
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Whether the store is at capacity.
    pub fn is_full(&self) -> bool {
        self.snapshots.len() >= MAX_SNAPSHOTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use crate::models::{Day, Session, SlotId};

    fn timetable_with(count: u64) -> Timetable {
        let mut timetable = Timetable::new();
        for _ in 0..count {
            let id = timetable.allocate_id();
            timetable.add_session(Session::standby(id, "t1", SlotId::new(Day::Sunday, 1)));
        }
        timetable
    }

    #[test]
    fn test_first_save_becomes_active() {
        let mut store = SnapshotStore::new();
        let first = store.save("draft", "alice", timetable_with(1)).unwrap();
        let second = store.save("revised", "alice", timetable_with(2)).unwrap();

        assert_eq!(store.active().map(|s| s.id), Some(first));
        assert!(!store.get(second).unwrap().is_active);
    }

    #[test]
    fn test_capacity_rejects_eleventh() {
        let mut store = SnapshotStore::new();
        for i in 0..MAX_SNAPSHOTS {
            store.save(format!("s{i}"), "alice", Timetable::new()).unwrap();
        }
        assert!(store.is_full());

        let result = store.save("overflow", "alice", Timetable::new());
        assert_eq!(result, Err(EngineError::StoreFull { capacity: MAX_SNAPSHOTS }));
        assert_eq!(store.len(), MAX_SNAPSHOTS);
    }

    #[test]
    fn test_load_returns_payload_and_moves_active_flag() {
        let mut store = SnapshotStore::new();
        store.save("a", "alice", timetable_with(1)).unwrap();
        let b = store.save("b", "alice", timetable_with(2)).unwrap();

        let loaded = store.load(b).unwrap();
        assert_eq!(loaded.session_count(), 2);
        assert_eq!(store.active().map(|s| s.id), Some(b));
        // Exactly one active
        assert_eq!(store.snapshots().iter().filter(|s| s.is_active).count(), 1);
    }

    #[test]
    fn test_load_unknown_snapshot() {
        let mut store = SnapshotStore::new();
        assert_eq!(
            store.load(SnapshotId(9)),
            Err(EngineError::SnapshotNotFound(SnapshotId(9)))
        );
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut store = SnapshotStore::new();
        let id = store.save("a", "alice", Timetable::new()).unwrap();

        assert_eq!(store.delete(id, false), Err(EngineError::ConfirmationRequired));
        assert_eq!(store.len(), 1);
        assert!(store.delete(id, true).is_ok());
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_unknown_snapshot() {
        let mut store = SnapshotStore::new();
        assert_eq!(
            store.delete(SnapshotId(4), true),
            Err(EngineError::SnapshotNotFound(SnapshotId(4)))
        );
    }

    #[test]
    fn test_deleting_active_leaves_none_active() {
        let mut store = SnapshotStore::new();
        let a = store.save("a", "alice", Timetable::new()).unwrap();
        store.save("b", "alice", Timetable::new()).unwrap();

        store.delete(a, true).unwrap();
        // The flag is not reassigned
        assert!(store.active().is_none());
        assert_eq!(store.len(), 1);

        // A save into the non-empty store does not claim the flag either
        store.save("c", "alice", Timetable::new()).unwrap();
        assert!(store.active().is_none());
    }

    #[test]
    fn test_save_into_emptied_store_is_active_again() {
        let mut store = SnapshotStore::new();
        let a = store.save("a", "alice", Timetable::new()).unwrap();
        store.delete(a, true).unwrap();

        let b = store.save("b", "alice", Timetable::new()).unwrap();
        assert_eq!(store.active().map(|s| s.id), Some(b));
    }

    #[test]
    fn test_save_for_day_overwrites_same_day_entry() {
        let mut store = SnapshotStore::new();
        let today = Utc::now().date_naive();

        let first = store
            .save_for_day(today, "auto", "generator", timetable_with(1))
            .unwrap();
        let second = store
            .save_for_day(today, "auto", "generator", timetable_with(3))
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(first).unwrap().timetable.session_count(), 3);
    }

    #[test]
    fn test_save_for_day_creates_entry_for_other_day() {
        let mut store = SnapshotStore::new();
        let today = Utc::now().date_naive();
        store.save_for_day(today, "auto", "generator", Timetable::new()).unwrap();

        // Entries saved now carry today's date, so keying by tomorrow
        // must miss and append
        let tomorrow = today + Duration::days(1);
        store.save_for_day(tomorrow, "auto", "generator", Timetable::new()).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_save_for_day_at_capacity() {
        let mut store = SnapshotStore::new();
        for i in 0..MAX_SNAPSHOTS {
            store.save(format!("s{i}"), "alice", Timetable::new()).unwrap();
        }
        let today = Utc::now().date_naive();

        // Overwriting a same-day entry needs no free slot
        let updated = store
            .save_for_day(today, "auto", "generator", timetable_with(2))
            .unwrap();
        assert_eq!(store.get(updated).unwrap().timetable.session_count(), 2);

        // A day with no entry would append an eleventh
        let tomorrow = today + Duration::days(1);
        let result = store.save_for_day(tomorrow, "auto", "generator", Timetable::new());
        assert_eq!(result, Err(EngineError::StoreFull { capacity: MAX_SNAPSHOTS }));
        assert_eq!(store.len(), MAX_SNAPSHOTS);
    }
}
