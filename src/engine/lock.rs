//! Timetable lock gate.

use serde::{Deserialize, Serialize};

/// Two-state gate over the basic timetable.
///
/// Locking freezes the basic layout: standby distribution requires
/// `Locked`, interactive moves of basic sessions require `Unlocked`.
/// Standby sessions stay movable in both states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LockGate {
    /// Basic sessions may be edited; standby distribution is refused.
    #[default]
    Unlocked,
    /// Basic sessions are frozen; standby distribution may run.
    Locked,
}

impl LockGate {
    /// Whether the gate is locked.
    pub fn is_locked(self) -> bool {
        self == LockGate::Locked
    }

    /// Locks the gate. Idempotent.
    pub fn lock(&mut self) {
        *self = LockGate::Locked;
    }

    /// Unlocks the gate. Idempotent.
    pub fn unlock(&mut self) {
        *self = LockGate::Unlocked;
    }
}
