//! Core data models for timetable scheduling.
//!
//! Defines the domain types shared by every engine operation:
//!
//! - [`Teacher`], [`ClassRoom`], [`Subject`]: the roster the host
//!   application maintains
//! - [`Day`], [`SlotId`], [`TimeSlot`], [`SlotGrid`]: the fixed weekly
//!   grid of 35 teaching slots
//! - [`MeetingBlock`], [`BlockedSlots`]: recurring meetings and the
//!   per-teacher availability holes they create
//! - [`Session`], [`Timetable`]: placements and the aggregate that owns
//!   them
//! - [`Conflict`]: detected double-bookings

mod classroom;
mod conflict;
mod meeting;
mod session;
mod slot;
mod subject;
mod teacher;
mod timetable;

pub use classroom::ClassRoom;
pub use conflict::{Conflict, ConflictKind, DOUBLE_BOOKING_SEVERITY};
pub use meeting::MeetingBlock;
pub use session::{Session, SessionId, SessionKind};
pub use slot::{
    BlockedSlots, Day, SlotGrid, SlotId, TimeSlot, DAY_COUNT, FIRST_PERIOD_MINUTE, PERIODS_PER_DAY,
    PERIOD_MINUTES, SLOT_COUNT,
};
pub use subject::Subject;
pub use teacher::Teacher;
pub use timetable::Timetable;
