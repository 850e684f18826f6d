//! School timetable assignment and conflict-resolution engine.
//!
//! Builds weekly timetables over a fixed 5-day × 7-period grid:
//! random-with-retry basic placement, standby cover distribution,
//! double-booking detection, and a two-phase optimizer that spreads
//! each teacher's load and repairs collisions. Interactive editing is
//! covered by conflict-checked transfers with one-step undo, and a
//! bounded snapshot store preserves whole timetables by name.
//!
//! # Modules
//!
//! - **`models`**: Domain types (`Teacher`, `ClassRoom`, `Subject`,
//!   `SlotGrid`, `Session`, `Timetable`, `Conflict`)
//! - **`generator`**: Basic-session placement over the grid
//! - **`detector`**: Double-booking scans (whole table and single target)
//! - **`optimizer`**: Spread-then-repair optimization
//! - **`standby`**: Lock-gated standby cover distribution
//! - **`engine`**: The stateful facade (lock gate, transfers, undo,
//!   snapshots, move log)
//! - **`placement`**: Pluggable slot-selection policy
//! - **`settings`**: Roster assembly from external settings surfaces
//! - **`summary`**: Load statistics for host views
//!
//! # Architecture
//!
//! [`engine::TimetableEngine`] owns the working [`models::Timetable`]
//! and sequences every operation; the operation modules are pure
//! functions over timetable values, so embedders can also call them
//! directly. Randomness enters only through
//! [`placement::SlotPicker`], which keeps every pass testable with a
//! deterministic picker.

pub mod detector;
pub mod engine;
pub mod error;
pub mod generator;
pub mod models;
pub mod optimizer;
pub mod placement;
pub mod settings;
pub mod standby;
pub mod summary;
