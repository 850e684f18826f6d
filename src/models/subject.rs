//! Subject definition.

use serde::{Deserialize, Serialize};

/// A subject taught to classes a fixed number of times per week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique identifier.
    pub id: String,
    /// Subject name; teacher capability is matched against this, not the id.
    pub name: String,
    /// Requested sessions per week for each class.
    pub weekly_hours: u32,
    /// Maximum back-to-back sessions of this subject. Carried for host
    /// UIs; the placement passes do not act on it.
    pub max_consecutive: u32,
}

impl Subject {
    /// Creates a subject with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            weekly_hours: 1,
            max_consecutive: 2,
        }
    }

    /// Sets the subject name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the weekly session count.
    pub fn with_weekly_hours(mut self, hours: u32) -> Self {
        self.weekly_hours = hours;
        self
    }

    /// Sets the consecutive-session cap.
    pub fn with_max_consecutive(mut self, max: u32) -> Self {
        self.max_consecutive = max;
        self
    }
}
