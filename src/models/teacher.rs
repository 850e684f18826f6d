//! Teacher definition.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A teacher who can be assigned teaching and standby sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Subject area the teacher belongs to (e.g. "Science").
    pub specialization: String,
    /// Weekly quota of regular teaching sessions.
    pub basic_quota: u32,
    /// Weekly quota of standby (substitute cover) sessions.
    pub standby_quota: u32,
    /// Names of the subjects this teacher can teach.
    pub subjects: HashSet<String>,
}

impl Teacher {
    /// Creates a teacher with the given id and empty capabilities.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            specialization: String::new(),
            basic_quota: 0,
            standby_quota: 0,
            subjects: HashSet::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the subject area.
    pub fn with_specialization(mut self, specialization: impl Into<String>) -> Self {
        self.specialization = specialization.into();
        self
    }

    /// Sets the weekly basic-session quota.
    pub fn with_basic_quota(mut self, quota: u32) -> Self {
        self.basic_quota = quota;
        self
    }

    /// Sets the weekly standby-session quota.
    pub fn with_standby_quota(mut self, quota: u32) -> Self {
        self.standby_quota = quota;
        self
    }

    /// Adds one teachable subject by name.
    pub fn with_subject(mut self, subject_name: impl Into<String>) -> Self {
        self.subjects.insert(subject_name.into());
        self
    }

    /// Whether this teacher can teach the named subject.
    pub fn teaches(&self, subject_name: &str) -> bool {
        self.subjects.contains(subject_name)
    }
}
