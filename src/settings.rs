//! Roster assembly and external settings sources.
//!
//! The host application owns teacher, class, and subject records; the
//! engine receives them as a [`Roster`]. Several scheduling inputs
//! live in separate settings stores on the host side: subject
//! assignments, teaching quotas, teacher-subject links, the weekly
//! meeting plan, and standby quotas. [`resolve_roster`] overlays those
//! onto a base roster through the [`SettingsSource`] trait.
//!
//! Every source is allowed to fail. A failed source leaves the
//! roster's own values in place and adds a warning; resolution itself
//! never errors, because generation with partial settings still beats
//! no timetable at all.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::models::{ClassRoom, MeetingBlock, Subject, Teacher};

/// A settings surface could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("settings unavailable: {reason}")]
pub struct SettingsUnavailable {
    /// Human-readable cause, e.g. "store not configured".
    pub reason: String,
}

impl SettingsUnavailable {
    /// Creates the error with the given cause.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// One teacher-to-subject assignment from the assignment store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectAssignment {
    /// Assigned teacher.
    pub teacher_id: String,
    /// Subject name, matched against [`Subject::name`].
    pub subject_name: String,
}

/// A meeting entry in the wire shape settings documents use: 0-based
/// day and period indices plus participant teacher ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMeeting {
    /// 0-based day index (0 = Sunday).
    pub day_index: usize,
    /// 0-based period index (0 = first period).
    pub period_index: u8,
    /// Teacher ids attending.
    pub participants: Vec<String>,
}

/// Read access to the host's scheduling settings.
///
/// Each method covers one settings surface and may fail independently
/// of the others.
pub trait SettingsSource {
    /// Teacher-to-subject assignments.
    fn subject_assignments(&self) -> Result<Vec<SubjectAssignment>, SettingsUnavailable>;

    /// Weekly basic-session quota per teacher id.
    fn basic_quotas(&self) -> Result<HashMap<String, u32>, SettingsUnavailable>;

    /// Additional teachable subject names per teacher id.
    fn teacher_subjects(&self) -> Result<HashMap<String, Vec<String>>, SettingsUnavailable>;

    /// The weekly meeting plan.
    fn meetings(&self) -> Result<Vec<RawMeeting>, SettingsUnavailable>;

    /// Weekly standby-session quota per teacher id.
    fn standby_quotas(&self) -> Result<HashMap<String, u32>, SettingsUnavailable>;
}

/// The engine's view of the school: teachers, classes, subjects, and
/// the meeting plan.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    /// Teachers in priority order; generation picks the first capable one.
    pub teachers: Vec<Teacher>,
    /// Classes receiving timetables.
    pub classes: Vec<ClassRoom>,
    /// Subjects to schedule.
    pub subjects: Vec<Subject>,
    /// Recurring meetings blocking participant slots.
    pub meetings: Vec<MeetingBlock>,
}

impl Roster {
    /// Creates a roster with no meetings.
    pub fn new(teachers: Vec<Teacher>, classes: Vec<ClassRoom>, subjects: Vec<Subject>) -> Self {
        Self {
            teachers,
            classes,
            subjects,
            meetings: Vec::new(),
        }
    }

    /// Sets the meeting plan.
    pub fn with_meetings(mut self, meetings: Vec<MeetingBlock>) -> Self {
        self.meetings = meetings;
        self
    }

    fn teacher_mut(&mut self, id: &str) -> Option<&mut Teacher> {
        self.teachers.iter_mut().find(|t| t.id == id)
    }
}

/// Overlays every settings surface onto the base roster.
///
/// Returns the resolved roster plus a warning per surface that was
/// unavailable or partially unusable. Entries naming unknown teacher
/// ids are skipped.
pub fn resolve_roster(base: Roster, source: &dyn SettingsSource) -> (Roster, Vec<String>) {
    let mut roster = base;
    let mut warnings = Vec::new();

    match source.subject_assignments() {
        Ok(assignments) => {
            for assignment in assignments {
                match roster.teacher_mut(&assignment.teacher_id) {
                    Some(teacher) => {
                        teacher.subjects.insert(assignment.subject_name);
                    }
                    None => log::debug!(
                        "subject assignment for unknown teacher '{}'",
                        assignment.teacher_id
                    ),
                }
            }
        }
        Err(err) => warn(&mut warnings, "subject assignments", err),
    }

    match source.basic_quotas() {
        Ok(quotas) => {
            for (teacher_id, quota) in quotas {
                if let Some(teacher) = roster.teacher_mut(&teacher_id) {
                    teacher.basic_quota = quota;
                }
            }
        }
        Err(err) => warn(&mut warnings, "basic quotas", err),
    }

    match source.teacher_subjects() {
        Ok(links) => {
            for (teacher_id, subjects) in links {
                if let Some(teacher) = roster.teacher_mut(&teacher_id) {
                    teacher.subjects.extend(subjects);
                }
            }
        }
        Err(err) => warn(&mut warnings, "teacher-subject links", err),
    }

    match source.meetings() {
        Ok(raw_meetings) => {
            let mut meetings = Vec::with_capacity(raw_meetings.len());
            for raw in raw_meetings {
                match MeetingBlock::from_indices(raw.day_index, raw.period_index, raw.participants)
                {
                    Some(meeting) => meetings.push(meeting),
                    None => warnings.push(format!(
                        "meeting at day {} period {} is out of range and was dropped",
                        raw.day_index, raw.period_index
                    )),
                }
            }
            roster.meetings = meetings;
        }
        Err(err) => warn(&mut warnings, "meeting plan", err),
    }

    match source.standby_quotas() {
        Ok(quotas) => {
            for (teacher_id, quota) in quotas {
                if let Some(teacher) = roster.teacher_mut(&teacher_id) {
                    teacher.standby_quota = quota;
                }
            }
        }
        Err(err) => warn(&mut warnings, "standby quotas", err),
    }

    (roster, warnings)
}

fn warn(warnings: &mut Vec<String>, surface: &str, err: SettingsUnavailable) {
    log::warn!("{surface} unavailable, using roster values: {err}");
    warnings.push(format!("{surface} unavailable: {err}"));
}

/// In-memory settings, fully available. The natural source for tests
/// and for hosts that assemble settings themselves.
#[derive(Debug, Clone, Default)]
pub struct StaticSettings {
    assignments: Vec<SubjectAssignment>,
    basic_quotas: HashMap<String, u32>,
    teacher_subjects: HashMap<String, Vec<String>>,
    meetings: Vec<RawMeeting>,
    standby_quotas: HashMap<String, u32>,
}

impl StaticSettings {
    /// Creates an empty settings set (available, with nothing in it).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a subject assignment.
    pub fn with_assignment(
        mut self,
        teacher_id: impl Into<String>,
        subject_name: impl Into<String>,
    ) -> Self {
        self.assignments.push(SubjectAssignment {
            teacher_id: teacher_id.into(),
            subject_name: subject_name.into(),
        });
        self
    }

    /// Sets a teacher's basic quota.
    pub fn with_basic_quota(mut self, teacher_id: impl Into<String>, quota: u32) -> Self {
        self.basic_quotas.insert(teacher_id.into(), quota);
        self
    }

    /// Adds a teacher-subject link.
    pub fn with_teacher_subject(
        mut self,
        teacher_id: impl Into<String>,
        subject_name: impl Into<String>,
    ) -> Self {
        self.teacher_subjects
            .entry(teacher_id.into())
            .or_default()
            .push(subject_name.into());
        self
    }

    /// Adds a meeting entry.
    pub fn with_meeting(mut self, day_index: usize, period_index: u8, participants: Vec<String>) -> Self {
        self.meetings.push(RawMeeting {
            day_index,
            period_index,
            participants,
        });
        self
    }

    /// Sets a teacher's standby quota.
    pub fn with_standby_quota(mut self, teacher_id: impl Into<String>, quota: u32) -> Self {
        self.standby_quotas.insert(teacher_id.into(), quota);
        self
    }
}

impl SettingsSource for StaticSettings {
    fn subject_assignments(&self) -> Result<Vec<SubjectAssignment>, SettingsUnavailable> {
        Ok(self.assignments.clone())
    }

    fn basic_quotas(&self) -> Result<HashMap<String, u32>, SettingsUnavailable> {
        Ok(self.basic_quotas.clone())
    }

    fn teacher_subjects(&self) -> Result<HashMap<String, Vec<String>>, SettingsUnavailable> {
        Ok(self.teacher_subjects.clone())
    }

    fn meetings(&self) -> Result<Vec<RawMeeting>, SettingsUnavailable> {
        Ok(self.meetings.clone())
    }

    fn standby_quotas(&self) -> Result<HashMap<String, u32>, SettingsUnavailable> {
        Ok(self.standby_quotas.clone())
    }
}

/// A source with no backend at all; every surface reports unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSettings;

impl SettingsSource for NoSettings {
    fn subject_assignments(&self) -> Result<Vec<SubjectAssignment>, SettingsUnavailable> {
        Err(SettingsUnavailable::new("no settings backend configured"))
    }

    fn basic_quotas(&self) -> Result<HashMap<String, u32>, SettingsUnavailable> {
        Err(SettingsUnavailable::new("no settings backend configured"))
    }

    fn teacher_subjects(&self) -> Result<HashMap<String, Vec<String>>, SettingsUnavailable> {
        Err(SettingsUnavailable::new("no settings backend configured"))
    }

    fn meetings(&self) -> Result<Vec<RawMeeting>, SettingsUnavailable> {
        Err(SettingsUnavailable::new("no settings backend configured"))
    }

    fn standby_quotas(&self) -> Result<HashMap<String, u32>, SettingsUnavailable> {
        Err(SettingsUnavailable::new("no settings backend configured"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Day, SlotId};

    fn base_roster() -> Roster {
        Roster::new(
            vec![
                Teacher::new("t1").with_basic_quota(10).with_standby_quota(2),
                Teacher::new("t2"),
            ],
            vec![ClassRoom::new("c1")],
            vec![Subject::new("math").with_name("Math")],
        )
    }

    #[test]
    fn test_resolve_overlays_every_surface() {
        let settings = StaticSettings::new()
            .with_assignment("t1", "Math")
            .with_basic_quota("t1", 18)
            .with_teacher_subject("t2", "Art")
            .with_meeting(1, 0, vec!["t1".into()])
            .with_standby_quota("t2", 4);

        let (roster, warnings) = resolve_roster(base_roster(), &settings);

        assert!(warnings.is_empty());
        let t1 = &roster.teachers[0];
        let t2 = &roster.teachers[1];
        assert!(t1.teaches("Math"));
        assert_eq!(t1.basic_quota, 18);
        assert!(t2.teaches("Art"));
        assert_eq!(t2.standby_quota, 4);
        assert_eq!(roster.meetings.len(), 1);
        assert_eq!(roster.meetings[0].slot, SlotId::new(Day::Monday, 1));
    }

    #[test]
    fn test_unavailable_sources_fall_back_with_warnings() {
        let (roster, warnings) = resolve_roster(base_roster(), &NoSettings);

        // One warning per surface, roster values untouched
        assert_eq!(warnings.len(), 5);
        assert_eq!(roster.teachers[0].basic_quota, 10);
        assert_eq!(roster.teachers[0].standby_quota, 2);
        assert!(roster.meetings.is_empty());
    }

    #[test]
    fn test_out_of_range_meeting_is_dropped_with_warning() {
        let settings = StaticSettings::new()
            .with_meeting(0, 3, vec!["t1".into()])
            .with_meeting(9, 0, vec!["t1".into()]);

        let (roster, warnings) = resolve_roster(base_roster(), &settings);

        assert_eq!(roster.meetings.len(), 1);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("day 9"));
    }

    #[test]
    fn test_unknown_teacher_entries_are_skipped() {
        let settings = StaticSettings::new()
            .with_assignment("ghost", "Math")
            .with_basic_quota("ghost", 99)
            .with_standby_quota("ghost", 99);

        let (roster, warnings) = resolve_roster(base_roster(), &settings);

        assert!(warnings.is_empty());
        assert!(roster.teachers.iter().all(|t| t.basic_quota != 99));
        assert!(roster.teachers.iter().all(|t| !t.teaches("Math")));
    }

    #[test]
    fn test_meetings_replace_base_plan_on_success() {
        let base = base_roster().with_meetings(vec![MeetingBlock::new(SlotId::new(Day::Sunday, 1))]);
        let settings = StaticSettings::new().with_meeting(2, 2, vec!["t1".into()]);

        let (roster, _) = resolve_roster(base, &settings);
        assert_eq!(roster.meetings.len(), 1);
        assert_eq!(roster.meetings[0].slot, SlotId::new(Day::Tuesday, 3));
    }
}
