//! Double-booking detection.
//!
//! A pure scan over the session list; nothing is mutated. Two rules,
//! both hard:
//!
//! 1. A teacher must not hold two sessions in the same slot.
//! 2. A class must not receive two sessions in the same slot.
//!
//! The teacher rule covers every session kind; the class rule only
//! binds basic sessions, because standby sessions carry no class.
//! Each (slot, resource) collision yields one [`Conflict`] listing all
//! involved sessions in scan order, so downstream repair can keep the
//! first and relocate the rest.

use std::collections::HashMap;

use crate::models::{Conflict, SessionId, SlotId, Timetable};

/// Scans a timetable and returns every double-booking.
///
/// Teacher conflicts are listed before class conflicts; within each
/// category, groups appear in first-encounter order.
pub fn find_conflicts(timetable: &Timetable) -> Vec<Conflict> {
    let mut teacher_groups: HashMap<(SlotId, String), Vec<SessionId>> = HashMap::new();
    let mut teacher_order: Vec<(SlotId, String)> = Vec::new();
    let mut class_groups: HashMap<(SlotId, String), Vec<SessionId>> = HashMap::new();
    let mut class_order: Vec<(SlotId, String)> = Vec::new();

    for session in timetable.sessions() {
        let teacher_key = (session.slot, session.teacher_id.clone());
        let group = teacher_groups.entry(teacher_key.clone()).or_default();
        if group.is_empty() {
            teacher_order.push(teacher_key);
        }
        group.push(session.id);

        if let Some(class_id) = &session.class_id {
            let class_key = (session.slot, class_id.clone());
            let group = class_groups.entry(class_key.clone()).or_default();
            if group.is_empty() {
                class_order.push(class_key);
            }
            group.push(session.id);
        }
    }

    let mut conflicts = Vec::new();
    for key in &teacher_order {
        if let Some(sessions) = teacher_groups.get(key) {
            if sessions.len() > 1 {
                conflicts.push(Conflict::teacher_double_booked(
                    key.0,
                    key.1.clone(),
                    sessions.clone(),
                ));
            }
        }
    }
    for key in &class_order {
        if let Some(sessions) = class_groups.get(key) {
            if sessions.len() > 1 {
                conflicts.push(Conflict::class_double_booked(
                    key.0,
                    key.1.clone(),
                    sessions.clone(),
                ));
            }
        }
    }
    conflicts
}

/// Checks what a session would collide with if it stood at `slot` under
/// `teacher_id`.
///
/// Used by interactive transfer before committing a move. Only the
/// target teacher and the moving session's class are examined, and the
/// moving session itself is excluded from the occupancy scan. Returned
/// conflicts list the sessions already at the slot.
pub fn conflicts_at_slot(
    timetable: &Timetable,
    slot: SlotId,
    teacher_id: &str,
    class_id: Option<&str>,
    moving: SessionId,
) -> Vec<Conflict> {
    let occupants: Vec<_> = timetable
        .sessions_at(slot)
        .into_iter()
        .filter(|s| s.id != moving)
        .collect();

    let mut conflicts = Vec::new();

    let teacher_hits: Vec<SessionId> = occupants
        .iter()
        .filter(|s| s.teacher_id == teacher_id)
        .map(|s| s.id)
        .collect();
    if !teacher_hits.is_empty() {
        conflicts.push(Conflict::teacher_double_booked(slot, teacher_id, teacher_hits));
    }

    if let Some(class_id) = class_id {
        let class_hits: Vec<SessionId> = occupants
            .iter()
            .filter(|s| s.class_id.as_deref() == Some(class_id))
            .map(|s| s.id)
            .collect();
        if !class_hits.is_empty() {
            conflicts.push(Conflict::class_double_booked(slot, class_id, class_hits));
        }
    }

    conflicts
}
