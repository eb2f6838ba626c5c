//! Date Interleaver (§4.5): round-robin date distribution across the
//! groups of one bundle (a subject's groups sharing one weekday and
//! time-range).

use crate::tracker::ResourceTracker;
use crate::types::{CalendarDay, Conflict, ConflictKind, LabGroup, SubjectCode, TimeRange, Weekday};
use std::collections::{BTreeMap, HashSet};

/// One semester's calendar entries whose assigned weekday matches
/// `weekday`, as `(iso_date, ddmmyyyy)` pairs sorted descending
/// (latest first).
fn build_pool(calendar: &BTreeMap<String, CalendarDay>, weekday: Weekday) -> Vec<(String, String)> {
    let mut pool: Vec<(String, String)> = calendar
        .values()
        .filter(|day| day.assigned_weekday == weekday)
        .map(|day| (day.iso_date(), day.ddmmyyyy()))
        .collect();
    pool.sort_by(|a, b| b.0.cmp(&a.0));
    pool
}

/// Places dates for every group in `indices` (a bundle sharing
/// `weekday`/`range` within one subject), mutating each group's
/// `dates` and, when an alternative room is used, its `room` and
/// `capacity` fields. Conflicts are appended, never returned as errors.
#[allow(clippy::too_many_arguments)]
pub fn run_bundle(
    groups: &mut [LabGroup],
    indices: &[usize],
    semester: &str,
    subject: &SubjectCode,
    weekday: Weekday,
    range: &TimeRange,
    sessions_per_group: u32,
    calendar: &BTreeMap<String, CalendarDay>,
    tracker: &mut ResourceTracker<'_>,
    conflicts: &mut Vec<Conflict>,
) {
    let pool = build_pool(calendar, weekday);
    let m = indices.len();
    let mut used_dates: HashSet<String> = HashSet::new();

    for j in 0..sessions_per_group as usize {
        for (r, &group_idx) in indices.iter().enumerate() {
            let start = r + j * m;

            if start >= pool.len() {
                conflicts.push(
                    Conflict::new(
                        ConflictKind::InsufficientDates,
                        semester,
                        subject.clone(),
                        groups[group_idx].label.clone(),
                        weekday,
                        range.clone(),
                        "round start index beyond the date pool",
                    )
                    .with_candidate(None, Vec::new()),
                );
                continue;
            }

            let mut placed = false;
            for (iso, ddmmyyyy) in &pool[start..] {
                if used_dates.contains(ddmmyyyy) {
                    continue;
                }

                let teacher_id = groups[group_idx].teacher_id.clone();
                if let Some(teacher) = &teacher_id {
                    if tracker.teacher_date_blocked(teacher, ddmmyyyy)
                        || !tracker.teacher_free_on(teacher, iso, range)
                    {
                        continue;
                    }
                }

                let current_room = groups[group_idx].room.clone();
                let mut chosen_room = current_room.clone().filter(|room| {
                    !tracker.room_date_blocked(room, ddmmyyyy) && tracker.room_free_on(room, iso, range)
                });

                if chosen_room.is_none() {
                    for alt in tracker.eligible_rooms(subject) {
                        if Some(&alt) == current_room.as_ref() {
                            continue;
                        }
                        if !tracker.room_date_blocked(&alt, ddmmyyyy) && tracker.room_free_on(&alt, iso, range) {
                            chosen_room = Some(alt);
                            break;
                        }
                    }
                }

                let Some(room) = chosen_room else {
                    continue;
                };

                if Some(&room) != current_room.as_ref() {
                    groups[group_idx].capacity = tracker.capacity_of(Some(&room));
                    groups[group_idx].room = Some(room.clone());
                }

                if let Some(teacher) = &teacher_id {
                    tracker.occupy_teacher(teacher, iso, range);
                }
                tracker.occupy_room(&room, iso, range);

                groups[group_idx].dates.push(ddmmyyyy.clone());
                used_dates.insert(ddmmyyyy.clone());
                placed = true;
                break;
            }

            if !placed {
                let (first_date, remaining) = pool
                    .get(start)
                    .map(|(_, d)| (Some(d.clone()), pool[start..].iter().map(|(_, d)| d.clone()).collect()))
                    .unwrap_or((None, Vec::new()));
                conflicts.push(
                    Conflict::new(
                        ConflictKind::NoRoomSlot,
                        semester,
                        subject.clone(),
                        groups[group_idx].label.clone(),
                        weekday,
                        range.clone(),
                        "no date in the remaining pool satisfied teacher and room availability",
                    )
                    .with_teacher(groups[group_idx].teacher_display.clone())
                    .with_room(groups[group_idx].room.as_ref().map(|r| r.0.clone()))
                    .with_candidate(first_date, remaining),
                );
            }
        }
    }

    for &idx in indices {
        groups[idx]
            .dates
            .sort_by(|a, b| crate::normalizer::ddmmyyyy_to_iso(b).cmp(&crate::normalizer::ddmmyyyy_to_iso(a)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AcademicGroupCode, Aulas, Profesores, RoomName};

    fn calendar_day(fecha: &str, horario: Weekday) -> CalendarDay {
        CalendarDay {
            date_raw: fecha.to_string(),
            assigned_weekday: horario,
        }
    }

    fn group(label: &str) -> LabGroup {
        LabGroup::new(
            label.to_string(),
            SubjectCode("FIS201".into()),
            "semestre_1".into(),
            Weekday::Lunes,
            TimeRange("09:30-11:30".into()),
            AcademicGroupCode("A404".into()),
            None,
        )
    }

    #[test]
    fn single_group_single_date() {
        let mut calendar = BTreeMap::new();
        calendar.insert("d1".into(), calendar_day("2025-02-03", Weekday::Lunes));

        let mut groups = vec![group("A404-01")];
        groups[0].room = Some(RoomName("Lab1".into()));
        groups[0].capacity = 20;

        let profs = Profesores::default();
        let aulas = Aulas::default();
        let mut tracker = ResourceTracker::new(&profs, &aulas, 10_000);
        let mut conflicts = Vec::new();

        run_bundle(
            &mut groups,
            &[0],
            "semestre_1",
            &SubjectCode("FIS201".into()),
            Weekday::Lunes,
            &TimeRange("09:30-11:30".into()),
            1,
            &calendar,
            &mut tracker,
            &mut conflicts,
        );

        assert_eq!(groups[0].dates, vec!["03/02/2025".to_string()]);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn interleaves_two_groups_without_shared_dates() {
        let mut calendar = BTreeMap::new();
        for (i, d) in ["2025-02-03", "2025-02-10", "2025-02-17", "2025-02-24"]
            .iter()
            .enumerate()
        {
            calendar.insert(format!("d{i}"), calendar_day(d, Weekday::Lunes));
        }

        let mut groups = vec![group("A404-01"), group("A404-02")];
        for g in groups.iter_mut() {
            g.room = Some(RoomName("Lab1".into()));
            g.capacity = 20;
        }

        let profs = Profesores::default();
        let aulas = Aulas::default();
        let mut tracker = ResourceTracker::new(&profs, &aulas, 10_000);
        let mut conflicts = Vec::new();

        run_bundle(
            &mut groups,
            &[0, 1],
            "semestre_1",
            &SubjectCode("FIS201".into()),
            Weekday::Lunes,
            &TimeRange("09:30-11:30".into()),
            2,
            &calendar,
            &mut tracker,
            &mut conflicts,
        );

        assert_eq!(groups[0].dates, vec!["24/02/2025".to_string(), "10/02/2025".to_string()]);
        assert_eq!(groups[1].dates, vec!["17/02/2025".to_string(), "03/02/2025".to_string()]);
        assert!(conflicts.is_empty());

        let mut all_dates = groups[0].dates.clone();
        all_dates.extend(groups[1].dates.clone());
        let unique: HashSet<_> = all_dates.iter().collect();
        assert_eq!(unique.len(), all_dates.len());
    }

    #[test]
    fn insufficient_dates_records_conflict() {
        let mut calendar = BTreeMap::new();
        calendar.insert("d1".into(), calendar_day("2025-02-03", Weekday::Lunes));

        let mut groups = vec![group("A404-01")];
        groups[0].room = Some(RoomName("Lab1".into()));
        groups[0].capacity = 20;

        let profs = Profesores::default();
        let aulas = Aulas::default();
        let mut tracker = ResourceTracker::new(&profs, &aulas, 10_000);
        let mut conflicts = Vec::new();

        run_bundle(
            &mut groups,
            &[0],
            "semestre_1",
            &SubjectCode("FIS201".into()),
            Weekday::Lunes,
            &TimeRange("09:30-11:30".into()),
            2,
            &calendar,
            &mut tracker,
            &mut conflicts,
        );

        assert_eq!(groups[0].dates.len(), 1);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::InsufficientDates);
    }
}
