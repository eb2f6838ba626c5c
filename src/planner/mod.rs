//! Subject Planner (§4.4): turns one subject's configuration into its
//! lab groups, organized as a phase pipeline (slot assignment → room
//! assignment → student assignment → balancing) driven by an explicit
//! [`ResourceTracker`] handle rather than a constraint solver.

mod distribute;
mod interleave;
mod mixed;

use crate::enrollment::EnrollmentIndex;
use crate::tracker::ResourceTracker;
use crate::types::{
    AcademicGroupCode, AsignaturaEntry, CalendarDay, Conflict, ConflictKind, HorarioEntry, LabGroup,
    SubjectCode, TimeRange, Weekday,
};
use itertools::Itertools;
use std::collections::{BTreeMap, BTreeSet};

/// Plans every lab group for one `(semester, subject)` pair. Never
/// fails: every infeasibility becomes a [`Conflict`] or an advisory
/// string, per §4.4's failure semantics.
#[allow(clippy::too_many_arguments)]
pub fn plan_subject(
    semester: &str,
    subject_code: &SubjectCode,
    asignatura: &AsignaturaEntry,
    horario: &HorarioEntry,
    enrollment: &EnrollmentIndex,
    calendar: &BTreeMap<String, CalendarDay>,
    tracker: &mut ResourceTracker<'_>,
    conflicts: &mut Vec<Conflict>,
    advisories: &mut Vec<String>,
) -> Vec<LabGroup> {
    let (simple, dual) = asignatura.simple_and_dual_codes();
    let Some(simple) = simple else {
        advisories.push(format!(
            "{subject_code}: no simple academic group associated, subject skipped"
        ));
        return Vec::new();
    };

    let n_simple = asignatura.planned_group_count(&simple) as usize;
    let n_dual = dual
        .as_ref()
        .map(|d| asignatura.planned_group_count(d) as usize)
        .unwrap_or(0);
    let sessions_per_group = asignatura.sessions_per_group(&simple);

    if n_simple == 0 {
        return Vec::new();
    }

    let base = horario.slots_for_group(&simple);
    if base.is_empty() {
        conflicts.push(Conflict::new(
            ConflictKind::NoCalendarForDay,
            semester,
            subject_code.clone(),
            simple.to_string(),
            Weekday::Lunes,
            TimeRange(String::new()),
            "subject has planned groups but no matching grid slots",
        ));
        return Vec::new();
    }

    let slots: Vec<(Weekday, TimeRange)> = (0..n_simple).map(|i| base[i % base.len()].clone()).collect();

    let mixed_indices: Vec<usize> = slots
        .iter()
        .enumerate()
        .filter(|(_, (day, range))| horario.is_mixed_slot(*day, range))
        .map(|(i, _)| i)
        .collect();
    let reserved = mixed::reserve_mixed_indices(&mixed_indices, n_dual);

    let mut groups: Vec<LabGroup> = Vec::with_capacity(n_simple);
    for (i, (weekday, range)) in slots.iter().enumerate() {
        let label = format!("{}-{:02}", simple.0, i + 1);
        let mut group = LabGroup::new(
            label,
            subject_code.clone(),
            semester.to_string(),
            *weekday,
            range.clone(),
            simple.clone(),
            dual.clone(),
        );

        group.teacher_id = tracker.select_teacher(subject_code, *weekday, range);
        if let Some(teacher) = &group.teacher_id {
            group.teacher_display = tracker.teacher_display(teacher);
        } else {
            conflicts.push(
                Conflict::new(
                    ConflictKind::NoTeacherEligible,
                    semester,
                    subject_code.clone(),
                    group.label.clone(),
                    *weekday,
                    range.clone(),
                    "no teacher is eligible for this subject/weekday/time-range",
                )
                .with_teacher(None),
            );
        }

        group.room = tracker.primary_room(subject_code);
        group.capacity = tracker.capacity_of(group.room.as_ref());
        group.mixed = reserved.contains(&i) || horario.is_mixed_slot(*weekday, range);

        groups.push(group);
    }

    let students_simple = enrollment.students_of(&simple, subject_code);
    let students_dual = dual
        .as_ref()
        .map(|d| enrollment.students_of(d, subject_code))
        .unwrap_or_default();
    let dual_member_ids: BTreeSet<_> = students_dual.iter().cloned().collect();

    let dropped = distribute::distribute_students(&mut groups, &reserved, students_dual, students_simple);
    if !dropped.is_empty() {
        advisories.push(format!(
            "{subject_code}: {} students could not be placed due to exhausted capacity",
            dropped.len()
        ));
    }

    if !distribute::balance_parity(&mut groups, &dual_member_ids) {
        advisories.push(format!(
            "{subject_code}: parity balancing could not fully converge, one or more extra odd-count groups remain"
        ));
    }

    place_dates(semester, subject_code, &mut groups, sessions_per_group, calendar, tracker, conflicts);

    groups
}

/// Groups the subject's lab groups into bundles sharing a (weekday,
/// time-range), then delegates each bundle to the Date Interleaver
/// (§4.5), processed in weekday-ordinal then time-range order.
fn place_dates(
    semester: &str,
    subject_code: &SubjectCode,
    groups: &mut [LabGroup],
    sessions_per_group: u32,
    calendar: &BTreeMap<String, CalendarDay>,
    tracker: &mut ResourceTracker<'_>,
    conflicts: &mut Vec<Conflict>,
) {
    let bundles: BTreeMap<(Weekday, TimeRange), Vec<usize>> = groups
        .iter()
        .enumerate()
        .map(|(i, group)| ((group.weekday, group.time_range.clone()), i))
        .into_group_map()
        .into_iter()
        .collect();

    for ((weekday, range), indices) in bundles {
        interleave::run_bundle(
            groups,
            &indices,
            semester,
            subject_code,
            weekday,
            &range,
            sessions_per_group,
            calendar,
            tracker,
            conflicts,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        AssociatedGroup, GridCell, HorarioEntry, LabConfig, Profesores, Room, RoomName, ScheduleGrid,
        Student, SubjectEnrollment, Teacher, Weekday,
    };
    use crate::types::{Alumnos, Aulas, StudentId};
    use std::collections::BTreeSet as Set;

    fn calendar_day(fecha: &str, horario: Weekday) -> CalendarDay {
        CalendarDay {
            date_raw: fecha.to_string(),
            assigned_weekday: horario,
        }
    }

    fn make_asignatura(simple_groups: u32, dual_groups: u32, sessions: u32, with_dual: bool) -> AsignaturaEntry {
        let mut associated = BTreeMap::new();
        associated.insert(
            AcademicGroupCode("A404".into()),
            AssociatedGroup {
                lab_config: LabConfig {
                    hours_per_session: 2.0,
                    minutes_per_session: 0.0,
                    planned_group_count: simple_groups,
                    sessions_per_semester: sessions,
                },
            },
        );
        if with_dual {
            associated.insert(
                AcademicGroupCode("EE403".into()),
                AssociatedGroup {
                    lab_config: LabConfig {
                        hours_per_session: 2.0,
                        minutes_per_session: 0.0,
                        planned_group_count: dual_groups,
                        sessions_per_semester: sessions,
                    },
                },
            );
        }
        AsignaturaEntry {
            name: "Fisica".into(),
            associated_groups: associated,
        }
    }

    fn make_grid_single_slot(group_codes: &[&str]) -> HorarioEntry {
        let mut grid: ScheduleGrid = BTreeMap::new();
        let mut days = BTreeMap::new();
        days.insert(
            "Lunes".to_string(),
            GridCell {
                groups: group_codes.iter().map(|c| AcademicGroupCode(c.to_string())).collect(),
                mixed: group_codes.len() > 1,
            },
        );
        grid.insert("09:30-11:30".to_string(), days);
        HorarioEntry { grid }
    }

    fn make_teacher(id: &str) -> Teacher {
        Teacher {
            id: crate::types::TeacherId(id.to_string()),
            nombre: "Ana".into(),
            apellidos: "Lopez".into(),
            taught_subjects: Set::from([SubjectCode("FIS201".into())]),
            working_days: Set::from([Weekday::Lunes]),
            blocked_ranges: BTreeMap::new(),
            unavailable_dates: Set::new(),
        }
    }

    fn make_room(name: &str, capacity: u32) -> Room {
        Room {
            name: RoomName(name.to_string()),
            capacity,
            available: true,
            associated_subjects: Set::from([SubjectCode("FIS201".into())]),
            unavailable_dates: Set::new(),
        }
    }

    fn make_student(id: &str, group: &str, enrolled: bool) -> Student {
        let mut subjects = BTreeMap::new();
        subjects.insert(
            SubjectCode("FIS201".into()),
            SubjectEnrollment {
                enrolled,
                group_override: None,
            },
        );
        Student {
            id: StudentId(id.to_string()),
            academic_groups: vec![AcademicGroupCode(group.to_string())],
            subjects,
        }
    }

    #[test]
    fn scenario_single_group_single_date() {
        let asignatura = make_asignatura(1, 0, 1, false);
        let horario = make_grid_single_slot(&["A404"]);

        let mut alumnos = Alumnos::default();
        for id in ["s1", "s2", "s3"] {
            alumnos.datos.insert(StudentId(id.into()), make_student(id, "A404", true));
        }
        let enrollment = EnrollmentIndex::build(&alumnos);

        let mut calendar = BTreeMap::new();
        calendar.insert("d1".into(), calendar_day("2025-02-03", Weekday::Lunes));

        let mut profs = Profesores::default();
        profs.datos.insert(crate::types::TeacherId("t1".into()), make_teacher("t1"));
        let mut aulas = Aulas::default();
        aulas.datos.insert(RoomName("Lab1".into()), make_room("Lab1", 20));

        let mut tracker = ResourceTracker::new(&profs, &aulas, 10_000);
        let mut conflicts = Vec::new();
        let mut advisories = Vec::new();

        let groups = plan_subject(
            "semestre_1",
            &SubjectCode("FIS201".into()),
            &asignatura,
            &horario,
            &enrollment,
            &calendar,
            &mut tracker,
            &mut conflicts,
            &mut advisories,
        );

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].students.len(), 3);
        assert!(groups[0].teacher_id.is_some());
        assert_eq!(groups[0].room, Some(RoomName("Lab1".into())));
        assert_eq!(groups[0].dates, vec!["03/02/2025".to_string()]);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn scenario_interleaving_two_groups() {
        let asignatura = make_asignatura(2, 0, 2, false);
        let horario = make_grid_single_slot(&["A404"]);

        let mut alumnos = Alumnos::default();
        for id in ["s1", "s2", "s3", "s4"] {
            alumnos.datos.insert(StudentId(id.into()), make_student(id, "A404", true));
        }
        let enrollment = EnrollmentIndex::build(&alumnos);

        let mut calendar = BTreeMap::new();
        for (i, d) in ["2025-02-03", "2025-02-10", "2025-02-17", "2025-02-24"]
            .iter()
            .enumerate()
        {
            calendar.insert(format!("d{i}"), calendar_day(d, Weekday::Lunes));
        }

        let mut profs = Profesores::default();
        profs.datos.insert(crate::types::TeacherId("t1".into()), make_teacher("t1"));
        let mut aulas = Aulas::default();
        aulas.datos.insert(RoomName("Lab1".into()), make_room("Lab1", 20));

        let mut tracker = ResourceTracker::new(&profs, &aulas, 10_000);
        let mut conflicts = Vec::new();
        let mut advisories = Vec::new();

        let groups = plan_subject(
            "semestre_1",
            &SubjectCode("FIS201".into()),
            &asignatura,
            &horario,
            &enrollment,
            &calendar,
            &mut tracker,
            &mut conflicts,
            &mut advisories,
        );

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].dates, vec!["24/02/2025".to_string(), "10/02/2025".to_string()]);
        assert_eq!(groups[1].dates, vec!["17/02/2025".to_string(), "03/02/2025".to_string()]);
    }

    #[test]
    fn no_matching_grid_slot_records_conflict_and_no_groups() {
        let asignatura = make_asignatura(1, 0, 1, false);
        let horario = HorarioEntry { grid: BTreeMap::new() };
        let alumnos = Alumnos::default();
        let enrollment = EnrollmentIndex::build(&alumnos);
        let calendar = BTreeMap::new();
        let profs = Profesores::default();
        let aulas = Aulas::default();
        let mut tracker = ResourceTracker::new(&profs, &aulas, 10_000);
        let mut conflicts = Vec::new();
        let mut advisories = Vec::new();

        let groups = plan_subject(
            "semestre_1",
            &SubjectCode("FIS201".into()),
            &asignatura,
            &horario,
            &enrollment,
            &calendar,
            &mut tracker,
            &mut conflicts,
            &mut advisories,
        );

        assert!(groups.is_empty());
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::NoCalendarForDay);
    }

    #[test]
    fn zero_planned_groups_yields_no_groups_and_no_conflicts() {
        let asignatura = make_asignatura(0, 0, 1, false);
        let horario = make_grid_single_slot(&["A404"]);
        let alumnos = Alumnos::default();
        let enrollment = EnrollmentIndex::build(&alumnos);
        let calendar = BTreeMap::new();
        let profs = Profesores::default();
        let aulas = Aulas::default();
        let mut tracker = ResourceTracker::new(&profs, &aulas, 10_000);
        let mut conflicts = Vec::new();
        let mut advisories = Vec::new();

        let groups = plan_subject(
            "semestre_1",
            &SubjectCode("FIS201".into()),
            &asignatura,
            &horario,
            &enrollment,
            &calendar,
            &mut tracker,
            &mut conflicts,
            &mut advisories,
        );

        assert!(groups.is_empty());
        assert!(conflicts.is_empty());
    }

    #[test]
    fn dual_students_land_only_in_mixed_groups() {
        let asignatura = make_asignatura(2, 1, 1, true);
        let horario = make_grid_single_slot(&["A404", "EE403"]);

        let mut alumnos = Alumnos::default();
        alumnos
            .datos
            .insert(StudentId("sx".into()), make_student("sx", "A404", true));
        let mut dual_student = make_student("dx", "EE403", true);
        dual_student.academic_groups = vec![AcademicGroupCode("EE403".into())];
        alumnos.datos.insert(StudentId("dx".into()), dual_student);
        let enrollment = EnrollmentIndex::build(&alumnos);

        let mut calendar = BTreeMap::new();
        calendar.insert("d1".into(), calendar_day("2025-02-03", Weekday::Lunes));

        let mut profs = Profesores::default();
        profs.datos.insert(crate::types::TeacherId("t1".into()), make_teacher("t1"));
        let mut aulas = Aulas::default();
        aulas.datos.insert(RoomName("Lab1".into()), make_room("Lab1", 20));

        let mut tracker = ResourceTracker::new(&profs, &aulas, 10_000);
        let mut conflicts = Vec::new();
        let mut advisories = Vec::new();

        let groups = plan_subject(
            "semestre_1",
            &SubjectCode("FIS201".into()),
            &asignatura,
            &horario,
            &enrollment,
            &calendar,
            &mut tracker,
            &mut conflicts,
            &mut advisories,
        );

        let dual_group = groups.iter().find(|g| g.students.iter().any(|s| s.0 == "dx"));
        assert!(dual_group.is_some());
        assert!(dual_group.unwrap().mixed);
    }
}
