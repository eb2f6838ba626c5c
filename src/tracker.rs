//! Resource Tracker (§4.3): the single source of truth for per-run
//! occupancy and teacher load. Modeled as one owned struct threaded
//! mutably through the planner (§9 design note) — no component
//! touches occupancy sets directly.

use crate::types::{Aulas, Profesores, RoomName, SubjectCode, Teacher, TeacherId, TimeRange, Weekday};
use std::collections::{BTreeMap, HashMap, HashSet};

fn slot_key(iso_date: &str, range: &TimeRange) -> String {
    format!("{iso_date}__{}", range.0)
}

pub struct ResourceTracker<'a> {
    profs: &'a Profesores,
    aulas: &'a Aulas,
    unconstrained_capacity: u32,

    teacher_occupied: HashMap<TeacherId, HashSet<String>>,
    room_occupied: HashMap<RoomName, HashSet<String>>,
    teacher_load_total: BTreeMap<TeacherId, u32>,
    teacher_load_per_subject: BTreeMap<(TeacherId, SubjectCode), u32>,
    primary_room_cache: BTreeMap<SubjectCode, Option<RoomName>>,
}

impl<'a> ResourceTracker<'a> {
    pub fn new(profs: &'a Profesores, aulas: &'a Aulas, unconstrained_capacity: u32) -> Self {
        Self {
            profs,
            aulas,
            unconstrained_capacity,
            teacher_occupied: HashMap::new(),
            room_occupied: HashMap::new(),
            teacher_load_total: BTreeMap::new(),
            teacher_load_per_subject: BTreeMap::new(),
            primary_room_cache: BTreeMap::new(),
        }
    }

    fn teacher(&self, id: &TeacherId) -> Option<&'a Teacher> {
        self.profs.datos.get(id)
    }

    pub fn teacher_display(&self, id: &TeacherId) -> Option<String> {
        self.teacher(id).map(|t| t.display_name())
    }

    /// Selects the best-ranked eligible teacher for `(subject, weekday,
    /// time-range)`, incrementing both load counters on selection
    /// (§4.3: "assignment is at group granularity"). Ranking tuple:
    /// `(load_total, load_per_subject, display_name, teacher_id)`,
    /// ascending.
    pub fn select_teacher(
        &mut self,
        subject: &SubjectCode,
        weekday: Weekday,
        range: &TimeRange,
    ) -> Option<TeacherId> {
        let mut candidates: Vec<(u32, u32, String, TeacherId)> = self
            .profs
            .datos
            .iter()
            .filter(|(_, t)| t.eligible_for_slot(subject, weekday, range))
            .map(|(id, t)| {
                let total = self.teacher_load_total.get(id).copied().unwrap_or(0);
                let per_subject = self
                    .teacher_load_per_subject
                    .get(&(id.clone(), subject.clone()))
                    .copied()
                    .unwrap_or(0);
                (total, per_subject, t.display_name(), id.clone())
            })
            .collect();

        candidates.sort();
        let (_, _, _, id) = candidates.into_iter().next()?;

        *self.teacher_load_total.entry(id.clone()).or_insert(0) += 1;
        *self
            .teacher_load_per_subject
            .entry((id.clone(), subject.clone()))
            .or_insert(0) += 1;

        Some(id)
    }

    pub fn teacher_date_blocked(&self, teacher: &TeacherId, ddmmyyyy: &str) -> bool {
        self.teacher(teacher)
            .map(|t| t.is_unavailable_on(ddmmyyyy))
            .unwrap_or(false)
    }

    pub fn teacher_free_on(&self, teacher: &TeacherId, iso_date: &str, range: &TimeRange) -> bool {
        let key = slot_key(iso_date, range);
        !self
            .teacher_occupied
            .get(teacher)
            .map(|s| s.contains(&key))
            .unwrap_or(false)
    }

    pub fn occupy_teacher(&mut self, teacher: &TeacherId, iso_date: &str, range: &TimeRange) {
        let key = slot_key(iso_date, range);
        self.teacher_occupied.entry(teacher.clone()).or_default().insert(key);
    }

    pub fn room_date_blocked(&self, room: &RoomName, ddmmyyyy: &str) -> bool {
        self.aulas
            .datos
            .get(room)
            .map(|r| r.is_unavailable_on(ddmmyyyy))
            .unwrap_or(false)
    }

    pub fn room_free_on(&self, room: &RoomName, iso_date: &str, range: &TimeRange) -> bool {
        let key = slot_key(iso_date, range);
        !self
            .room_occupied
            .get(room)
            .map(|s| s.contains(&key))
            .unwrap_or(false)
    }

    pub fn occupy_room(&mut self, room: &RoomName, iso_date: &str, range: &TimeRange) {
        let key = slot_key(iso_date, range);
        self.room_occupied.entry(room.clone()).or_default().insert(key);
    }

    /// The primary room for `subject`: the eligible room with
    /// greatest capacity, ties broken by the reverse-lexicographically
    /// greatest room name (`(capacity, name)` sorted descending on both
    /// fields). Cached per subject on first query.
    pub fn primary_room(&mut self, subject: &SubjectCode) -> Option<RoomName> {
        if let Some(cached) = self.primary_room_cache.get(subject) {
            return cached.clone();
        }
        let mut candidates: Vec<(u32, RoomName)> = self
            .aulas
            .datos
            .iter()
            .filter(|(_, r)| r.eligible_for(subject))
            .map(|(name, r)| (r.capacity, name.clone()))
            .collect();
        candidates.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.cmp(&a.1)));
        let chosen = candidates.into_iter().next().map(|(_, name)| name);
        self.primary_room_cache.insert(subject.clone(), chosen.clone());
        chosen
    }

    /// Eligible rooms for `subject` in priority order: primary room
    /// first, then remaining eligible rooms in insertion (map) order.
    pub fn eligible_rooms(&mut self, subject: &SubjectCode) -> Vec<RoomName> {
        let primary = self.primary_room(subject);
        let mut out: Vec<RoomName> = self
            .aulas
            .datos
            .iter()
            .filter(|(_, r)| r.eligible_for(subject))
            .map(|(name, _)| name.clone())
            .collect();
        if let Some(primary) = primary {
            if let Some(pos) = out.iter().position(|n| n == &primary) {
                out.remove(pos);
            }
            out.insert(0, primary);
        }
        out
    }

    /// Integer capacity of `room`, or the configured unconstrained
    /// sentinel if `room` is `None` (signals an unconstrained
    /// placeholder during group-shell construction).
    pub fn capacity_of(&self, room: Option<&RoomName>) -> u32 {
        match room {
            Some(name) => self
                .aulas
                .datos
                .get(name)
                .map(|r| r.capacity)
                .unwrap_or(self.unconstrained_capacity),
            None => self.unconstrained_capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Room, Teacher};
    use std::collections::{BTreeMap, BTreeSet};

    fn teacher(id: &str, subjects: &[&str], days: &[Weekday]) -> Teacher {
        Teacher {
            id: TeacherId(id.to_string()),
            nombre: id.to_string(),
            apellidos: "".to_string(),
            taught_subjects: subjects.iter().map(|s| SubjectCode(s.to_string())).collect(),
            working_days: days.iter().copied().collect(),
            blocked_ranges: BTreeMap::new(),
            unavailable_dates: BTreeSet::new(),
        }
    }

    #[test]
    fn select_teacher_prefers_least_loaded() {
        let mut profs = Profesores::default();
        profs
            .datos
            .insert(TeacherId("t1".into()), teacher("t1", &["FIS201"], &[Weekday::Lunes]));
        profs
            .datos
            .insert(TeacherId("t2".into()), teacher("t2", &["FIS201"], &[Weekday::Lunes]));
        let aulas = Aulas::default();

        let mut tracker = ResourceTracker::new(&profs, &aulas, 10_000);
        let subject = SubjectCode("FIS201".into());
        let range = TimeRange("09:30-11:30".into());

        let first = tracker.select_teacher(&subject, Weekday::Lunes, &range).unwrap();
        let second = tracker.select_teacher(&subject, Weekday::Lunes, &range).unwrap();
        assert_ne!(first, second, "load balancing should alternate teachers");
    }

    #[test]
    fn select_teacher_excludes_non_working_days() {
        let mut profs = Profesores::default();
        profs
            .datos
            .insert(TeacherId("t1".into()), teacher("t1", &["FIS201"], &[Weekday::Martes]));
        let aulas = Aulas::default();
        let mut tracker = ResourceTracker::new(&profs, &aulas, 10_000);
        let subject = SubjectCode("FIS201".into());
        let range = TimeRange("09:30-11:30".into());
        assert!(tracker.select_teacher(&subject, Weekday::Lunes, &range).is_none());
    }

    #[test]
    fn primary_room_picks_highest_capacity_then_reverse_lexicographic() {
        let mut aulas = Aulas::default();
        aulas.datos.insert(
            RoomName("B".into()),
            Room {
                name: RoomName("B".into()),
                capacity: 20,
                available: true,
                associated_subjects: [SubjectCode("FIS201".into())].into_iter().collect(),
                unavailable_dates: Default::default(),
            },
        );
        aulas.datos.insert(
            RoomName("A".into()),
            Room {
                name: RoomName("A".into()),
                capacity: 20,
                available: true,
                associated_subjects: [SubjectCode("FIS201".into())].into_iter().collect(),
                unavailable_dates: Default::default(),
            },
        );
        let profs = Profesores::default();
        let mut tracker = ResourceTracker::new(&profs, &aulas, 10_000);
        let subject = SubjectCode("FIS201".into());
        assert_eq!(tracker.primary_room(&subject), Some(RoomName("B".into())));
    }

    #[test]
    fn capacity_of_none_room_is_sentinel() {
        let profs = Profesores::default();
        let aulas = Aulas::default();
        let tracker = ResourceTracker::new(&profs, &aulas, 10_000);
        assert_eq!(tracker.capacity_of(None), 10_000);
    }
}
