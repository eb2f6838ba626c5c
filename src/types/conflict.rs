use super::{SubjectCode, TimeRange, Weekday};

/// A recorded planning failure. Conflicts are informational — they
/// never halt planning — and are the authoritative record of what
/// could not be placed (§3, §7).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictKind {
    TeacherUnavailable,
    NoTeacherEligible,
    NoRoomSlot,
    InsufficientDates,
    NoCalendarForDay,
}

impl ConflictKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictKind::TeacherUnavailable => "teacher-unavailable",
            ConflictKind::NoTeacherEligible => "no-teacher-eligible",
            ConflictKind::NoRoomSlot => "no-room-slot",
            ConflictKind::InsufficientDates => "insufficient-dates",
            ConflictKind::NoCalendarForDay => "no-calendar-for-day",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub semester: String,
    pub subject: SubjectCode,
    pub group_label: String,
    pub weekday: Weekday,
    pub time_range: TimeRange,
    pub room: Option<String>,
    pub teacher: Option<String>,
    /// The first candidate date tried, if any.
    pub candidate_date: Option<String>,
    /// The remaining pool of candidate dates at the point of failure.
    pub candidate_dates: Vec<String>,
    pub detail: String,
}

impl Conflict {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        kind: ConflictKind,
        semester: impl Into<String>,
        subject: SubjectCode,
        group_label: impl Into<String>,
        weekday: Weekday,
        time_range: TimeRange,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            semester: semester.into(),
            subject,
            group_label: group_label.into(),
            weekday,
            time_range,
            room: None,
            teacher: None,
            candidate_date: None,
            candidate_dates: Vec::new(),
            detail: detail.into(),
        }
    }

    pub fn with_room(mut self, room: Option<String>) -> Self {
        self.room = room;
        self
    }

    pub fn with_teacher(mut self, teacher: Option<String>) -> Self {
        self.teacher = teacher;
        self
    }

    pub fn with_candidate(mut self, date: Option<String>, dates: Vec<String>) -> Self {
        self.candidate_date = date;
        self.candidate_dates = dates;
        self
    }
}
