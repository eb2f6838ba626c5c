use super::{AcademicGroupCode, RoomName, StudentId, SubjectCode, TeacherId, TimeRange, Weekday};

/// A scheduled lab cohort for one subject: the output unit of the
/// planner. Label is `<simple-code>-NN`, 1-based, zero-padded to 2.
#[derive(Debug, Clone)]
pub struct LabGroup {
    pub label: String,
    pub subject: SubjectCode,
    pub semester: String,
    pub weekday: Weekday,
    pub time_range: TimeRange,
    pub room: Option<RoomName>,
    pub teacher_id: Option<TeacherId>,
    pub teacher_display: Option<String>,
    pub mixed: bool,
    pub simple_code: AcademicGroupCode,
    pub dual_code: Option<AcademicGroupCode>,
    pub students: Vec<StudentId>,
    pub capacity: u32,
    pub dates: Vec<String>,
}

impl LabGroup {
    pub fn new(
        label: String,
        subject: SubjectCode,
        semester: String,
        weekday: Weekday,
        time_range: TimeRange,
        simple_code: AcademicGroupCode,
        dual_code: Option<AcademicGroupCode>,
    ) -> Self {
        Self {
            label,
            subject,
            semester,
            weekday,
            time_range,
            room: None,
            teacher_id: None,
            teacher_display: None,
            mixed: false,
            simple_code,
            dual_code,
            students: Vec::new(),
            capacity: 0,
            dates: Vec::new(),
        }
    }

    pub fn has_capacity(&self) -> bool {
        (self.students.len() as u32) < self.capacity
    }
}
