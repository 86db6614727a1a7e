use serde::{Deserialize, Serialize};

/// Active participation of one student in one course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub student_id: u32,
    pub course_id: u32,
}
