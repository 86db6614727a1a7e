use serde::{Deserialize, Serialize};

/// A course offering. `title` is unique across the collection; every course
/// carries the same fixed seat capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: u32,
    pub title: String,
    pub teacher: String,
    pub capacity: u32,
}

impl Course {
    /// Maximum number of active enrollments per course.
    pub const CAPACITY: u32 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_constant_matches_field() {
        let c = Course {
            id: 1,
            title: "Math".into(),
            teacher: "Mr. Smith".into(),
            capacity: Course::CAPACITY,
        };
        assert_eq!(c.capacity, 3);
    }
}
