//! In-memory registry of students, courses and enrollments.
//!
//! The registry is the single owner of entity state and the single place
//! business rules are enforced: uniqueness of student emails and course
//! titles, the per-course enrollment capacity, and the delete guards for
//! entities still referenced by an enrollment. Controllers only translate
//! HTTP requests into calls here and map the typed results back to statuses.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use models::{Course, Enrollment, Student};

use crate::errors::ServiceError;

/// Attributes for a new student; ids are assigned by the registry.
#[derive(Clone, Debug)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
}

/// Attributes for a new course.
#[derive(Clone, Debug)]
pub struct NewCourse {
    pub title: String,
    pub teacher: String,
}

/// Partial update for a student; only supplied fields change.
#[derive(Clone, Debug, Default)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Partial update for a course.
#[derive(Clone, Debug, Default)]
pub struct CoursePatch {
    pub title: Option<String>,
    pub teacher: Option<String>,
}

#[derive(Default)]
struct State {
    students: Vec<Student>,
    courses: Vec<Course>,
    enrollments: Vec<Enrollment>,
    // Monotonic per-collection counters; ids are never reused after deletion.
    next_student_id: u32,
    next_course_id: u32,
}

/// Cloneable handle to the shared in-memory store.
///
/// Each operation takes the lock exactly once, so validation and mutation
/// are atomic with respect to other requests.
#[derive(Clone, Default)]
pub struct Registry {
    inner: Arc<RwLock<State>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// All students in insertion order.
    pub async fn list_students(&self) -> Vec<Student> {
        self.inner.read().await.students.clone()
    }

    /// All courses in insertion order.
    pub async fn list_courses(&self) -> Vec<Course> {
        self.inner.read().await.courses.clone()
    }

    pub async fn get_student(&self, id: u32) -> Option<Student> {
        let state = self.inner.read().await;
        state.students.iter().find(|s| s.id == id).cloned()
    }

    pub async fn get_course(&self, id: u32) -> Option<Course> {
        let state = self.inner.read().await;
        state.courses.iter().find(|c| c.id == id).cloned()
    }

    pub async fn create_student(&self, input: NewStudent) -> Result<Student, ServiceError> {
        let mut state = self.inner.write().await;
        if state.students.iter().any(|s| s.email == input.email) {
            return Err(ServiceError::DuplicateEmail);
        }
        state.next_student_id += 1;
        let student = Student {
            id: state.next_student_id,
            name: input.name,
            email: input.email,
        };
        state.students.push(student.clone());
        debug!(id = student.id, "student created");
        Ok(student)
    }

    pub async fn create_course(&self, input: NewCourse) -> Result<Course, ServiceError> {
        let mut state = self.inner.write().await;
        if state.courses.iter().any(|c| c.title == input.title) {
            return Err(ServiceError::DuplicateTitle);
        }
        state.next_course_id += 1;
        let course = Course {
            id: state.next_course_id,
            title: input.title,
            teacher: input.teacher,
            capacity: Course::CAPACITY,
        };
        state.courses.push(course.clone());
        debug!(id = course.id, "course created");
        Ok(course)
    }

    /// Apply a partial update; email uniqueness is re-checked against all
    /// other students before anything changes.
    pub async fn update_student(
        &self,
        id: u32,
        patch: StudentPatch,
    ) -> Result<Student, ServiceError> {
        let mut state = self.inner.write().await;
        if !state.students.iter().any(|s| s.id == id) {
            return Err(ServiceError::StudentNotFound);
        }
        if let Some(email) = &patch.email {
            if state.students.iter().any(|s| s.email == *email && s.id != id) {
                return Err(ServiceError::DuplicateEmail);
            }
        }
        let student = state
            .students
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(ServiceError::StudentNotFound)?;
        if let Some(name) = patch.name {
            student.name = name;
        }
        if let Some(email) = patch.email {
            student.email = email;
        }
        Ok(student.clone())
    }

    pub async fn update_course(&self, id: u32, patch: CoursePatch) -> Result<Course, ServiceError> {
        let mut state = self.inner.write().await;
        if !state.courses.iter().any(|c| c.id == id) {
            return Err(ServiceError::CourseNotFound);
        }
        if let Some(title) = &patch.title {
            if state.courses.iter().any(|c| c.title == *title && c.id != id) {
                return Err(ServiceError::DuplicateTitle);
            }
        }
        let course = state
            .courses
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(ServiceError::CourseNotFound)?;
        if let Some(title) = patch.title {
            course.title = title;
        }
        if let Some(teacher) = patch.teacher {
            course.teacher = teacher;
        }
        Ok(course.clone())
    }

    /// Delete a student unless an active enrollment still references it.
    pub async fn remove_student(&self, id: u32) -> Result<(), ServiceError> {
        let mut state = self.inner.write().await;
        let pos = state
            .students
            .iter()
            .position(|s| s.id == id)
            .ok_or(ServiceError::StudentNotFound)?;
        if state.enrollments.iter().any(|e| e.student_id == id) {
            return Err(ServiceError::StudentEnrolled);
        }
        state.students.remove(pos);
        debug!(id, "student removed");
        Ok(())
    }

    /// Delete a course with the same enrollment guard as students; there is
    /// no cascading removal of enrollments.
    pub async fn remove_course(&self, id: u32) -> Result<(), ServiceError> {
        let mut state = self.inner.write().await;
        let pos = state
            .courses
            .iter()
            .position(|c| c.id == id)
            .ok_or(ServiceError::CourseNotFound)?;
        if state.enrollments.iter().any(|e| e.course_id == id) {
            return Err(ServiceError::CourseHasEnrollments);
        }
        state.courses.remove(pos);
        debug!(id, "course removed");
        Ok(())
    }

    /// Record an enrollment. Re-enrolling an existing pair is an idempotent
    /// no-op returning the existing record, so it never eats a seat.
    pub async fn enroll(&self, student_id: u32, course_id: u32) -> Result<Enrollment, ServiceError> {
        let mut state = self.inner.write().await;
        if !state.courses.iter().any(|c| c.id == course_id) {
            return Err(ServiceError::CourseNotFound);
        }
        if !state.students.iter().any(|s| s.id == student_id) {
            return Err(ServiceError::StudentNotFound);
        }
        if let Some(existing) = state
            .enrollments
            .iter()
            .find(|e| e.student_id == student_id && e.course_id == course_id)
        {
            return Ok(*existing);
        }
        let seats_taken = state
            .enrollments
            .iter()
            .filter(|e| e.course_id == course_id)
            .count();
        if seats_taken >= Course::CAPACITY as usize {
            return Err(ServiceError::CourseFull);
        }
        let enrollment = Enrollment { student_id, course_id };
        state.enrollments.push(enrollment);
        debug!(student_id, course_id, "student enrolled");
        Ok(enrollment)
    }

    pub async fn unenroll(&self, student_id: u32, course_id: u32) -> Result<(), ServiceError> {
        let mut state = self.inner.write().await;
        let pos = state
            .enrollments
            .iter()
            .position(|e| e.student_id == student_id && e.course_id == course_id)
            .ok_or(ServiceError::EnrollmentNotFound)?;
        state.enrollments.remove(pos);
        debug!(student_id, course_id, "student unenrolled");
        Ok(())
    }

    /// Courses the student currently holds an active enrollment in, in
    /// enrollment order.
    pub async fn student_courses(&self, student_id: u32) -> Vec<Course> {
        let state = self.inner.read().await;
        state
            .enrollments
            .iter()
            .filter(|e| e.student_id == student_id)
            .filter_map(|e| state.courses.iter().find(|c| c.id == e.course_id))
            .cloned()
            .collect()
    }

    /// Clear all collections and id counters.
    pub async fn reset(&self) {
        let mut state = self.inner.write().await;
        *state = State::default();
    }

    /// Populate deterministic demo fixtures: three students and two courses.
    pub async fn seed(&self) {
        let mut state = self.inner.write().await;
        for (name, email) in [
            ("Alice", "alice@example.com"),
            ("Bob", "bob@example.com"),
            ("Charlie", "charlie@example.com"),
        ] {
            state.next_student_id += 1;
            let student = Student {
                id: state.next_student_id,
                name: name.into(),
                email: email.into(),
            };
            state.students.push(student);
        }
        for (title, teacher) in [("Math", "Mr. Smith"), ("Physics", "Ms. Curie")] {
            state.next_course_id += 1;
            let course = Course {
                id: state.next_course_id,
                title: title.into(),
                teacher: teacher.into(),
                capacity: Course::CAPACITY,
            };
            state.courses.push(course);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded() -> Registry {
        let registry = Registry::new();
        registry.seed().await;
        registry
    }

    #[tokio::test]
    async fn seed_populates_three_students_and_two_courses() {
        let registry = seeded().await;
        let students = registry.list_students().await;
        assert_eq!(students.len(), 3);
        assert_eq!(students[0].name, "Alice");
        assert_eq!(registry.list_courses().await.len(), 2);
    }

    #[tokio::test]
    async fn create_then_get_returns_fresh_id_and_matching_fields() {
        let registry = seeded().await;
        let existing: Vec<u32> = registry.list_students().await.iter().map(|s| s.id).collect();
        let created = registry
            .create_student(NewStudent { name: "David".into(), email: "david@example.com".into() })
            .await
            .unwrap();
        assert!(!existing.contains(&created.id));
        let fetched = registry.get_student(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(registry.list_students().await.len(), 4);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_without_growing_collection() {
        let registry = seeded().await;
        registry
            .create_student(NewStudent { name: "David".into(), email: "david@example.com".into() })
            .await
            .unwrap();
        let err = registry
            .create_student(NewStudent { name: "Eve".into(), email: "alice@example.com".into() })
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::DuplicateEmail);
        assert_eq!(err.to_string(), "Email must be unique");
        assert_eq!(registry.list_students().await.len(), 4);
    }

    #[tokio::test]
    async fn duplicate_course_title_is_rejected() {
        let registry = seeded().await;
        let err = registry
            .create_course(NewCourse { title: "Math".into(), teacher: "Someone".into() })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Course title must be unique");
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_deletion() {
        let registry = Registry::new();
        let a = registry
            .create_student(NewStudent { name: "A".into(), email: "a@example.com".into() })
            .await
            .unwrap();
        registry.remove_student(a.id).await.unwrap();
        let b = registry
            .create_student(NewStudent { name: "B".into(), email: "b@example.com".into() })
            .await
            .unwrap();
        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn fourth_enrollment_hits_capacity() {
        let registry = seeded().await;
        let course = registry.list_courses().await[0].clone();
        let extra = registry
            .create_student(NewStudent { name: "Extra".into(), email: "extra@example.com".into() })
            .await
            .unwrap();
        let students = registry.list_students().await;
        registry.enroll(students[0].id, course.id).await.unwrap();
        registry.enroll(students[1].id, course.id).await.unwrap();
        registry.enroll(students[2].id, course.id).await.unwrap();
        let err = registry.enroll(extra.id, course.id).await.unwrap_err();
        assert_eq!(err, ServiceError::CourseFull);
        assert_eq!(err.to_string(), "Course is full");
    }

    #[tokio::test]
    async fn re_enrolling_same_pair_is_idempotent() {
        let registry = seeded().await;
        let course = registry.list_courses().await[0].clone();
        registry.enroll(1, course.id).await.unwrap();
        registry.enroll(1, course.id).await.unwrap();
        assert_eq!(registry.student_courses(1).await.len(), 1);
        // The duplicate must not consume a seat.
        registry.enroll(2, course.id).await.unwrap();
        registry.enroll(3, course.id).await.unwrap();
    }

    #[tokio::test]
    async fn enroll_checks_both_ids_exist() {
        let registry = seeded().await;
        assert_eq!(
            registry.enroll(1, 999).await.unwrap_err(),
            ServiceError::CourseNotFound
        );
        assert_eq!(
            registry.enroll(999, 1).await.unwrap_err(),
            ServiceError::StudentNotFound
        );
    }

    #[tokio::test]
    async fn enrolled_student_cannot_be_deleted() {
        let registry = seeded().await;
        let student = registry.list_students().await[0].clone();
        let course = registry.list_courses().await[0].clone();
        registry.enroll(student.id, course.id).await.unwrap();
        let err = registry.remove_student(student.id).await.unwrap_err();
        assert_eq!(err.to_string(), "Cannot delete student: enrolled in a course");
        assert!(registry.get_student(student.id).await.is_some());
    }

    #[tokio::test]
    async fn course_with_enrollments_cannot_be_deleted() {
        let registry = seeded().await;
        let course = registry.list_courses().await[0].clone();
        registry.enroll(1, course.id).await.unwrap();
        let err = registry.remove_course(course.id).await.unwrap_err();
        assert_eq!(err, ServiceError::CourseHasEnrollments);
        assert!(registry.get_course(course.id).await.is_some());
    }

    #[tokio::test]
    async fn delete_of_unenrolled_entities_succeeds() {
        let registry = seeded().await;
        registry.remove_student(1).await.unwrap();
        assert!(registry.get_student(1).await.is_none());
        registry.remove_course(2).await.unwrap();
        assert!(registry.get_course(2).await.is_none());
        assert_eq!(
            registry.remove_student(999).await.unwrap_err(),
            ServiceError::StudentNotFound
        );
    }

    #[tokio::test]
    async fn unenroll_removes_pair_and_rejects_missing_pair() {
        let registry = seeded().await;
        let course = registry.list_courses().await[0].clone();
        assert_eq!(
            registry.unenroll(1, course.id).await.unwrap_err(),
            ServiceError::EnrollmentNotFound
        );

        registry.enroll(1, course.id).await.unwrap();
        assert!(registry
            .student_courses(1)
            .await
            .iter()
            .any(|c| c.id == course.id));

        registry.unenroll(1, course.id).await.unwrap();
        assert!(!registry
            .student_courses(1)
            .await
            .iter()
            .any(|c| c.id == course.id));
    }

    #[tokio::test]
    async fn update_student_changes_only_supplied_fields() {
        let registry = seeded().await;
        let updated = registry
            .update_student(1, StudentPatch { name: Some("Alice Updated".into()), email: None })
            .await
            .unwrap();
        assert_eq!(updated.name, "Alice Updated");
        assert_eq!(updated.email, "alice@example.com");

        let err = registry
            .update_student(1, StudentPatch { name: None, email: Some("bob@example.com".into()) })
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::DuplicateEmail);

        // A student may keep its own email through an update.
        registry
            .update_student(1, StudentPatch { name: None, email: Some("alice@example.com".into()) })
            .await
            .unwrap();

        assert_eq!(
            registry
                .update_student(999, StudentPatch::default())
                .await
                .unwrap_err(),
            ServiceError::StudentNotFound
        );
    }

    #[tokio::test]
    async fn update_course_enforces_title_uniqueness_excluding_self() {
        let registry = seeded().await;
        let courses = registry.list_courses().await;
        let err = registry
            .update_course(courses[1].id, CoursePatch { title: Some(courses[0].title.clone()), teacher: None })
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::DuplicateTitle);

        let updated = registry
            .update_course(
                courses[0].id,
                CoursePatch { title: Some("Updated Math".into()), teacher: Some("Mr. Updated".into()) },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "Updated Math");
        assert_eq!(updated.teacher, "Mr. Updated");
        assert_eq!(registry.get_course(courses[0].id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn reset_clears_state_and_counters() {
        let registry = seeded().await;
        registry.reset().await;
        assert!(registry.list_students().await.is_empty());
        assert!(registry.list_courses().await.is_empty());
        let first = registry
            .create_student(NewStudent { name: "A".into(), email: "a@example.com".into() })
            .await
            .unwrap();
        assert_eq!(first.id, 1);
    }
}
