pub mod errors;
pub mod pagination;
pub mod registry;

pub use errors::ServiceError;
pub use registry::{CoursePatch, NewCourse, NewStudent, Registry, StudentPatch};
