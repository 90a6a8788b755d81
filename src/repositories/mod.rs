pub mod course_repository;
pub mod vector_repository;

pub use course_repository::{CourseRepository, MongoCourseRepository};
pub use vector_repository::{MongoVectorRepository, VectorRepository};

#[cfg(test)]
pub use course_repository::MockCourseRepository;
#[cfg(test)]
pub use vector_repository::MockVectorRepository;
