pub mod question;
pub mod slide;

pub use question::{QuestionRecord, QuestionType};
pub use slide::{CourseSlide, ScoredSlide, VectorDocument};
