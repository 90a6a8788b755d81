pub mod question_handler;

pub use question_handler::{
    delete_course, generate_questions, health_check, process_course, stats,
};
