use crate::models::domain::{CourseSlide, QuestionRecord, QuestionType};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// Creates a standard multiple-choice question record
    pub fn mcq_question(text: &str) -> QuestionRecord {
        QuestionRecord {
            question_type: QuestionType::Mcq,
            question: text.to_string(),
            options: Some(vec![
                "Option A".to_string(),
                "Option B".to_string(),
                "Option C".to_string(),
                "Option D".to_string(),
            ]),
            correct_answer: "Option A".to_string(),
            explanation: "Option A is correct.".to_string(),
        }
    }

    /// Creates a standard true/false question record
    pub fn true_false_question(text: &str) -> QuestionRecord {
        QuestionRecord {
            question_type: QuestionType::TrueFalse,
            question: text.to_string(),
            options: None,
            correct_answer: "True".to_string(),
            explanation: "The statement holds.".to_string(),
        }
    }

    /// Creates numbered slides for a course
    pub fn course_slides(course_id: &str, count: usize) -> Vec<CourseSlide> {
        (1..=count)
            .map(|n| CourseSlide {
                id: format!("content-{}", n),
                course_id: course_id.to_string(),
                slide_number: n as i32,
                content: format!("Content of slide {}", n),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::QuestionType;

    #[test]
    fn test_fixtures_mcq_question() {
        let question = mcq_question("Which one?");
        assert_eq!(question.question_type, QuestionType::Mcq);
        assert_eq!(question.options.as_ref().unwrap().len(), 4);
    }

    #[test]
    fn test_fixtures_true_false_question() {
        let question = true_false_question("Is it so?");
        assert_eq!(question.question_type, QuestionType::TrueFalse);
        assert!(question.options.is_none());
        assert_eq!(question.correct_answer, "True");
    }

    #[test]
    fn test_fixtures_course_slides() {
        let slides = course_slides("course-1", 3);
        assert_eq!(slides.len(), 3);
        assert_eq!(slides[0].slide_number, 1);
        assert_eq!(slides[2].content, "Content of slide 3");
    }
}
