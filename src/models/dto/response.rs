use serde::Serialize;

use crate::models::domain::{QuestionRecord, QuestionType};

/// Public shape of one generated question. `options_json` is serialized even
/// when absent (as null) to match the existing API contract.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionDto {
    pub question_type: String,
    pub question_text: String,
    pub options_json: Option<Vec<String>>,
    pub correct_answer: String,
    pub explanation: String,
}

impl From<QuestionRecord> for QuestionDto {
    fn from(record: QuestionRecord) -> Self {
        let question_type = match record.question_type {
            QuestionType::Mcq => "mcq",
            QuestionType::TrueFalse => "true_false",
        };

        QuestionDto {
            question_type: question_type.to_string(),
            question_text: record.question,
            options_json: record.options,
            correct_answer: record.correct_answer,
            explanation: record.explanation,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionsPayload {
    pub questions: Vec<QuestionDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateQuestionsResponse {
    pub generated: usize,
    pub data: QuestionsPayload,
}

impl GenerateQuestionsResponse {
    pub fn from_records(records: Vec<QuestionRecord>) -> Self {
        let questions: Vec<QuestionDto> = records.into_iter().map(QuestionDto::from).collect();

        GenerateQuestionsResponse {
            generated: questions.len(),
            data: QuestionsPayload { questions },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessCourseResponse {
    pub course_id: String,
    pub already_indexed: bool,
    pub processed: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteCourseResponse {
    pub course_id: String,
    pub deleted: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub total_documents: u64,
}
