use serde::{Deserialize, Serialize};

/// Question kind emitted by the model. The wire tags ("mcq", "true_false")
/// are fixed by the prompt's format directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Mcq,
    TrueFalse,
}

/// One generated quiz question, parsed straight from the model's JSON array.
///
/// `options` is present and non-empty only for `Mcq`. For `TrueFalse` the
/// `correct_answer` is the literal string "True" or "False" — it is an opaque
/// string, never parsed as a boolean.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionRecord {
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub correct_answer: String,
    pub explanation: String,
}
