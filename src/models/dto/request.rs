use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateQuestionsRequest {
    #[validate(length(min = 1, max = 200))]
    pub topic: String,

    #[validate(range(min = 1))]
    pub count: u32,

    #[validate(length(min = 1, max = 50))]
    pub difficulty: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProcessCourseRequest {
    #[validate(length(min = 1))]
    pub course_id: String,
}
