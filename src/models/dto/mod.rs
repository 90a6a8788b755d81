pub mod request;
pub mod response;

pub use request::{GenerateQuestionsRequest, ProcessCourseRequest};
pub use response::{
    DeleteCourseResponse, GenerateQuestionsResponse, ProcessCourseResponse, QuestionDto,
    StatsResponse,
};
