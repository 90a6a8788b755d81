use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One atomic unit of course content as stored in the relational collection.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct CourseSlide {
    pub id: String,
    pub course_id: String,
    pub slide_number: i32,
    pub content: String,
}

/// A slide chunk returned by vector search, scored by similarity.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ScoredSlide {
    pub content: String,
    pub slide_number: i32,
    pub score: f64,
}

/// Embedded slide content as stored in the vector collection.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct VectorDocument {
    pub id: String,
    pub course_id: String,
    pub content_id: String,
    pub slide_number: i32,
    pub content: String,
    pub embedding: Vec<f32>,
    pub indexed_at: DateTime<Utc>,
}

impl VectorDocument {
    pub fn new(slide: &CourseSlide, embedding: Vec<f32>) -> Self {
        Self {
            id: format!("{}_{}_{}", slide.course_id, slide.id, slide.slide_number),
            course_id: slide.course_id.clone(),
            content_id: slide.id.clone(),
            slide_number: slide.slide_number,
            content: slide.content.clone(),
            embedding,
            indexed_at: Utc::now(),
        }
    }
}
