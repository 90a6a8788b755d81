use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::VectorDocument,
    models::dto::response::{DeleteCourseResponse, ProcessCourseResponse, StatsResponse},
    repositories::{CourseRepository, VectorRepository},
    services::llm::EmbeddingClient,
};

/// Manages the vector index: embedding course slides, deleting a course's
/// vectors, and reporting index statistics.
pub struct IndexingService {
    courses: Arc<dyn CourseRepository>,
    vectors: Arc<dyn VectorRepository>,
    embeddings: Arc<dyn EmbeddingClient>,
}

impl IndexingService {
    pub fn new(
        courses: Arc<dyn CourseRepository>,
        vectors: Arc<dyn VectorRepository>,
        embeddings: Arc<dyn EmbeddingClient>,
    ) -> Self {
        Self {
            courses,
            vectors,
            embeddings,
        }
    }

    /// Embeds and stores every slide of a course. Idempotent: returns early
    /// when the course already has vectors. Slides that fail to embed are
    /// logged and skipped; they still count toward `total`.
    pub async fn process_course(&self, course_id: &str) -> AppResult<ProcessCourseResponse> {
        if self.vectors.course_exists(course_id).await? {
            log::info!("Course '{}' is already indexed, skipping", course_id);
            return Ok(ProcessCourseResponse {
                course_id: course_id.to_string(),
                already_indexed: true,
                processed: 0,
                total: 0,
            });
        }

        let slides = self.courses.get_course_contents(course_id).await?;
        if slides.is_empty() {
            return Err(AppError::NotFound(format!(
                "No content found for course '{}'",
                course_id
            )));
        }

        let total = slides.len();
        let mut processed = 0;

        for slide in &slides {
            if slide.content.trim().is_empty() {
                log::debug!(
                    "Course '{}' slide {} is empty, skipping",
                    course_id,
                    slide.slide_number
                );
                continue;
            }

            match self.embeddings.embed_document(&slide.content).await {
                Ok(embedding) => {
                    self.vectors
                        .store(VectorDocument::new(slide, embedding))
                        .await?;
                    processed += 1;
                }
                Err(err) => {
                    log::warn!(
                        "Failed to embed course '{}' slide {}, skipping: {}",
                        course_id,
                        slide.slide_number,
                        err
                    );
                }
            }
        }

        log::info!(
            "Indexed course '{}': {}/{} slides",
            course_id,
            processed,
            total
        );

        Ok(ProcessCourseResponse {
            course_id: course_id.to_string(),
            already_indexed: false,
            processed,
            total,
        })
    }

    pub async fn delete_course(&self, course_id: &str) -> AppResult<DeleteCourseResponse> {
        let deleted = self.vectors.delete_course(course_id).await?;

        log::info!("Deleted {} vectors for course '{}'", deleted, course_id);

        Ok(DeleteCourseResponse {
            course_id: course_id.to_string(),
            deleted,
        })
    }

    pub async fn stats(&self) -> AppResult<StatsResponse> {
        let total_documents = self.vectors.count_documents().await?;
        Ok(StatsResponse { total_documents })
    }
}
