use std::sync::Arc;

use uuid::Uuid;

use crate::{
    errors::AppResult,
    repositories::{CourseRepository, VectorRepository},
    services::llm::EmbeddingClient,
};

/// Gateway over the two content-sourcing strategies.
///
/// Context presence is binary: either the full course content (keyword path)
/// or the top-K semantically nearest slides (vector path), never a hybrid.
/// The vector path is used only when the course has already been indexed.
pub struct RetrievalService {
    courses: Arc<dyn CourseRepository>,
    vectors: Arc<dyn VectorRepository>,
    embeddings: Arc<dyn EmbeddingClient>,
    top_k: usize,
}

impl RetrievalService {
    pub fn new(
        courses: Arc<dyn CourseRepository>,
        vectors: Arc<dyn VectorRepository>,
        embeddings: Arc<dyn EmbeddingClient>,
        top_k: usize,
    ) -> Self {
        Self {
            courses,
            vectors,
            embeddings,
            top_k,
        }
    }

    /// Fetches grounding context for a topic. Retrieval failures are never
    /// propagated: the request falls back to no-context generation.
    pub async fn fetch_context(&self, request_id: Uuid, topic: &str) -> Option<String> {
        match self.try_fetch_context(topic).await {
            Ok(context) => context,
            Err(err) => {
                log::warn!(
                    "[{}] content retrieval unavailable, generating without context: {}",
                    request_id,
                    err
                );
                None
            }
        }
    }

    async fn try_fetch_context(&self, topic: &str) -> AppResult<Option<String>> {
        let Some(course_id) = self.courses.find_course_by_topic(topic).await? else {
            return Ok(None);
        };

        if self.vectors.course_exists(&course_id).await? {
            let query = self.embeddings.embed_query(topic).await?;
            let mut hits = self
                .vectors
                .search_similar(&course_id, &query, self.top_k)
                .await?;

            if !hits.is_empty() {
                // Restore reading order regardless of similarity ranking.
                hits.sort_by_key(|hit| hit.slide_number);

                let context = hits
                    .iter()
                    .map(|hit| hit.content.as_str())
                    .collect::<Vec<_>>()
                    .join("\n\n");

                if !context.trim().is_empty() {
                    return Ok(Some(context));
                }
            }
        }

        let slides = self.courses.get_course_contents(&course_id).await?;
        if slides.is_empty() {
            return Ok(None);
        }

        let context = slides
            .iter()
            .map(|slide| format!("**Slide {}**\n{}", slide.slide_number, slide.content))
            .collect::<Vec<_>>()
            .join("\n\n");

        Ok(Some(context))
    }
}
