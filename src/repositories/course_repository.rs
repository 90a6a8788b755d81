use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::FindOptions, Collection, IndexModel};
use serde::{Deserialize, Serialize};

use crate::{config::Config, db::Database, errors::AppResult, models::domain::CourseSlide};

/// Relational-lookup side of content retrieval: topic to course, course to
/// ordered slides.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Returns the id of the first course whose title contains `topic`
    /// (case-insensitive), if any.
    async fn find_course_by_topic(&self, topic: &str) -> AppResult<Option<String>>;

    /// Returns all slides for a course, ordered by slide number ascending.
    async fn get_course_contents(&self, course_id: &str) -> AppResult<Vec<CourseSlide>>;
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct CourseDoc {
    id: String,
    title: String,
}

pub struct MongoCourseRepository {
    courses: Collection<CourseDoc>,
    contents: Collection<CourseSlide>,
}

impl MongoCourseRepository {
    pub fn new(db: &Database, config: &Config) -> Self {
        Self {
            courses: db.get_collection(&config.courses_collection),
            contents: db.get_collection(&config.contents_collection),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for course collections");

        let title_index = IndexModel::builder().keys(doc! { "title": 1 }).build();
        self.courses.create_index(title_index).await?;

        let slide_index = IndexModel::builder()
            .keys(doc! { "course_id": 1, "slide_number": 1 })
            .build();
        self.contents.create_index(slide_index).await?;

        Ok(())
    }
}

#[async_trait]
impl CourseRepository for MongoCourseRepository {
    async fn find_course_by_topic(&self, topic: &str) -> AppResult<Option<String>> {
        // Substring match, case-insensitive; the topic is escaped so user
        // input cannot inject regex syntax.
        let filter = doc! {
            "title": { "$regex": regex::escape(topic), "$options": "i" }
        };

        let course = self.courses.find_one(filter).await?;
        Ok(course.map(|c| c.id))
    }

    async fn get_course_contents(&self, course_id: &str) -> AppResult<Vec<CourseSlide>> {
        let find_options = FindOptions::builder()
            .sort(doc! { "slide_number": 1 })
            .build();

        let cursor = self
            .contents
            .find(doc! { "course_id": course_id })
            .with_options(find_options)
            .await?;
        let slides: Vec<CourseSlide> = cursor.try_collect().await?;

        Ok(slides)
    }
}
