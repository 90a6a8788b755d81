use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Bson, Document},
    options::ReplaceOptions,
    Collection, IndexModel,
};

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    models::domain::{ScoredSlide, VectorDocument},
};

/// Vector-similarity side of content retrieval. Stores embedded slide chunks
/// and answers nearest-neighbor queries scoped to one course.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VectorRepository: Send + Sync {
    /// Upserts one embedded slide chunk; storing the same chunk twice is a
    /// no-op overwrite.
    async fn store(&self, document: VectorDocument) -> AppResult<()>;

    /// Returns up to `limit` chunks nearest to `embedding` within the course.
    async fn search_similar(
        &self,
        course_id: &str,
        embedding: &[f32],
        limit: usize,
    ) -> AppResult<Vec<ScoredSlide>>;

    /// Whether the course has at least one stored embedding.
    async fn course_exists(&self, course_id: &str) -> AppResult<bool>;

    /// Removes all embeddings for a course, returning how many were deleted.
    async fn delete_course(&self, course_id: &str) -> AppResult<u64>;

    /// Total number of embedded chunks across all courses.
    async fn count_documents(&self) -> AppResult<u64>;
}

pub struct MongoVectorRepository {
    collection: Collection<VectorDocument>,
    index_name: String,
}

impl MongoVectorRepository {
    pub fn new(db: &Database, config: &Config) -> Self {
        Self {
            collection: db.get_collection(&config.vectors_collection),
            index_name: config.vector_index_name.clone(),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for vector collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                mongodb::options::IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();
        self.collection.create_index(id_index).await?;

        let course_index = IndexModel::builder().keys(doc! { "course_id": 1 }).build();
        self.collection.create_index(course_index).await?;

        Ok(())
    }
}

#[async_trait]
impl VectorRepository for MongoVectorRepository {
    async fn store(&self, document: VectorDocument) -> AppResult<()> {
        let options = ReplaceOptions::builder().upsert(true).build();

        self.collection
            .replace_one(doc! { "id": &document.id }, &document)
            .with_options(options)
            .await?;

        Ok(())
    }

    async fn search_similar(
        &self,
        course_id: &str,
        embedding: &[f32],
        limit: usize,
    ) -> AppResult<Vec<ScoredSlide>> {
        let query_vector: Vec<Bson> = embedding.iter().map(|v| Bson::Double(*v as f64)).collect();

        // Atlas vector search; numCandidates oversamples so the course filter
        // does not starve the result set.
        let pipeline = vec![
            doc! {
                "$vectorSearch": {
                    "index": &self.index_name,
                    "path": "embedding",
                    "queryVector": query_vector,
                    "numCandidates": (limit * 20) as i32,
                    "limit": limit as i32,
                    "filter": { "course_id": course_id },
                }
            },
            doc! {
                "$project": {
                    "_id": 0,
                    "content": 1,
                    "slide_number": 1,
                    "score": { "$meta": "vectorSearchScore" },
                }
            },
        ];

        let cursor = self.collection.aggregate(pipeline).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;

        let mut hits = Vec::with_capacity(documents.len());
        for document in documents {
            let hit: ScoredSlide = mongodb::bson::from_document(document)?;
            hits.push(hit);
        }

        Ok(hits)
    }

    async fn course_exists(&self, course_id: &str) -> AppResult<bool> {
        let existing = self
            .collection
            .find_one(doc! { "course_id": course_id })
            .await?;

        Ok(existing.is_some())
    }

    async fn delete_course(&self, course_id: &str) -> AppResult<u64> {
        let result = self
            .collection
            .delete_many(doc! { "course_id": course_id })
            .await?;

        Ok(result.deleted_count)
    }

    async fn count_documents(&self) -> AppResult<u64> {
        let count = self.collection.count_documents(doc! {}).await?;
        Ok(count)
    }
}
