use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{MongoCourseRepository, MongoVectorRepository},
    services::{GeminiClient, GenerationService, IndexingService, RetrievalService},
};

#[derive(Clone)]
pub struct AppState {
    pub generation_service: Arc<GenerationService>,
    pub retrieval_service: Arc<RetrievalService>,
    pub indexing_service: Arc<IndexingService>,
    pub jwt_service: JwtService,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let course_repository = Arc::new(MongoCourseRepository::new(&db, &config));
        course_repository.ensure_indexes().await?;

        let vector_repository = Arc::new(MongoVectorRepository::new(&db, &config));
        vector_repository.ensure_indexes().await?;

        let gemini = Arc::new(GeminiClient::new(&config));

        let generation_service = Arc::new(GenerationService::new(gemini.clone()));
        let retrieval_service = Arc::new(RetrievalService::new(
            course_repository.clone(),
            vector_repository.clone(),
            gemini.clone(),
            config.retrieval_top_k,
        ));
        let indexing_service = Arc::new(IndexingService::new(
            course_repository,
            vector_repository,
            gemini,
        ));

        let jwt_service = JwtService::new(&config.jwt_secret, 24);

        Ok(Self {
            generation_service,
            retrieval_service,
            indexing_service,
            jwt_service,
            config: Arc::new(config),
        })
    }
}
