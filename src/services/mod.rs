pub mod chunker;
pub mod generation_service;
pub mod indexing_service;
pub mod llm;
pub mod retrieval_service;

pub use chunker::{chunk_context, SLIDE_MARKER};
pub use generation_service::{strip_fencing, GenerationService};
pub use indexing_service::IndexingService;
pub use llm::{EmbeddingClient, GeminiClient, LlmClient};
pub use retrieval_service::RetrievalService;
