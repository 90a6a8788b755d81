use secrecy::SecretString;
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub courses_collection: String,
    pub contents_collection: String,
    pub vectors_collection: String,
    pub vector_index_name: String,
    pub gemini_api_key: SecretString,
    pub gemini_model: String,
    pub embedding_model: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwt_secret: SecretString,
    pub max_slides_per_chunk: usize,
    pub retrieval_top_k: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "compiz-local".to_string()),
            courses_collection: env::var("COURSES_COLLECTION")
                .unwrap_or_else(|_| "courses".to_string()),
            contents_collection: env::var("CONTENTS_COLLECTION")
                .unwrap_or_else(|_| "course_contents".to_string()),
            vectors_collection: env::var("VECTORS_COLLECTION")
                .unwrap_or_else(|_| "course_content_vectors".to_string()),
            vector_index_name: env::var("VECTOR_INDEX_NAME")
                .unwrap_or_else(|_| "course_content_vector_index".to_string()),
            gemini_api_key: SecretString::from(
                env::var("GEMINI_API_KEY").unwrap_or_else(|_| "dev_gemini_api_key".to_string()),
            ),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash-lite".to_string()),
            embedding_model: env::var("EMBEDDING_MODEL")
                .unwrap_or_else(|_| "text-embedding-004".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: SecretString::from(
                env::var("JWT_SECRET")
                    .unwrap_or_else(|_| "dev_secret_key_change_in_production".to_string()),
            ),
            max_slides_per_chunk: env::var("MAX_SLIDES_PER_CHUNK")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            retrieval_top_k: env::var("RETRIEVAL_TOP_K")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        }
    }

    /// Validate that production-critical configuration is set
    /// Panics if required secrets are using default values
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        let jwt_secret = self.jwt_secret.expose_secret();
        let api_key = self.gemini_api_key.expose_secret();

        if jwt_secret == "dev_secret_key_change_in_production" {
            panic!(
                "FATAL: JWT_SECRET is using default value! Set JWT_SECRET environment variable to a secure random string."
            );
        }

        if jwt_secret.len() < 32 {
            panic!(
                "FATAL: JWT_SECRET is too short ({}). Must be at least 32 characters for security.",
                jwt_secret.len()
            );
        }

        if api_key == "dev_gemini_api_key" {
            panic!(
                "FATAL: GEMINI_API_KEY is using default value! Set GEMINI_API_KEY environment variable."
            );
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "compiz-test".to_string(),
            courses_collection: "courses".to_string(),
            contents_collection: "course_contents".to_string(),
            vectors_collection: "course_content_vectors".to_string(),
            vector_index_name: "course_content_vector_index".to_string(),
            gemini_api_key: SecretString::from("test_api_key".to_string()),
            gemini_model: "gemini-2.5-flash-lite".to_string(),
            embedding_model: "text-embedding-004".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            max_slides_per_chunk: 5,
            retrieval_top_k: 5,
        }
    }
}
