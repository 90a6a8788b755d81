use actix_web::{delete, get, post, web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::{GenerateQuestionsRequest, ProcessCourseRequest},
    models::dto::response::GenerateQuestionsResponse,
    services::chunker::chunk_context,
};

#[post("/ai/generate")]
async fn generate_questions(
    state: web::Data<AppState>,
    request: web::Json<GenerateQuestionsRequest>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let request_id = Uuid::new_v4();
    log::info!(
        "[{}] generating {} '{}' questions on '{}'",
        request_id,
        request.count,
        request.difficulty,
        request.topic
    );

    let context = state
        .retrieval_service
        .fetch_context(request_id, &request.topic)
        .await;

    let chunks = match &context {
        Some(context) => chunk_context(context, state.config.max_slides_per_chunk)?,
        None => Vec::new(),
    };

    let questions = state
        .generation_service
        .generate_batch(
            request_id,
            &request.topic,
            request.count as usize,
            &request.difficulty,
            &chunks,
        )
        .await?;

    log::info!(
        "[{}] produced {} of {} requested questions",
        request_id,
        questions.len(),
        request.count
    );

    Ok(HttpResponse::Ok().json(GenerateQuestionsResponse::from_records(questions)))
}

#[post("/ai/process-course")]
async fn process_course(
    state: web::Data<AppState>,
    request: web::Json<ProcessCourseRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let report = state
        .indexing_service
        .process_course(&request.course_id)
        .await?;

    Ok(HttpResponse::Ok().json(report))
}

#[delete("/ai/course/{course_id}")]
async fn delete_course(
    state: web::Data<AppState>,
    course_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .indexing_service
        .delete_course(&course_id.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[get("/ai/stats")]
async fn stats(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let response = state.indexing_service.stats().await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "compiz-ai-server",
    }))
}
