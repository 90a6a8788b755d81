use std::future::{ready, Ready};

use actix_web::{http::header::AUTHORIZATION, web, FromRequest, HttpRequest};

use crate::{app_state::AppState, auth::Claims, errors::AppError};

/// Extractor guarding handlers that require a bearer token. Validates the
/// Authorization header against the configured JWT service and exposes the
/// caller's claims.
pub struct AuthenticatedUser(pub Claims);

impl AuthenticatedUser {
    fn extract(req: &HttpRequest) -> Result<Claims, AppError> {
        let state = req
            .app_data::<web::Data<AppState>>()
            .ok_or_else(|| AppError::InternalError("App state not configured".to_string()))?;

        let auth_header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Unauthorized("Invalid authorization header format".to_string())
        })?;

        state.jwt_service.validate_token(token)
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(Self::extract(req).map(AuthenticatedUser))
    }
}
