use crate::{
    errors::ServiceError,
    handlers::common::{created_response, success_response, JsonBody},
    AppState,
};
use axum::{
    extract::State,
    response::Response,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct RegisterRequest {
    /// Display name; surrounding whitespace is ignored
    #[schema(example = "New Person")]
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub ok: bool,
    #[schema(example = "New Person")]
    pub name: String,
}

#[utoipa::path(
    get,
    path = "/api/submitters",
    responses(
        (status = 200, description = "Registered names, ascending", body = [String]),
        (status = 500, description = "Storage failure", body = crate::errors::ErrorResponse)
    ),
    tag = "submitters"
)]
pub async fn list_submitters(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let names = state.services.submitters.list().await?;
    Ok(success_response(names))
}

#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Submitter registered", body = RegisterResponse),
        (status = 400, description = "Name missing or blank", body = crate::errors::ErrorResponse),
        (status = 409, description = "Name already registered", body = crate::errors::ErrorResponse),
        (status = 500, description = "Storage failure", body = crate::errors::ErrorResponse)
    ),
    tag = "submitters"
)]
pub async fn register_submitter(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> Result<Response, ServiceError> {
    let name = state.services.submitters.register(payload.name).await?;
    Ok(created_response(RegisterResponse { ok: true, name }))
}

/// Creates the router for submitter endpoints
pub fn submitter_routes() -> Router<AppState> {
    Router::new()
        .route("/submitters", get(list_submitters))
        .route("/register", post(register_submitter))
}
