use crate::{
    entities::parts_log::Model as PartsLogEntry,
    errors::ServiceError,
    handlers::common::{created_response, success_response, JsonBody},
    services::parts_log::{NewPartsLogEntry, CSV_CONTENT_TYPE, CSV_FILENAME},
    AppState,
};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitEntryResponse {
    pub ok: bool,
    pub entry: PartsLogEntry,
}

#[utoipa::path(
    post,
    path = "/api/partslog",
    request_body = NewPartsLogEntry,
    responses(
        (status = 201, description = "Entry appended", body = SubmitEntryResponse),
        (status = 400, description = "Malformed JSON body", body = crate::errors::ErrorResponse),
        (status = 500, description = "Storage failure", body = crate::errors::ErrorResponse)
    ),
    tag = "partslog"
)]
pub async fn submit_entry(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewPartsLogEntry>,
) -> Result<Response, ServiceError> {
    let entry = state.services.parts_log.submit(payload).await?;
    Ok(created_response(SubmitEntryResponse { ok: true, entry }))
}

#[utoipa::path(
    get,
    path = "/api/partslog",
    responses(
        (status = 200, description = "All entries, newest first", body = [PartsLogEntry]),
        (status = 500, description = "Storage failure", body = crate::errors::ErrorResponse)
    ),
    tag = "partslog"
)]
pub async fn list_entries(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let entries = state.services.parts_log.list().await?;
    Ok(success_response(entries))
}

#[utoipa::path(
    get,
    path = "/api/partslog/csv",
    responses(
        (status = 200, description = "CSV export, newest first; empty body when the log is empty", content_type = "text/csv", body = String),
        (status = 500, description = "Storage failure", body = crate::errors::ErrorResponse)
    ),
    tag = "partslog"
)]
pub async fn export_csv(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let body = state.services.parts_log.export_csv().await?;
    let disposition = format!("attachment; filename=\"{}\"", CSV_FILENAME);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

/// Creates the router for movement log endpoints
pub fn parts_log_routes() -> Router<AppState> {
    Router::new()
        .route("/partslog", get(list_entries).post(submit_entry))
        .route("/partslog/csv", get(export_csv))
}
