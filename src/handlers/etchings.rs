use crate::{
    errors::ServiceError, handlers::common::success_response, services::etchings::EtchingView,
    AppState,
};
use axum::{extract::State, response::Response, routing::get, Router};

#[utoipa::path(
    get,
    path = "/api/etchings",
    responses(
        (status = 200, description = "Known etchings in insertion order", body = [EtchingView]),
        (status = 500, description = "Storage failure", body = crate::errors::ErrorResponse)
    ),
    tag = "etchings"
)]
pub async fn list_etchings(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let etchings = state.services.etchings.list().await?;
    Ok(success_response(etchings))
}

/// Creates the router for etching endpoints
pub fn etching_routes() -> Router<AppState> {
    Router::new().route("/etchings", get(list_etchings))
}
