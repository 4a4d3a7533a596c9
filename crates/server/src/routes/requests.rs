use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use models::{Association, AssociationDraft};

use crate::errors::JsonApiError;
use crate::routes::ServerState;

#[utoipa::path(
    post, path = "/requests", tag = "requests",
    request_body = crate::openapi::AssociationDraftDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::AssociationDoc),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Duplicate pending name")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(draft): Json<AssociationDraft>,
) -> Result<Json<Association>, JsonApiError> {
    let created = state.registry.create_request(draft).await?;
    info!(id = created.id, name = %created.name, "created registration request");
    Ok(Json(created))
}

#[utoipa::path(
    get, path = "/requests", tag = "requests",
    responses((status = 200, description = "Full pending queue"))
)]
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<Association>>, JsonApiError> {
    Ok(Json(state.registry.list_requests().await?))
}

#[utoipa::path(
    post, path = "/requests/{id}/approve", tag = "requests",
    params(("id" = u64, Path, description = "Pending request ID")),
    responses(
        (status = 200, description = "Approved", body = crate::openapi::AssociationDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn approve(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
) -> Result<Json<Association>, JsonApiError> {
    let approved = state.registry.approve_request(id).await?;
    info!(request_id = id, id = approved.id, "approved registration request");
    Ok(Json(approved))
}
