use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use models::{Association, AssociationDraft};
use service::pagination::{Page, Pagination};

use crate::errors::JsonApiError;
use crate::routes::ServerState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Case-insensitive substring filter on the association name.
    pub search: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

#[utoipa::path(
    get, path = "/associations", tag = "registry",
    params(ListQuery),
    responses(
        (status = 200, description = "Paginated listing", body = crate::openapi::AssociationPageDoc)
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Page<Association>>, JsonApiError> {
    let pagination = Pagination {
        page: q.page.unwrap_or(1),
        per_page: q.page_size.unwrap_or(20),
    };
    let page = state
        .registry
        .list_registry(q.search.as_deref(), pagination)
        .await?;
    info!(total = page.total, page = page.page, "list associations");
    Ok(Json(page))
}

#[utoipa::path(
    get, path = "/associations/{id}", tag = "registry",
    params(("id" = u64, Path, description = "Association ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::AssociationDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
) -> Result<Json<Association>, JsonApiError> {
    Ok(Json(state.registry.get_registry(id).await?))
}

#[utoipa::path(
    put, path = "/associations/{id}", tag = "registry",
    params(("id" = u64, Path, description = "Association ID")),
    request_body = crate::openapi::AssociationDraftDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::AssociationDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
    Json(fields): Json<AssociationDraft>,
) -> Result<Json<Association>, JsonApiError> {
    let updated = state.registry.update_registry(id, fields).await?;
    info!(id = updated.id, "updated association");
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/associations/{id}", tag = "registry",
    params(("id" = u64, Path, description = "Association ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, JsonApiError> {
    state.registry.delete_registry(id).await?;
    info!(id, "deleted association");
    Ok(StatusCode::NO_CONTENT)
}
