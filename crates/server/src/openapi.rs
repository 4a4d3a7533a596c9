use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(ToSchema)]
pub struct AssociationDoc {
    pub id: u64,
    pub name: String,
    pub contact: String,
    pub address: String,
    pub breed: String,
}

#[derive(ToSchema)]
pub struct AssociationDraftDoc {
    pub name: String,
    pub contact: String,
    pub address: String,
    pub breed: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct AssociationPageDoc {
    pub items: Vec<AssociationDoc>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::associations::list,
        crate::routes::associations::get,
        crate::routes::associations::update,
        crate::routes::associations::delete,
        crate::routes::requests::create,
        crate::routes::requests::list,
        crate::routes::requests::approve,
    ),
    components(
        schemas(
            HealthResponse,
            AssociationDoc,
            AssociationDraftDoc,
            AssociationPageDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "registry"),
        (name = "requests")
    )
)]
pub struct ApiDoc;
