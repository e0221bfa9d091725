use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDoc {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock_quantity: i32,
}

/// Create and update share one payload shape.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductInputDoc {
    /// Required, at most 100 characters.
    pub name: String,
    /// Required, at most 50 characters.
    pub category: String,
    /// At most 500 characters.
    pub description: Option<String>,
    /// Greater than zero.
    pub price: f64,
    /// Zero or more.
    pub stock_quantity: i32,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponseDoc {
    pub message: String,
    pub details: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub errors: Option<serde_json::Value>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::products::list,
        crate::routes::products::get,
        crate::routes::products::create,
        crate::routes::products::update,
        crate::routes::products::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ProductDoc,
            ProductInputDoc,
            ErrorResponseDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "products")
    )
)]
pub struct ApiDoc;
