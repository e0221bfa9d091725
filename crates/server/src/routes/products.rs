use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{info, warn};

use service::product::{domain::{CreateProductDto, UpdateProductDto}, Product};

use crate::{errors::JsonApiError, routes::AppState};

pub const UPDATED: &str = "Updated Successfully";

const LIST_FAILED: &str = "An error occurred while retrieving products.";
const GET_FAILED: &str = "An error occurred while retrieving the product.";
const CREATE_FAILED: &str = "An error occurred while adding the product.";
const UPDATE_FAILED: &str = "An error occurred while updating the product.";
const DELETE_FAILED: &str = "An error occurred while deleting the product.";

fn product_id(path: Result<Path<i32>, PathRejection>) -> Result<i32, JsonApiError> {
    let Path(id) = path?;
    Ok(id)
}

#[utoipa::path(
    get, path = "/products", tag = "products",
    responses(
        (status = 200, description = "All products", body = [crate::openapi::ProductDoc]),
        (status = 500, description = "Storage fault", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>, JsonApiError> {
    let products = state
        .products
        .get_all_products()
        .await
        .map_err(|e| JsonApiError::from_service(e, LIST_FAILED))?;
    info!(count = products.len(), "list products");
    Ok(Json(products))
}

#[utoipa::path(
    get, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::ProductDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponseDoc),
        (status = 500, description = "Storage fault", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn get(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<Product>, JsonApiError> {
    let id = product_id(path)?;
    match state.products.get_product_by_id(id).await {
        Ok(Some(p)) => Ok(Json(p)),
        Ok(None) => Err(JsonApiError::product_not_found(id)),
        Err(e) => Err(JsonApiError::from_service(e, GET_FAILED)),
    }
}

#[utoipa::path(
    post, path = "/products", tag = "products",
    request_body = crate::openapi::ProductInputDoc,
    responses(
        (status = 201, description = "Created; Location points at the new product", body = crate::openapi::ProductDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponseDoc),
        (status = 500, description = "Create Failed", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateProductDto>, JsonRejection>,
) -> Result<Response, JsonApiError> {
    let Json(input) = payload?;
    let fields = input.validate().map_err(|errs| {
        warn!(errors = %errs, "create product rejected");
        JsonApiError::invalid(errs)
    })?;

    let created = state
        .products
        .add_product(fields)
        .await
        .map_err(|e| JsonApiError::from_service(e, CREATE_FAILED))?;
    info!(id = created.id, name = %created.name, "created product");

    let location = format!("/products/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)).into_response())
}

#[utoipa::path(
    put, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = crate::openapi::ProductInputDoc,
    responses(
        (status = 200, description = "Updated; body is the text `Updated Successfully`", body = String),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponseDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponseDoc),
        (status = 500, description = "Update Failed", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateProductDto>, JsonRejection>,
) -> Result<(StatusCode, &'static str), JsonApiError> {
    let id = product_id(path)?;
    let Json(input) = payload?;
    let fields = input.validate().map_err(|errs| {
        warn!(id, errors = %errs, "update product rejected");
        JsonApiError::invalid(errs)
    })?;

    let mut existing = state
        .products
        .get_product_by_id(id)
        .await
        .map_err(|e| JsonApiError::from_service(e, UPDATE_FAILED))?
        .ok_or_else(|| JsonApiError::product_not_found(id))?;

    existing.overwrite_with(fields);
    state
        .products
        .update_product(existing)
        .await
        .map_err(|e| JsonApiError::from_service(e, UPDATE_FAILED))?;
    info!(id, "updated product");
    Ok((StatusCode::OK, UPDATED))
}

#[utoipa::path(
    delete, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponseDoc),
        (status = 500, description = "Delete Failed", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, JsonApiError> {
    let id = product_id(path)?;
    let found = state
        .products
        .get_product_by_id(id)
        .await
        .map_err(|e| JsonApiError::from_service(e, DELETE_FAILED))?;
    if found.is_none() {
        return Err(JsonApiError::product_not_found(id));
    }

    state
        .products
        .delete_product(id)
        .await
        .map_err(|e| JsonApiError::from_service(e, DELETE_FAILED))?;
    info!(id, "deleted product");
    Ok(StatusCode::NO_CONTENT)
}
