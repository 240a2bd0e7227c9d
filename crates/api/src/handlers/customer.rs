//! Handlers for the `/customer` resource.

use axum::extract::State;
use axum::http::header::LOCATION;
use axum::http::{HeaderName, StatusCode};
use axum::Json;
use taproom_core::customer::{CustomerDto, CustomerPatch};
use taproom_core::error::CoreError;
use taproom_core::paging::Page;
use taproom_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery, ValidatedJson};
use crate::middleware::auth::RequireAuth;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Customer",
        id,
    })
}

/// GET /api/v1/customer
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PaginationParams>,
) -> AppResult<Json<DataResponse<Page<CustomerDto>>>> {
    let page = state
        .customers
        .list_customers(&params.page_request())
        .await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/customer/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<CustomerDto>>> {
    let customer = state
        .customers
        .get_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: customer }))
}

/// POST /api/v1/customer
pub async fn create(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CustomerDto>,
) -> AppResult<(StatusCode, [(HeaderName, String); 1], Json<DataResponse<CustomerDto>>)> {
    let customer = state.customers.save_new(input).await?;
    let id = customer.id.ok_or_else(|| {
        AppError::InternalError("store returned a customer without an id".into())
    })?;

    tracing::info!(customer_id = %id, user = %user.subject, "Customer created");

    Ok((
        StatusCode::CREATED,
        [(LOCATION, format!("/api/v1/customer/{id}"))],
        Json(DataResponse { data: customer }),
    ))
}

/// PUT /api/v1/customer/{id}
pub async fn update(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    ValidatedJson(input): ValidatedJson<CustomerDto>,
) -> AppResult<StatusCode> {
    state
        .customers
        .update(id, input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(customer_id = %id, user = %user.subject, "Customer updated");
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/customer/{id}
pub async fn patch(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<CustomerPatch>,
) -> AppResult<StatusCode> {
    state
        .customers
        .patch(id, input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(customer_id = %id, user = %user.subject, "Customer patched");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/customer/{id}
pub async fn delete(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if !state.customers.delete_by_id(id).await? {
        return Err(not_found(id));
    }

    tracing::info!(customer_id = %id, user = %user.subject, "Customer deleted");
    Ok(StatusCode::NO_CONTENT)
}
