//! Handlers for the `/beer` resource.

use axum::extract::State;
use axum::http::header::LOCATION;
use axum::http::{HeaderName, StatusCode};
use axum::Json;
use taproom_core::beer::{BeerDto, BeerListParams, BeerPatch};
use taproom_core::error::CoreError;
use taproom_core::paging::Page;
use taproom_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery, ValidatedJson};
use crate::middleware::auth::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Beer", id })
}

/// GET /api/v1/beer
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<BeerListParams>,
) -> AppResult<Json<DataResponse<Page<BeerDto>>>> {
    let page = state.beers.list_beers(&params).await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/beer/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<BeerDto>>> {
    let beer = state.beers.get_by_id(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: beer }))
}

/// POST /api/v1/beer
pub async fn create(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<BeerDto>,
) -> AppResult<(StatusCode, [(HeaderName, String); 1], Json<DataResponse<BeerDto>>)> {
    let beer = state.beers.save_new(input).await?;
    let id = beer.id.ok_or_else(|| {
        AppError::InternalError("store returned a beer without an id".into())
    })?;

    tracing::info!(beer_id = %id, user = %user.subject, "Beer created");

    Ok((
        StatusCode::CREATED,
        [(LOCATION, format!("/api/v1/beer/{id}"))],
        Json(DataResponse { data: beer }),
    ))
}

/// PUT /api/v1/beer/{id}
pub async fn update(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    ValidatedJson(input): ValidatedJson<BeerDto>,
) -> AppResult<StatusCode> {
    let beer = state
        .beers
        .update(id, input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(beer_id = %id, version = ?beer.version, user = %user.subject, "Beer updated");
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/beer/{id}
pub async fn patch(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<BeerPatch>,
) -> AppResult<StatusCode> {
    let beer = state
        .beers
        .patch(id, input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(beer_id = %id, version = ?beer.version, user = %user.subject, "Beer patched");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/beer/{id}
pub async fn delete(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if !state.beers.delete_by_id(id).await? {
        return Err(not_found(id));
    }

    tracing::info!(beer_id = %id, user = %user.subject, "Beer deleted");
    Ok(StatusCode::NO_CONTENT)
}
