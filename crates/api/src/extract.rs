//! Request extractors that reject with [`AppError`] instead of axum's
//! plain-text rejections, so every 400 carries the JSON error body.

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use taproom_core::validation::field_errors;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// JSON body whose syntax or shape errors become `400 BAD_REQUEST`.
#[derive(Debug)]
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(AppJson(value))
    }
}

/// JSON body that must also pass its [`Validate`] rules; field failures
/// become `400 VALIDATION_ERROR` with a `fields` list.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let AppJson(value) = AppJson::<T>::from_request(req, state).await?;
        validate_fields(&value)?;
        Ok(ValidatedJson(value))
    }
}

/// Query string whose parse errors become `400 BAD_REQUEST`.
#[derive(Debug)]
pub struct AppQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(AppQuery(value))
    }
}

/// Path parameters whose parse errors (a malformed id, say) become
/// `400 BAD_REQUEST`.
#[derive(Debug)]
pub struct AppPath<T>(pub T);

impl<T, S> FromRequestParts<S> for AppPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(AppPath(value))
    }
}

/// Run `value`'s validation rules, mapping failures to
/// [`AppError::InvalidFields`].
pub fn validate_fields<T: Validate>(value: &T) -> AppResult<()> {
    value
        .validate()
        .map_err(|errors| AppError::InvalidFields(field_errors(&errors)))
}
