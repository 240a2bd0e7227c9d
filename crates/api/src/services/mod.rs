//! Application services.
//!
//! Services own the listing, create, replace, patch and delete rules and
//! talk to storage only through the `taproom_db::store` traits, so the
//! same code runs against PostgreSQL and the in-memory backend.

pub mod beer_service;
pub mod customer_service;

pub use beer_service::BeerService;
pub use customer_service::CustomerService;

use taproom_core::error::CoreError;
use taproom_core::types::DbId;

use crate::error::AppResult;

/// Reject a write whose caller-supplied version differs from the stored one.
/// A caller that sends no version skips the check.
fn check_version(
    entity: &'static str,
    id: DbId,
    expected: Option<i32>,
    stored: Option<i32>,
) -> AppResult<()> {
    match expected {
        Some(expected) if Some(expected) != stored => Err(CoreError::Conflict(format!(
            "{entity} with id {id} is at version {}, not {expected}",
            stored.unwrap_or_default()
        ))
        .into()),
        _ => Ok(()),
    }
}
