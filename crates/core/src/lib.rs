//! Pure domain layer: types, DTOs, paging rules and validation.
//!
//! No I/O and no internal dependencies, so both the store layer and the
//! HTTP layer can share it.

pub mod beer;
pub mod customer;
pub mod error;
pub mod paging;
pub mod params;
pub mod patch;
pub mod types;
pub mod validation;
