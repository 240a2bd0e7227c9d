//! Category row model.

use serde::Serialize;
use sqlx::FromRow;
use taproom_core::types::{DbId, Timestamp};

/// Maximum length of a category description, in characters.
pub const CATEGORY_DESCRIPTION_MAX_LEN: usize = 50;

/// A row from the `categories` table. Beers are linked through
/// `beer_category`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Category {
    pub id: Option<DbId>,
    pub version: Option<i32>,
    pub description: String,
    pub created_date: Option<Timestamp>,
    pub updated_date: Option<Timestamp>,
}

impl Category {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: None,
            version: None,
            description: description.into(),
            created_date: None,
            updated_date: None,
        }
    }
}
