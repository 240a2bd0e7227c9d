//! Customer row model.

use serde::Serialize;
use sqlx::FromRow;
use taproom_core::types::{DbId, Timestamp};

/// A row from the `customers` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Customer {
    pub id: Option<DbId>,
    pub version: Option<i32>,
    pub name: String,
    pub email: Option<String>,
    pub created_date: Option<Timestamp>,
    pub updated_date: Option<Timestamp>,
}

impl Customer {
    pub fn new(name: impl Into<String>, email: Option<String>) -> Self {
        Self {
            id: None,
            version: None,
            name: name.into(),
            email,
            created_date: None,
            updated_date: None,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}
