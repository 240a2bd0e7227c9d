//! Beer order row model.

use serde::Serialize;
use sqlx::FromRow;
use taproom_core::types::{DbId, Timestamp};

/// Maximum length of a customer's own order reference, in characters.
pub const CUSTOMER_REF_MAX_LEN: usize = 255;

/// A row from the `beer_orders` table. Every order belongs to one customer.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct BeerOrder {
    pub id: Option<DbId>,
    pub version: Option<i32>,
    pub customer_id: DbId,
    pub customer_ref: Option<String>,
    pub created_date: Option<Timestamp>,
    pub updated_date: Option<Timestamp>,
}

impl BeerOrder {
    pub fn new(customer_id: DbId, customer_ref: Option<String>) -> Self {
        Self {
            id: None,
            version: None,
            customer_id,
            customer_ref,
            created_date: None,
            updated_date: None,
        }
    }
}
