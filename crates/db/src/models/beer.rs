//! Beer row model.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use taproom_core::beer::BeerStyle;
use taproom_core::types::{DbId, Timestamp};

/// A row from the `beers` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Beer {
    pub id: Option<DbId>,
    pub version: Option<i32>,
    pub beer_name: String,
    #[sqlx(try_from = "String")]
    pub beer_style: BeerStyle,
    pub upc: String,
    pub quantity_on_hand: Option<i32>,
    pub price: Decimal,
    pub created_date: Option<Timestamp>,
    pub updated_date: Option<Timestamp>,
}

impl Beer {
    /// A beer that has never been saved.
    pub fn new(
        beer_name: impl Into<String>,
        beer_style: BeerStyle,
        upc: impl Into<String>,
        price: Decimal,
        quantity_on_hand: Option<i32>,
    ) -> Self {
        Self {
            id: None,
            version: None,
            beer_name: beer_name.into(),
            beer_style,
            upc: upc.into(),
            quantity_on_hand,
            price,
            created_date: None,
            updated_date: None,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}
