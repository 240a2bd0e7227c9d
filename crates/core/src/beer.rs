//! Beer domain types: styles, transfer objects, listing parameters and
//! query routing.
//!
//! Everything here is pure; persistence shapes live in `taproom_db`.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::params::{blank_as_none, lenient_bool};
use crate::patch::Patch;
use crate::types::{DbId, Timestamp};
use crate::validation::{check_max_len, error, not_blank, valid_price};

/// Maximum length of a beer name, in characters.
pub const BEER_NAME_MAX_LEN: usize = 50;

/// Maximum length of a universal product code, in characters.
pub const UPC_MAX_LEN: usize = 255;

// ---------------------------------------------------------------------------
// BeerStyle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BeerStyle {
    Lager,
    Pilsner,
    Stout,
    Gose,
    Porter,
    Ale,
    Wheat,
    Ipa,
    PaleAle,
    Saison,
}

impl BeerStyle {
    pub const ALL: [BeerStyle; 10] = [
        BeerStyle::Lager,
        BeerStyle::Pilsner,
        BeerStyle::Stout,
        BeerStyle::Gose,
        BeerStyle::Porter,
        BeerStyle::Ale,
        BeerStyle::Wheat,
        BeerStyle::Ipa,
        BeerStyle::PaleAle,
        BeerStyle::Saison,
    ];

    /// Canonical name, as stored in the `beer_style` column and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            BeerStyle::Lager => "LAGER",
            BeerStyle::Pilsner => "PILSNER",
            BeerStyle::Stout => "STOUT",
            BeerStyle::Gose => "GOSE",
            BeerStyle::Porter => "PORTER",
            BeerStyle::Ale => "ALE",
            BeerStyle::Wheat => "WHEAT",
            BeerStyle::Ipa => "IPA",
            BeerStyle::PaleAle => "PALE_ALE",
            BeerStyle::Saison => "SAISON",
        }
    }
}

impl fmt::Display for BeerStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown beer style: {0}")]
pub struct UnknownBeerStyle(pub String);

impl FromStr for BeerStyle {
    type Err = UnknownBeerStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BeerStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| UnknownBeerStyle(s.to_string()))
    }
}

impl TryFrom<String> for BeerStyle {
    type Error = UnknownBeerStyle;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Externally-facing beer representation.
///
/// `id`, `version`, `createdDate` and `updatedDate` are assigned by the
/// store; they are ignored on create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BeerDto {
    #[serde(default)]
    pub id: Option<DbId>,
    #[serde(default)]
    pub version: Option<i32>,
    #[validate(
        length(min = 1, max = 50, message = "must be between 1 and 50 characters"),
        custom(function = "not_blank")
    )]
    pub beer_name: String,
    pub beer_style: BeerStyle,
    #[validate(
        length(min = 1, max = 255, message = "must be between 1 and 255 characters"),
        custom(function = "not_blank")
    )]
    pub upc: String,
    #[serde(default)]
    #[validate(range(min = 0, message = "must not be negative"))]
    pub quantity_on_hand: Option<i32>,
    #[validate(custom(function = "valid_price"))]
    pub price: Decimal,
    #[serde(default)]
    pub created_date: Option<Timestamp>,
    #[serde(default)]
    pub updated_date: Option<Timestamp>,
}

/// Partial update body for `PATCH /beer/{id}`.
///
/// `version`, when present, must match the stored version.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeerPatch {
    #[serde(default)]
    pub version: Option<i32>,
    #[serde(default)]
    pub beer_name: Patch<String>,
    #[serde(default)]
    pub beer_style: Patch<BeerStyle>,
    #[serde(default)]
    pub upc: Patch<String>,
    #[serde(default)]
    pub price: Patch<Decimal>,
    #[serde(default)]
    pub quantity_on_hand: Patch<i32>,
}

impl BeerPatch {
    /// Blank strings count as absent keys.
    pub fn normalized(self) -> Self {
        Self {
            beer_name: self.beer_name.non_blank(),
            upc: self.upc.non_blank(),
            ..self
        }
    }
}

impl Validate for BeerPatch {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.beer_name.is_clear() {
            errors.add("beer_name", error("required", "may not be null"));
        }
        if self.beer_style.is_clear() {
            errors.add("beer_style", error("required", "may not be null"));
        }
        if self.upc.is_clear() {
            errors.add("upc", error("required", "may not be null"));
        }
        if self.price.is_clear() {
            errors.add("price", error("required", "may not be null"));
        }

        if let Some(name) = self.beer_name.as_set() {
            check_max_len(
                &mut errors,
                "beer_name",
                name,
                BEER_NAME_MAX_LEN,
                "must be between 1 and 50 characters",
            );
        }
        if let Some(upc) = self.upc.as_set() {
            check_max_len(
                &mut errors,
                "upc",
                upc,
                UPC_MAX_LEN,
                "must be between 1 and 255 characters",
            );
        }
        if let Some(price) = self.price.as_set() {
            if let Err(e) = valid_price(price) {
                errors.add("price", e);
            }
        }
        if matches!(self.quantity_on_hand.as_set(), Some(q) if *q < 0) {
            errors.add("quantity_on_hand", error("range", "must not be negative"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// Raw listing parameters, exactly as the caller sent them. Empty values
/// count as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeerListParams {
    #[serde(default, alias = "name")]
    pub beer_name: Option<String>,
    #[serde(default, alias = "style", deserialize_with = "blank_as_none")]
    pub beer_style: Option<BeerStyle>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub show_inventory: Option<bool>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub page_number: Option<i64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub page_size: Option<i64>,
}

impl BeerListParams {
    /// Inventory is shown unless the caller explicitly asked to hide it.
    pub fn hides_inventory(&self) -> bool {
        self.show_inventory == Some(false)
    }
}

/// Which store query answers a listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeerQuery {
    All,
    ByName(String),
    ByStyle(BeerStyle),
    ByNameAndStyle(String, BeerStyle),
}

impl BeerQuery {
    /// Route a listing to exactly one query. A blank name counts as absent;
    /// when both filters are present both apply.
    pub fn route(name: Option<&str>, style: Option<BeerStyle>) -> Self {
        let name = name.filter(|n| !n.trim().is_empty());
        match (name, style) {
            (Some(name), None) => BeerQuery::ByName(name.to_string()),
            (Some(name), Some(style)) => BeerQuery::ByNameAndStyle(name.to_string(), style),
            (None, Some(style)) => BeerQuery::ByStyle(style),
            (None, None) => BeerQuery::All,
        }
    }
}

/// Build a case-insensitive `LIKE` pattern matching `name` anywhere.
///
/// `\`, `%` and `_` in the input are escaped with `\` so they match
/// literally.
pub fn like_pattern(name: &str) -> String {
    let mut pattern = String::with_capacity(name.len() + 2);
    pattern.push('%');
    for c in name.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
