//! Beer catalogue CSV conversion.
//!
//! The catalogue has one headed row per beer:
//!
//! ```text
//! row,count.x,abv,ibu,id,beer,style,brewery_id,ounces,style2,count.y,brewery,city,state,label
//! ```
//!
//! `abv` and `ibu` may be empty. Every other column is required, and a row
//! that does not deserialize fails the whole conversion.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;
use taproom_core::beer::{BeerDto, BeerStyle, BEER_NAME_MAX_LEN};

/// Price assigned to every catalogue beer.
const CATALOGUE_PRICE: i64 = 10;

/// One data row of the beer catalogue.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BeerCsvRecord {
    pub row: i32,
    #[serde(rename = "count.x")]
    pub count_x: i32,
    pub abv: Option<f64>,
    pub ibu: Option<i32>,
    pub id: i32,
    pub beer: String,
    pub style: String,
    pub brewery_id: i32,
    pub ounces: f64,
    pub style2: String,
    #[serde(rename = "count.y")]
    pub count_y: i32,
    pub brewery: String,
    pub city: String,
    pub state: String,
    pub label: String,
}

impl BeerCsvRecord {
    /// Unsaved beer for this row: abbreviated name, mapped style, `row` as
    /// upc, the flat catalogue price and `count.x` on hand.
    pub fn to_beer_dto(&self) -> BeerDto {
        BeerDto {
            id: None,
            version: None,
            beer_name: abbreviate(&self.beer, BEER_NAME_MAX_LEN),
            beer_style: style_for_label(&self.style),
            upc: self.row.to_string(),
            quantity_on_hand: Some(self.count_x),
            price: Decimal::from(CATALOGUE_PRICE),
            created_date: None,
            updated_date: None,
        }
    }
}

/// Read every record from the catalogue file at `path`.
pub fn convert_csv(path: &Path) -> Result<Vec<BeerCsvRecord>, csv::Error> {
    let file = std::fs::File::open(path)?;
    read_records(file)
}

/// Read every record from an in-memory or streamed catalogue.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<BeerCsvRecord>, csv::Error> {
    ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader)
        .deserialize()
        .collect()
}

/// Map a catalogue style label onto a [`BeerStyle`]. Unknown labels fall
/// back to `PILSNER`.
pub fn style_for_label(label: &str) -> BeerStyle {
    match label {
        "American Pale Lager" => BeerStyle::Lager,
        "American Pale Ale (APA)"
        | "American Black Ale"
        | "Belgian Dark Ale"
        | "American Blonde Ale" => BeerStyle::Ale,
        "American IPA" | "American Double / Imperial IPA" | "Belgian IPA" => BeerStyle::Ipa,
        "American Porter" => BeerStyle::Porter,
        "Oatmeal Stout" | "American Stout" => BeerStyle::Stout,
        "Saison / Farmhouse Ale" => BeerStyle::Saison,
        "Fruit / Vegetable Beer" | "Winter Warmer" | "Berliner Weissbier" => BeerStyle::Wheat,
        "English Pale Ale" => BeerStyle::PaleAle,
        _ => BeerStyle::Pilsner,
    }
}

/// Shorten `name` to at most `max` characters, marking the cut with `...`.
pub fn abbreviate(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        return name.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = name.chars().take(keep).collect();
    out.push_str("...");
    out
}
