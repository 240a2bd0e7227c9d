//! Startup data seeding.
//!
//! Runs once, before the server accepts requests:
//!
//! 1. An empty beer store receives three reference beers.
//! 2. A beer store with fewer than [`CATALOGUE_THRESHOLD`] beers receives
//!    the CSV catalogue, when the file exists.
//! 3. An empty customer store receives three reference customers.

pub mod catalogue;

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use taproom_core::beer::{BeerDto, BeerStyle};
use taproom_core::customer::CustomerDto;

use crate::error::AppError;
use crate::services::{BeerService, CustomerService};

/// The catalogue is only loaded while the store holds fewer beers than this.
pub const CATALOGUE_THRESHOLD: i64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Failed to read beer catalogue {}: {source}", .path.display())]
    Catalogue {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to save seed data: {0}")]
    Save(#[from] AppError),
}

/// What a bootstrap run added.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapReport {
    pub reference_beers: usize,
    pub catalogue_beers: usize,
    pub customers: usize,
}

/// Seed both stores. Safe to run on every start: each step checks the
/// current count first.
pub async fn run(
    beers: &BeerService,
    customers: &CustomerService,
    catalogue_path: &Path,
) -> Result<BootstrapReport, BootstrapError> {
    let mut report = BootstrapReport::default();

    if beers.count().await? == 0 {
        for beer in reference_beers() {
            beers.save_new(beer).await?;
            report.reference_beers += 1;
        }
        tracing::info!(count = report.reference_beers, "Seeded reference beers");
    }

    if beers.count().await? < CATALOGUE_THRESHOLD {
        if catalogue_path.exists() {
            let records =
                catalogue::convert_csv(catalogue_path).map_err(|source| {
                    BootstrapError::Catalogue {
                        path: catalogue_path.to_path_buf(),
                        source,
                    }
                })?;
            for record in &records {
                beers.save_new(record.to_beer_dto()).await?;
                report.catalogue_beers += 1;
            }
            tracing::info!(
                count = report.catalogue_beers,
                path = %catalogue_path.display(),
                "Loaded beer catalogue"
            );
        } else {
            tracing::warn!(path = %catalogue_path.display(), "Beer catalogue not found, skipping");
        }
    }

    if customers.count().await? == 0 {
        for customer in reference_customers() {
            customers.save_new(customer).await?;
            report.customers += 1;
        }
        tracing::info!(count = report.customers, "Seeded reference customers");
    }

    Ok(report)
}

fn beer(name: &str, style: BeerStyle, upc: &str, price: Decimal, quantity: i32) -> BeerDto {
    BeerDto {
        id: None,
        version: None,
        beer_name: name.to_string(),
        beer_style: style,
        upc: upc.to_string(),
        quantity_on_hand: Some(quantity),
        price,
        created_date: None,
        updated_date: None,
    }
}

fn reference_beers() -> [BeerDto; 3] {
    [
        beer("Galaxy Cat", BeerStyle::PaleAle, "12356", Decimal::new(1299, 2), 122),
        beer("Crank", BeerStyle::PaleAle, "12356222", Decimal::new(1199, 2), 392),
        beer("Sunshine City", BeerStyle::Ipa, "12356", Decimal::new(1399, 2), 144),
    ]
}

fn reference_customers() -> impl Iterator<Item = CustomerDto> {
    (1..=3).map(|n| CustomerDto {
        id: None,
        version: None,
        name: format!("Customer {n}"),
        email: None,
        created_date: None,
        updated_date: None,
    })
}
