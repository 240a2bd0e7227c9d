//! Record store abstraction.
//!
//! Services depend on [`BeerStore`] / [`CustomerStore`] trait objects and
//! never on a concrete backend. [`BeerOrderStore`] and [`CategoryStore`]
//! cover the related tables. Two backends exist:
//!
//! - [`PgStore`] -- PostgreSQL via the repositories in [`crate::repositories`].
//! - [`MemoryStore`] -- process-local maps, for tests and database-less runs.
//!
//! Both enforce the same boundary rules: the `check_*` functions run before
//! every write, `save` inserts when the record has no id and
//! otherwise performs a compare-and-set on `version`.

use async_trait::async_trait;
use taproom_core::beer::{BeerStyle, BEER_NAME_MAX_LEN, UPC_MAX_LEN};
use taproom_core::customer::CUSTOMER_NAME_MAX_LEN;
use taproom_core::paging::{Page, PageRequest};
use taproom_core::types::DbId;
use taproom_core::validation::price_problem;

use crate::error::StoreError;
use crate::models::beer::Beer;
use crate::models::beer_order::{BeerOrder, CUSTOMER_REF_MAX_LEN};
use crate::models::category::{Category, CATEGORY_DESCRIPTION_MAX_LEN};
use crate::models::customer::Customer;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Persistence operations the beer service consumes.
#[async_trait]
pub trait BeerStore: Send + Sync {
    async fn find_by_id(&self, id: DbId) -> Result<Option<Beer>, StoreError>;

    async fn find_all(&self, page: &PageRequest) -> Result<Page<Beer>, StoreError>;

    /// `pattern` is a case-insensitive SQL `LIKE` pattern (`%`, `_`, `\` escape).
    async fn find_all_by_name_like(
        &self,
        pattern: &str,
        page: &PageRequest,
    ) -> Result<Page<Beer>, StoreError>;

    async fn find_all_by_style(
        &self,
        style: BeerStyle,
        page: &PageRequest,
    ) -> Result<Page<Beer>, StoreError>;

    async fn find_all_by_name_like_and_style(
        &self,
        pattern: &str,
        style: BeerStyle,
        page: &PageRequest,
    ) -> Result<Page<Beer>, StoreError>;

    /// Insert when `beer.id` is `None`, otherwise update the record whose
    /// version equals `beer.version`.
    async fn save(&self, beer: Beer) -> Result<Beer, StoreError>;

    async fn delete_by_id(&self, id: DbId) -> Result<(), StoreError>;

    async fn exists_by_id(&self, id: DbId) -> Result<bool, StoreError>;

    async fn count(&self) -> Result<i64, StoreError>;
}

/// Persistence operations the customer service consumes.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn find_by_id(&self, id: DbId) -> Result<Option<Customer>, StoreError>;

    async fn find_all(&self, page: &PageRequest) -> Result<Page<Customer>, StoreError>;

    /// Same insert / compare-and-set contract as [`BeerStore::save`].
    async fn save(&self, customer: Customer) -> Result<Customer, StoreError>;

    /// Fails with [`StoreError::Referenced`] while the customer has orders.
    async fn delete_by_id(&self, id: DbId) -> Result<(), StoreError>;

    async fn exists_by_id(&self, id: DbId) -> Result<bool, StoreError>;

    async fn count(&self) -> Result<i64, StoreError>;
}

/// Orders and their link back to the customer that placed them.
#[async_trait]
pub trait BeerOrderStore: Send + Sync {
    async fn find_by_id(&self, id: DbId) -> Result<Option<BeerOrder>, StoreError>;

    /// A customer's orders, oldest first.
    async fn find_all_by_customer(
        &self,
        customer_id: DbId,
        page: &PageRequest,
    ) -> Result<Page<BeerOrder>, StoreError>;

    /// Same contract as [`BeerStore::save`]; the customer must exist
    /// ([`StoreError::NotFound`] otherwise).
    async fn save(&self, order: BeerOrder) -> Result<BeerOrder, StoreError>;

    async fn delete_by_id(&self, id: DbId) -> Result<(), StoreError>;

    async fn exists_by_id(&self, id: DbId) -> Result<bool, StoreError>;

    async fn count(&self) -> Result<i64, StoreError>;
}

/// Categories and their many-to-many link with beers.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn find_by_id(&self, id: DbId) -> Result<Option<Category>, StoreError>;

    /// Ordered by description, then id.
    async fn find_all(&self, page: &PageRequest) -> Result<Page<Category>, StoreError>;

    async fn save(&self, category: Category) -> Result<Category, StoreError>;

    /// Also drops the category's beer links.
    async fn delete_by_id(&self, id: DbId) -> Result<(), StoreError>;

    async fn exists_by_id(&self, id: DbId) -> Result<bool, StoreError>;

    async fn count(&self) -> Result<i64, StoreError>;

    /// Idempotent. Both records must exist ([`StoreError::NotFound`]
    /// otherwise).
    async fn add_beer(&self, category_id: DbId, beer_id: DbId) -> Result<(), StoreError>;

    /// Returns `false` when the beer was not in the category.
    async fn remove_beer(&self, category_id: DbId, beer_id: DbId) -> Result<bool, StoreError>;

    /// Beers in the category, in beer listing order.
    async fn find_beers(
        &self,
        category_id: DbId,
        page: &PageRequest,
    ) -> Result<Page<Beer>, StoreError>;

    async fn find_categories_of_beer(&self, beer_id: DbId) -> Result<Vec<Category>, StoreError>;
}

// ---------------------------------------------------------------------------
// Boundary checks
// ---------------------------------------------------------------------------

/// Reject beers that violate the table constraints.
pub fn check_beer(beer: &Beer) -> Result<(), StoreError> {
    let mut problems = Vec::new();

    if beer.beer_name.trim().is_empty() {
        problems.push("beer_name: must not be blank".to_string());
    } else if beer.beer_name.chars().count() > BEER_NAME_MAX_LEN {
        problems.push(format!(
            "beer_name: must be at most {BEER_NAME_MAX_LEN} characters"
        ));
    }
    if beer.upc.trim().is_empty() {
        problems.push("upc: must not be blank".to_string());
    } else if beer.upc.chars().count() > UPC_MAX_LEN {
        problems.push(format!("upc: must be at most {UPC_MAX_LEN} characters"));
    }
    if matches!(beer.quantity_on_hand, Some(q) if q < 0) {
        problems.push("quantity_on_hand: must not be negative".to_string());
    }
    if let Some(problem) = price_problem(&beer.price) {
        problems.push(format!("price: {problem}"));
    }

    into_result(problems)
}

/// Reject customers that violate the table constraints.
pub fn check_customer(customer: &Customer) -> Result<(), StoreError> {
    let mut problems = Vec::new();

    if customer.name.trim().is_empty() {
        problems.push("name: must not be blank".to_string());
    } else if customer.name.chars().count() > CUSTOMER_NAME_MAX_LEN {
        problems.push(format!(
            "name: must be at most {CUSTOMER_NAME_MAX_LEN} characters"
        ));
    }

    into_result(problems)
}

pub fn check_order(order: &BeerOrder) -> Result<(), StoreError> {
    let mut problems = Vec::new();

    if matches!(&order.customer_ref, Some(r) if r.chars().count() > CUSTOMER_REF_MAX_LEN) {
        problems.push(format!(
            "customer_ref: must be at most {CUSTOMER_REF_MAX_LEN} characters"
        ));
    }

    into_result(problems)
}

pub fn check_category(category: &Category) -> Result<(), StoreError> {
    let mut problems = Vec::new();

    if category.description.trim().is_empty() {
        problems.push("description: must not be blank".to_string());
    } else if category.description.chars().count() > CATEGORY_DESCRIPTION_MAX_LEN {
        problems.push(format!(
            "description: must be at most {CATEGORY_DESCRIPTION_MAX_LEN} characters"
        ));
    }

    into_result(problems)
}

fn into_result(problems: Vec<String>) -> Result<(), StoreError> {
    if problems.is_empty() {
        Ok(())
    } else {
        Err(StoreError::Validation(problems.join("; ")))
    }
}

/// The version an update must match. Updating without one is a caller bug.
fn expected_version(entity: &'static str, version: Option<i32>) -> Result<i32, StoreError> {
    version.ok_or_else(|| {
        StoreError::Validation(format!("{entity}: version is required to update"))
    })
}
