//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod beer_order_repo;
pub mod beer_repo;
pub mod category_repo;
pub mod customer_repo;

pub use beer_order_repo::BeerOrderRepo;
pub use beer_repo::BeerRepo;
pub use category_repo::CategoryRepo;
pub use customer_repo::CustomerRepo;
