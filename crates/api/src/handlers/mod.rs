pub mod auth;
pub mod beer;
pub mod customer;
