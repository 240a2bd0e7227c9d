//! Row models.
//!
//! Each submodule holds a `FromRow` + `Serialize` struct matching one table.
//! Store-assigned columns (`id`, `version`, timestamps) are `Option` so a
//! record that has not been saved yet can be represented.

pub mod beer;
pub mod beer_order;
pub mod category;
pub mod customer;
