//! Persistence mapping for the catalog: the `products` entity, its field
//! rules, and connection helpers.

pub mod errors;
pub mod db;
pub mod validation;
pub mod product;
