//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates business rules from data access behind `ProductRepository`.
//! - Reuses the entity and field rules defined in the `models` crate.

pub mod errors;
pub mod product;
#[cfg(test)]
pub mod test_support;
