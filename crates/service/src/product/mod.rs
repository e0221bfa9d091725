//! Product catalog: request payloads (domain), the storage capability
//! (repository), storage adapters (repo) and business rules (service).

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use models::product::{Model as Product, NewProduct};
pub use repository::ProductRepository;
pub use service::ProductService;
