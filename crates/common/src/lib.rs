//! Shared building blocks for the catalog crates: logging setup and small
//! response types used by more than one HTTP surface.

pub mod types;
pub mod utils;
