//! Domain rules for the e-learning schema.
//!
//! Everything here is independent of the database: field bounds, role
//! capabilities, the cascade ownership tree, presentation helpers and the
//! blob-store contract consumed by the persistence layer.

pub mod course;
pub mod error;
pub mod ownership;
pub mod profile;
pub mod quiz;
pub mod roles;
pub mod storage;
pub mod types;
