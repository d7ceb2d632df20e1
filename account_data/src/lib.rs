//! Data layer for the account service
//!
//! This crate contains the data access layer for user accounts, including
//! the MongoDB document entity, the repository trait with its MongoDB and
//! in-memory implementations, and data-specific error types.

pub mod entities;
pub mod error;
pub mod repositories;

pub use entities::*;
pub use error::*;
pub use repositories::*;
