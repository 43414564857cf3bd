//! Utilities shared by the database backends

pub mod error;

pub use error::{DatabaseError, DatabaseResult};
