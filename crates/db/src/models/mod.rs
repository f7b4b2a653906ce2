//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` struct matching the database row (or a joined projection)
//! - A create DTO for inserts where the service or its tests need one

pub mod issue;
pub mod journal;
pub mod project;
pub mod role;
pub mod user;
