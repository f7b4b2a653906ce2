//! Domain core of the issuelog service.
//!
//! Holds the journal model, the permission snapshot, the visibility and
//! mutation gate, and the storage seams it runs against. Nothing here knows
//! about HTTP or SQL.

pub mod diff;
pub mod error;
pub mod gate;
pub mod journal;
pub mod memory;
pub mod permissions;
pub mod quote;
pub mod store;
pub mod types;
