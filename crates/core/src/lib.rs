//! Domain logic for the drug reference-level service.
//!
//! Everything in this crate is pure and synchronous: range parsing,
//! blood-level classification, and the shared error and id types used by
//! the database and HTTP layers.

pub mod classification;
pub mod drug;
pub mod error;
pub mod reference_range;
pub mod types;
