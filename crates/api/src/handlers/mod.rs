//! Request handlers.
//!
//! Handlers delegate to the repositories in `bloodlevel_db` and the pure
//! classification logic in `bloodlevel_core`, mapping errors via
//! [`crate::error::AppError`].

pub mod drugs;
