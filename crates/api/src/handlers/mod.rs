//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers validate input, delegate to the repositories in `bookswap-db`,
//! publish events on the bus, and map errors via [`AppError`](crate::error::AppError).

pub mod auth;
pub mod listing;
pub mod notification;
pub mod profile;
pub mod upload;

/// Map `Some("")` (and whitespace-only strings) to `None`.
///
/// Optional text fields arrive from forms as empty strings; storage wants
/// NULL instead.
pub(crate) fn none_if_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
