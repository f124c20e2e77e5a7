//! Row structs (`sqlx::FromRow`) and DTOs for each table.

pub mod listing;
pub mod profile;
pub mod session;
pub mod user;
