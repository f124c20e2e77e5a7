//! Domain types and pure logic for the BookSwap marketplace.
//!
//! Everything here is side-effect free: catalog filtering, listing
//! category/status semantics, contact-link composition, and image upload
//! rules. Persistence lives in `bookswap-db`, HTTP in `bookswap-api`.

pub mod catalog;
pub mod contact;
pub mod error;
pub mod image;
pub mod listing;
pub mod types;
