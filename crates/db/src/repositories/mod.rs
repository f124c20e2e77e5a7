//! Repository structs: one per table, static async methods over a pool.

pub mod listing_repo;
pub mod profile_repo;
pub mod session_repo;
pub mod user_repo;

pub use listing_repo::ListingRepo;
pub use profile_repo::ProfileRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
