//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod card_repo;
pub mod user_repo;

pub use card_repo::CardRepo;
pub use user_repo::UserRepo;
