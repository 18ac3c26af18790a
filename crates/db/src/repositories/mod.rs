//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod immobile_repo;
pub mod spesa_repo;

pub use immobile_repo::ImmobileRepo;
pub use spesa_repo::SpesaRepo;
