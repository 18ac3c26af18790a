//! Pure domain logic for the condominium expense tracker.
//!
//! Everything in this crate is synchronous and side-effect free: status
//! derivation, note merging, expense registration planning, and yearly
//! aggregation. Persistence lives in `condospese-db`, the HTTP surface
//! in `condospese-api`.

pub mod aggregation;
pub mod derivation;
pub mod error;
pub mod note;
pub mod registration;
pub mod types;
