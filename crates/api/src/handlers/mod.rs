//! Request handlers, one module per resource.

pub mod dashboard;
pub mod immobile;
pub mod spesa;
