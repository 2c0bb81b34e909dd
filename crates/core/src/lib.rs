//! Domain types and validation shared by the Keepsake crates.

pub mod date;
pub mod error;
pub mod media;
pub mod types;
pub mod validation;
