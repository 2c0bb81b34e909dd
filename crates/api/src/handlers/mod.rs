pub mod memory;
pub mod stats;
pub mod upload;
