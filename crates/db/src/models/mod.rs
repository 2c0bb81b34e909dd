//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//!
//! JSON field names are camelCase to match the web client.

pub mod location;
pub mod media;
pub mod memory;
pub mod stats;
pub mod timeline_event;
