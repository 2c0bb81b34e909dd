//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Pool-level methods accept `&PgPool`; `*_in` variants accept a
//! `&mut PgConnection` so they can run inside a caller's transaction.

pub mod location_repo;
pub mod media_repo;
pub mod memory_repo;
pub mod stats_repo;
pub mod timeline_event_repo;

pub use location_repo::LocationRepo;
pub use media_repo::MediaRepo;
pub use memory_repo::MemoryRepo;
pub use stats_repo::StatsRepo;
pub use timeline_event_repo::TimelineEventRepo;
