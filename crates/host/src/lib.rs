//! Host-platform surface for the placement excluder.
//!
//! The real reporting and mutation APIs belong to the ads platform; this
//! crate models them as narrow traits plus an in-memory implementation used
//! for development, fixtures, and tests.

pub mod memory;
pub mod query;
pub mod traits;

pub use memory::{AccountFixture, MemoryHost};
pub use query::PlacementQuery;
pub use traits::{AdGroupRecord, AdsHost, CampaignRecord, ReportSource};
