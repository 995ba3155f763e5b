// Cache module for the status summary.
// Holds the single in-memory summary entry and the clock used to judge freshness.

pub mod clock;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use store::{CachedSummary, SummaryCache};
