//! Timeline data aggregation and layout.
//!
//! [`TimelineDataManager`] is the entry point. The free functions in
//! [`aggregate`] and [`packing`] are the pure, uncached building blocks it
//! composes.

pub mod aggregate;
mod cache;
mod manager;
pub mod packing;

pub use cache::CacheStats;
pub use manager::{FormattedDays, FormattedRows, TimelineDataManager};
