//! Timeline orchestration.
//!
//! [`TimelineState`] is the coordinator a UI layer drives: it forwards scroll
//! events to the [`crate::controller::TimelineController`], animates
//! programmatic scrolls, debounces vertical auto-scroll, gates the loading
//! indicator and reports back through a [`TimelineHost`].

mod host;
mod state;

pub use host::{CapacityInfo, DayDetail, DayInfos, NoopHost, TimelineHost};
pub use state::{AutoScroll, TimelineState};
