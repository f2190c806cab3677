//! Data model for the timeline engine.
//!
//! Host data arrives as loosely-typed JSON records. This module parses those
//! records once, at the boundary, into validated record types
//! ([`ElementRecord`], [`CapacityRecord`], [`StageRecord`]) and defines the
//! derived structures the data manager produces ([`Day`], [`StageBar`]).
//!
//! Malformed records are skipped during parsing, never propagated:
//!
//! ```ignore
//! let elements = parse_elements(&raw_elements); // nulls and broken rows dropped
//! ```

mod day;
mod input;
mod records;
mod stage;

pub use day::{AlertLevel, Day};
pub use input::TimelineInput;
pub use records::{
    CapacityRecord, ElementNature, ElementRecord, ElementStatus, RecordIssue, StageRecord,
    parse_capacities, parse_elements, parse_stages,
};
pub use stage::{BarKind, StageBar, StageRow};
