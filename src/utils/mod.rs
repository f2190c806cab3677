//! Shared utilities.

mod dates;
mod hash;

pub use dates::{day_offset, format_iso_date, iter_days, parse_iso_date};
pub use hash::{Fingerprint, content_hash};
