//! Scroll and viewport math.
//!
//! Pure functions and value types converting continuous scroll offsets into
//! discrete day windows. Nothing here holds state; [`crate::controller`]
//! and [`crate::timeline`] own the mutable side.

mod calculations;
mod range;
mod state;

pub use calculations::{
    calculate_center_date_index, calculate_visible_range, max_scroll_offset, offset_for_index,
    visible_day_count,
};
pub use range::VisibleRange;
pub use state::{ScrollState, calculate_scroll_state, should_trigger_scroll};
