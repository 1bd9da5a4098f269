//! Deferred-effect bookkeeping shared by the controllers.
//!
//! - `debounce`: single pending timer per channel, newest wins
//! - `intersection`: observed element sets with threshold/margin rules

pub mod debounce;
pub mod intersection;

pub use debounce::{
    Debouncer, TimerChannel, TimerId, SCROLL_DEBOUNCE_MS, SEARCH_DEBOUNCE_MS,
    SEARCH_MIN_QUERY_UNITS,
};
pub use intersection::{IntersectionEntry, IntersectionOptions, WatchList};
