//! The page's interactive controllers.
//!
//! Each controller owns a disjoint slice of the document and is installed
//! independently: a missing collaborator means that controller is simply
//! absent, never that the page fails to start.
//!
//! - [`menu`]: mobile navigation panel and mutually exclusive dropdowns
//! - [`search`]: debounced search-form submission
//! - [`sort_filter`]: result ordering and text filtering
//! - [`reveal`]: one-way reveal of elements entering the viewport
//! - [`lazy_media`]: one-shot deferred image loading
//! - [`validation`]: inline required-field validation on submit
//! - [`accessibility`]: escape-closes-all and the skip link
//! - [`scroll`]: viewport tracking with a settle debounce

pub mod accessibility;
pub mod lazy_media;
pub mod menu;
pub mod reveal;
pub mod scroll;
pub mod search;
pub mod sort_filter;
pub mod validation;

pub use accessibility::{AccessibilityController, Key};
pub use lazy_media::LazyMediaLoader;
pub use menu::{DropdownId, MenuController, MenuPair, MenuState};
pub use reveal::RevealAnimator;
pub use scroll::ScrollTracker;
pub use search::SearchTrigger;
pub use sort_filter::{FilterSummary, SortFilterEngine};
pub use validation::{FormValidator, ValidationReport};
