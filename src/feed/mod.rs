//! Feed view state: category filtering and card selection.
//!
//! The feed never owns catalog data. It holds the active filter plus a cursor
//! into the cards of the displayed sections, and resolves both against a
//! borrowed `Catalog` on demand.

mod filter;
mod view;

pub use filter::{CategoryFilter, ALL_LABEL};
pub use view::{FeedView, Pill};
