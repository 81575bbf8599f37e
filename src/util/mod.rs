//! Small helpers shared by the UI and the catalog loader.
//!
//! - **Text**: terminal-width aware measuring and truncation, control
//!   character stripping for catalog-provided strings
//! - **URLs**: validation before handing a link to the system browser
//! - **Tasks**: panic capture for spawned background work

mod open_url;
mod task;
mod text;

pub use open_url::{validate_url_for_open, UrlError};
pub use task::catch_task_panic;
pub use text::{display_width, strip_control_chars, truncate_to_width};
