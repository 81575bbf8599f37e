//! Playback controller.
//!
//! A `PlaybackSession` owns all transport state for the one bound video and
//! the media capability playing it. User intents are methods on the session;
//! capability events come in through `apply_media_event`. The visual layout is
//! never stored, it is derived as a `PlayerMode`.
//!
//! # Module Structure
//!
//! - `session` - the state machine
//! - `mode` - `PlayerMode` derivation
//! - `gesture` - drag-to-dismiss threshold handling
//! - `recommend` - "Up Next" list construction
//! - `time` - elapsed/duration formatting

mod gesture;
mod mode;
mod recommend;
mod session;
mod time;

pub use gesture::{DragOutcome, DISMISS_THRESHOLD};
pub use mode::PlayerMode;
pub use recommend::{recommendations, recommended_videos, RecommendationGroup};
pub use session::{EventDisposition, PlaybackSession, SessionOptions};
pub use time::format_time;
