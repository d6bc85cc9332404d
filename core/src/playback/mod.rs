//! Trace playback
//!
//! A [`Player`] replays a finished trace. Automatic advancing is driven by
//! an injected [`Scheduler`], so playback runs the same against the wall
//! clock or a virtual clock in tests.

pub mod player;
pub mod rate;
pub mod scheduler;

pub use self::player::Player;
pub use self::rate::PlaybackRate;
pub use self::scheduler::{ClockScheduler, ManualScheduler, Scheduler, TimerId};
