//! Stepwise core: step-trace recording and playback
//!
//! Algorithms drive a tracer while they compute, producing an immutable,
//! ordered list of steps. A player replays that list with a cursor that can
//! be stepped, scrubbed or advanced on a timer.
//!
//! ```
//! use stepwise_core::algorithm::sorting::bubble_sort;
//! use stepwise_core::playback::{ManualScheduler, Player};
//!
//! let tracer = bubble_sort(&[5.0, 3.0, 8.0]).unwrap();
//! let mut player = Player::with_trace(tracer.into_trace(), ManualScheduler::new());
//! player.step_forward();
//! assert_eq!(player.cursor(), 1);
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod config;
pub mod playback;
pub mod trace;

pub use algorithm::{AlgorithmInput, AlgorithmKind};
pub use config::{ConfigError, PlaybackConfig};
pub use playback::{ClockScheduler, ManualScheduler, PlaybackRate, Player, Scheduler, TimerId};
pub use trace::{GraphTracer, SequenceTracer, Step, StepKind, Trace, TraceError};
