//! Playback speed

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Strictly positive, finite playback speed multiplier
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct PlaybackRate(f64);

impl PlaybackRate {
    pub const NORMAL: PlaybackRate = PlaybackRate(1.0);

    /// Speeds offered as UI presets. Any other positive rate is accepted too.
    pub const PRESETS: [PlaybackRate; 4] = [
        PlaybackRate(0.5),
        PlaybackRate(1.0),
        PlaybackRate(2.0),
        PlaybackRate(4.0),
    ];

    pub fn new(rate: f64) -> Option<Self> {
        (rate.is_finite() && rate > 0.0).then_some(Self(rate))
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// Time between automatic advances: `1000 / rate` milliseconds.
    pub fn interval(self) -> Duration {
        Duration::from_secs_f64(1.0 / self.0)
    }

    /// Next faster preset in `presets`, wrapping to the slowest.
    pub fn next_preset(self, presets: &[PlaybackRate]) -> PlaybackRate {
        presets
            .iter()
            .copied()
            .filter(|preset| preset.0 > self.0)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .or_else(|| presets.iter().copied().min_by(|a, b| a.0.total_cmp(&b.0)))
            .unwrap_or(self)
    }
}

impl Default for PlaybackRate {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl TryFrom<f64> for PlaybackRate {
    type Error = String;

    fn try_from(rate: f64) -> Result<Self, Self::Error> {
        PlaybackRate::new(rate).ok_or_else(|| format!("playback rate must be a positive number, got {rate}"))
    }
}

impl From<PlaybackRate> for f64 {
    fn from(rate: PlaybackRate) -> f64 {
        rate.0
    }
}

impl fmt::Display for PlaybackRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.0)
    }
}
