//! Playback controller over a finished trace
//!
//! The player owns a cursor into an immutable [`Trace`] and, while playing,
//! one timer from its [`Scheduler`]. Every control is total: out-of-range
//! requests clamp, and an empty trace turns every control into a no-op, so
//! the player is always in a state a renderer can draw.

use std::time::Duration;

use log::{debug, trace};

use super::rate::PlaybackRate;
use super::scheduler::{Scheduler, TimerId};
use crate::config::PlaybackConfig;
use crate::trace::{Step, Trace};

#[derive(Debug)]
pub struct Player<S: Scheduler> {
    steps: Trace,
    cursor: usize,
    playing: bool,
    rate: PlaybackRate,
    scheduler: S,
    timer: Option<TimerId>,
}

impl<S: Scheduler> Player<S> {
    /// Player with nothing loaded
    pub fn new(scheduler: S) -> Self {
        Self {
            steps: Trace::empty(),
            cursor: 0,
            playing: false,
            rate: PlaybackRate::default(),
            scheduler,
            timer: None,
        }
    }

    pub fn with_trace(trace: Trace, scheduler: S) -> Self {
        let mut player = Self::new(scheduler);
        player.load(trace);
        player
    }

    /// Player starting at the configured default rate
    pub fn with_config(config: &PlaybackConfig, scheduler: S) -> Self {
        let mut player = Self::new(scheduler);
        player.rate = config.default_rate;
        player
    }

    /// Replaces the trace, rewinding and stopping playback.
    pub fn load(&mut self, trace: Trace) {
        self.stop_timer();
        self.playing = false;
        self.cursor = 0;
        self.steps = trace;
        debug!("loaded trace with {} steps", self.steps.len());
    }

    /// Starts automatic advancing. No-op when empty, already at the last
    /// step, or already playing.
    pub fn play(&mut self) {
        if self.playing || self.at_end() {
            trace!("play ignored (playing={}, cursor={}, len={})", self.playing, self.cursor, self.len());
            return;
        }
        self.playing = true;
        self.start_timer();
        debug!("playback started at {}", self.rate);
    }

    pub fn pause(&mut self) {
        self.stop_timer();
        if self.playing {
            self.playing = false;
            debug!("playback paused at step {}", self.cursor);
        }
    }

    /// Moves one step forward, clamped. Leaves `playing` untouched.
    pub fn step_forward(&mut self) {
        if !self.at_end() {
            self.cursor += 1;
        }
    }

    /// Moves one step back, clamped. Leaves `playing` untouched.
    pub fn step_backward(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        self.pause();
        self.cursor = 0;
    }

    /// Jumps to `index`, clamped to the trace.
    pub fn seek(&mut self, index: usize) {
        self.cursor = index.min(self.last_index());
    }

    /// Changes the speed. A running timer is replaced so the next advance
    /// happens one new interval from now.
    pub fn set_rate(&mut self, rate: PlaybackRate) {
        self.rate = rate;
        if self.playing {
            self.stop_timer();
            self.start_timer();
            debug!("playback rate changed to {}", rate);
        }
    }

    /// Applies every timer firing the scheduler has due. Returns how many
    /// of them advanced the cursor.
    pub fn poll(&mut self) -> usize {
        let fired = self.scheduler.due();
        fired.into_iter().filter(|&id| self.on_timer(id)).count()
    }

    /// Step at the cursor; `None` when nothing is loaded.
    pub fn current_step(&self) -> Option<&Step> {
        self.steps.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn rate(&self) -> PlaybackRate {
        self.rate
    }

    pub fn interval(&self) -> Duration {
        self.rate.interval()
    }

    /// Fraction of the trace behind the cursor, from 0.0 to 1.0
    pub fn progress(&self) -> f64 {
        match self.len() {
            0 => 0.0,
            1 => 1.0,
            len => self.cursor as f64 / (len - 1) as f64,
        }
    }

    pub fn trace(&self) -> &Trace {
        &self.steps
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    fn on_timer(&mut self, id: TimerId) -> bool {
        if !self.playing || self.timer != Some(id) {
            trace!("ignoring stale timer {:?}", id);
            return false;
        }

        let advanced = !self.at_end();
        if advanced {
            self.cursor += 1;
        }
        if self.at_end() {
            self.stop_timer();
            self.playing = false;
            debug!("playback reached final step {}", self.cursor);
        }
        advanced
    }

    fn last_index(&self) -> usize {
        self.len().saturating_sub(1)
    }

    fn at_end(&self) -> bool {
        self.cursor >= self.last_index()
    }

    fn start_timer(&mut self) {
        self.timer = Some(self.scheduler.start(self.rate.interval()));
    }

    fn stop_timer(&mut self) {
        if let Some(id) = self.timer.take() {
            self.scheduler.cancel(id);
        }
    }
}

impl<S: Scheduler> Drop for Player<S> {
    fn drop(&mut self) {
        self.stop_timer();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::ManualScheduler;
    use crate::trace::{SequenceStep, StepKind};
    use proptest::prelude::*;

    const SECOND: Duration = Duration::from_secs(1);

    fn trace_of(len: usize) -> Trace {
        let steps = (0..len)
            .map(|i| {
                let kind = match i {
                    0 => StepKind::Init,
                    i if i == len - 1 => StepKind::End,
                    _ => StepKind::Note,
                };
                Step::Sequence(SequenceStep {
                    kind,
                    snapshot: vec![i as f64],
                    message: format!("step {i}"),
                    highlighted_indices: Vec::new(),
                    line_number: None,
                })
            })
            .collect();
        Trace::new(steps)
    }

    fn player(len: usize) -> Player<ManualScheduler> {
        Player::with_trace(trace_of(len), ManualScheduler::new())
    }

    fn tick(player: &mut Player<ManualScheduler>, dt: Duration) -> usize {
        player.scheduler_mut().advance(dt);
        player.poll()
    }

    #[test]
    fn test_empty_player_is_renderable() {
        let mut player = Player::new(ManualScheduler::new());
        assert!(player.current_step().is_none());
        assert_eq!(player.cursor(), 0);

        player.play();
        assert!(!player.is_playing());
        assert_eq!(player.scheduler().active_timers(), 0);

        player.step_forward();
        player.step_backward();
        player.seek(10);
        assert_eq!(player.cursor(), 0);
        assert_eq!(player.progress(), 0.0);
    }

    #[test]
    fn test_play_advances_once_per_interval_and_auto_stops() {
        let mut player = player(3);
        player.play();
        assert!(player.is_playing());

        assert_eq!(tick(&mut player, SECOND), 1);
        assert_eq!(player.cursor(), 1);
        assert!(player.is_playing());

        assert_eq!(tick(&mut player, SECOND), 1);
        assert_eq!(player.cursor(), 2);
        assert!(!player.is_playing());
        assert_eq!(player.scheduler().active_timers(), 0);

        assert_eq!(tick(&mut player, 10 * SECOND), 0);
        assert_eq!(player.cursor(), 2);
    }

    #[test]
    fn test_late_poll_stops_exactly_at_end() {
        let mut player = player(4);
        player.play();
        assert_eq!(tick(&mut player, 60 * SECOND), 3);
        assert_eq!(player.cursor(), 3);
        assert!(!player.is_playing());
        assert_eq!(player.current_step().unwrap().kind(), StepKind::End);
    }

    #[test]
    fn test_play_at_last_step_is_noop() {
        let mut player = player(3);
        player.seek(2);
        player.play();
        assert!(!player.is_playing());
        assert_eq!(player.scheduler().active_timers(), 0);
    }

    #[test]
    fn test_pause_is_idempotent() {
        let mut player = player(5);
        player.play();
        player.pause();
        player.pause();
        assert!(!player.is_playing());

        assert_eq!(tick(&mut player, 5 * SECOND), 0);
        assert_eq!(player.cursor(), 0);
    }

    #[test]
    fn test_cursor_clamps_at_boundaries() {
        let mut player = player(3);
        player.step_backward();
        assert_eq!(player.cursor(), 0);

        player.seek(2);
        player.step_forward();
        assert_eq!(player.cursor(), 2);

        player.seek(usize::MAX);
        assert_eq!(player.cursor(), 2);
        assert_eq!(player.progress(), 1.0);
    }

    #[test]
    fn test_stepping_keeps_playing_state() {
        let mut player = player(5);
        player.play();
        player.step_forward();
        assert!(player.is_playing());
        assert_eq!(player.cursor(), 1);
        player.step_backward();
        assert!(player.is_playing());
    }

    #[test]
    fn test_reset_rewinds_and_stops() {
        let mut player = player(4);
        player.play();
        tick(&mut player, SECOND);
        player.reset();

        assert_eq!(player.cursor(), 0);
        assert!(!player.is_playing());
        assert_eq!(player.scheduler().active_timers(), 0);
    }

    #[test]
    fn test_rate_change_while_playing_replaces_timer() {
        let mut player = player(10);
        player.play();

        tick(&mut player, Duration::from_millis(600));
        assert_eq!(player.cursor(), 0);

        player.set_rate(PlaybackRate::new(2.0).unwrap());
        assert_eq!(player.scheduler().active_timers(), 1);

        // the old timer would have fired at 1000ms; only the new one may fire
        assert_eq!(tick(&mut player, Duration::from_millis(450)), 0);
        assert_eq!(tick(&mut player, Duration::from_millis(50)), 1);
        assert_eq!(player.cursor(), 1);

        assert_eq!(tick(&mut player, Duration::from_millis(500)), 1);
        assert_eq!(player.cursor(), 2);
    }

    #[test]
    fn test_rate_change_while_paused_does_not_start_timer() {
        let mut player = player(3);
        player.set_rate(PlaybackRate::new(4.0).unwrap());
        assert_eq!(player.scheduler().active_timers(), 0);
        assert_eq!(player.interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_load_cancels_running_timer() {
        let mut player = player(5);
        player.play();
        tick(&mut player, SECOND);

        player.load(trace_of(3));
        assert_eq!(player.cursor(), 0);
        assert!(!player.is_playing());
        assert_eq!(player.scheduler().active_timers(), 0);
        assert_eq!(tick(&mut player, 3 * SECOND), 0);
    }

    /// Scheduler that keeps firing timers after they were cancelled
    #[derive(Default)]
    struct LeakyScheduler {
        inner: ManualScheduler,
        leaked: Vec<TimerId>,
    }

    impl Scheduler for LeakyScheduler {
        fn start(&mut self, interval: Duration) -> TimerId {
            self.inner.start(interval)
        }

        fn cancel(&mut self, id: TimerId) {
            self.leaked.push(id);
        }

        fn due(&mut self) -> Vec<TimerId> {
            self.inner.due()
        }

        fn until_next(&self) -> Option<Duration> {
            self.inner.until_next()
        }
    }

    #[test]
    fn test_stale_timer_cannot_move_cursor() {
        let mut player = Player::with_trace(trace_of(5), LeakyScheduler::default());
        player.play();
        player.load(trace_of(5));
        assert_eq!(player.scheduler().leaked.len(), 1);

        player.scheduler_mut().inner.advance(3 * SECOND);
        assert_eq!(player.poll(), 0);
        assert_eq!(player.cursor(), 0);

        player.play();
        player.set_rate(PlaybackRate::new(2.0).unwrap());
        player.scheduler_mut().inner.advance(Duration::from_millis(500));
        assert_eq!(player.poll(), 1);
        assert_eq!(player.cursor(), 1);
    }

    #[test]
    fn test_config_sets_initial_rate() {
        let config = PlaybackConfig {
            default_rate: PlaybackRate::new(2.0).unwrap(),
            ..PlaybackConfig::default()
        };
        let player = Player::with_config(&config, ManualScheduler::new());
        assert_eq!(player.rate().get(), 2.0);
        assert!(player.is_empty());
    }

    #[derive(Debug, Clone)]
    enum Control {
        Play,
        Pause,
        Forward,
        Backward,
        Reset,
        Seek(usize),
        Rate(f64),
        Wait(u64),
    }

    fn control() -> impl Strategy<Value = Control> {
        prop_oneof![
            Just(Control::Play),
            Just(Control::Pause),
            Just(Control::Forward),
            Just(Control::Backward),
            Just(Control::Reset),
            (0usize..20).prop_map(Control::Seek),
            prop::sample::select(vec![0.5, 1.0, 2.0, 4.0]).prop_map(Control::Rate),
            (0u64..3000).prop_map(Control::Wait),
        ]
    }

    proptest! {
        #[test]
        fn prop_cursor_stays_in_range(len in 0usize..8, controls in prop::collection::vec(control(), 0..40)) {
            let mut player = player_of_len(len);
            for control in controls {
                match control {
                    Control::Play => player.play(),
                    Control::Pause => player.pause(),
                    Control::Forward => player.step_forward(),
                    Control::Backward => player.step_backward(),
                    Control::Reset => player.reset(),
                    Control::Seek(index) => player.seek(index),
                    Control::Rate(rate) => player.set_rate(PlaybackRate::new(rate).unwrap()),
                    Control::Wait(ms) => {
                        tick(&mut player, Duration::from_millis(ms));
                    }
                }
                prop_assert!(player.cursor() <= len.saturating_sub(1));
                prop_assert!(player.scheduler().active_timers() <= 1);
                prop_assert_eq!(player.is_playing(), player.scheduler().active_timers() == 1);
            }
        }
    }

    fn player_of_len(len: usize) -> Player<ManualScheduler> {
        if len == 0 {
            Player::new(ManualScheduler::new())
        } else {
            player(len)
        }
    }
}
