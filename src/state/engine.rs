//! Round-robin topic timer engine.
//!
//! The engine is a plain state machine with no clock of its own. A host
//! calls [`TimerEngine::on_tick`] once per second while running and applies
//! the returned [`Effect`]s (render, play a cue).
//!
//! ## State Transitions
//!
//! ```text
//! Running --pause()--> Paused --resume()--> Running
//!    ^  \
//!    |   on_tick(): count down, rotate topic when the interval runs out
//!    +---/
//! ```
//!
//! `reset()` and `set_duration()` are valid in both states.

use tracing::{debug, trace};

use super::effects::{CueKind, Effect};
use super::timer_state::{TimerSnapshot, TimerState};
use crate::error::EngineError;

/// Seconds remaining at which the warning cue fires.
pub const WARNING_THRESHOLD_SECS: u32 = 10;

/// Sole owner of [`TimerState`].
#[derive(Debug, Clone)]
pub struct TimerEngine {
    state: TimerState,
}

impl TimerEngine {
    /// Create a running engine for `topics`, each allotted `default_duration_secs`.
    ///
    /// The engine starts as if `resume()` had been called, so the returned
    /// effects carry the start cue for the first topic.
    pub fn start(
        topics: Vec<String>,
        default_duration_secs: u32,
    ) -> Result<(Self, Vec<Effect>), EngineError> {
        if topics.is_empty() {
            return Err(EngineError::EmptyTopics);
        }
        if default_duration_secs == 0 {
            return Err(EngineError::InvalidArgument(
                "default duration must be at least 1 second".to_string(),
            ));
        }

        let engine = Self {
            state: TimerState::new(topics, default_duration_secs),
        };
        Ok((engine, vec![Effect::PlayCue(CueKind::Transition)]))
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn topics(&self) -> &[String] {
        &self.state.topics
    }

    pub fn current_topic(&self) -> &str {
        self.state.current_topic()
    }

    pub fn current_topic_index(&self) -> usize {
        self.state.current_topic_index
    }

    pub fn time_remaining(&self) -> u32 {
        self.state.time_remaining
    }

    pub fn overall_elapsed(&self) -> u64 {
        self.state.overall_elapsed
    }

    pub fn interval_duration(&self) -> u32 {
        self.state.interval_duration
    }

    pub fn has_fired_warning_cue(&self) -> bool {
        self.state.has_fired_warning_cue
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot::from(&self.state)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Advance by one tick. Ignored while paused.
    ///
    /// At most one topic transition happens per call.
    pub fn on_tick(&mut self) -> Vec<Effect> {
        if self.state.is_paused {
            trace!("Tick delivered while paused, ignoring");
            return Vec::new();
        }

        let mut effects = Vec::new();
        if self.state.time_remaining > 1 {
            let new_time = self.state.time_remaining - 1;
            if new_time == WARNING_THRESHOLD_SECS && !self.state.has_fired_warning_cue {
                self.state.has_fired_warning_cue = true;
                effects.push(Effect::PlayCue(CueKind::Warning));
            }
            self.state.time_remaining = new_time;
        } else {
            self.advance(&mut effects);
        }
        self.state.overall_elapsed = self.state.overall_elapsed.saturating_add(1);

        effects
    }

    /// Stop applying ticks. Returns false if already paused.
    pub fn pause(&mut self) -> bool {
        if self.state.is_paused {
            return false;
        }
        self.state.is_paused = true;
        true
    }

    /// Start applying ticks again and signal the current topic as active.
    pub fn resume(&mut self) -> Vec<Effect> {
        if !self.state.is_paused {
            return Vec::new();
        }
        self.state.is_paused = false;
        vec![Effect::PlayCue(CueKind::Transition)]
    }

    /// Back to the first topic with a full interval and zero elapsed time.
    ///
    /// Keeps the topic list and the current duration setting.
    pub fn reset(&mut self) -> Vec<Effect> {
        self.state.current_topic_index = 0;
        self.state.time_remaining = self.state.interval_duration;
        self.state.overall_elapsed = 0;
        self.state.has_fired_warning_cue = false;
        self.state.is_paused = false;
        vec![Effect::TopicChanged(0)]
    }

    /// Change the per-topic duration.
    ///
    /// Applies to every later interval and clamps the current one; remaining
    /// time is never extended.
    pub fn set_duration(&mut self, seconds: i64) -> Result<(), EngineError> {
        if seconds <= 0 {
            return Err(EngineError::InvalidArgument(format!(
                "duration must be positive, got {}",
                seconds
            )));
        }
        let seconds = u32::try_from(seconds).map_err(|_| {
            EngineError::InvalidArgument(format!("duration {} is too large", seconds))
        })?;

        self.state.interval_duration = seconds;
        self.state.time_remaining = self.state.time_remaining.min(seconds);
        debug!(
            "Interval duration set to {}s ({}s remaining)",
            seconds, self.state.time_remaining
        );
        Ok(())
    }

    /// Like [`set_duration`](Self::set_duration) for raw user input.
    pub fn set_duration_from_input(&mut self, raw: &str) -> Result<(), EngineError> {
        let seconds = raw.trim().parse::<i64>().map_err(|_| {
            EngineError::InvalidArgument(format!("'{}' is not a whole number of seconds", raw))
        })?;
        self.set_duration(seconds)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn advance(&mut self, effects: &mut Vec<Effect>) {
        let next = self.state.next_topic_index();
        self.state.current_topic_index = next;
        self.state.has_fired_warning_cue = false;
        self.state.time_remaining = self.state.interval_duration;
        debug!("Rotating to topic {} ({})", next, self.state.current_topic());

        effects.push(Effect::TopicChanged(next));
        effects.push(Effect::PlayCue(CueKind::Transition));
    }
}
