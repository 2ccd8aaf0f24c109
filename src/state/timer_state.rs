//! Timer state record and read-only snapshot

use serde::{Deserialize, Serialize};

/// The single mutable record owned by the engine.
///
/// Only [`TimerEngine`](super::TimerEngine) mutates it; fields are crate-private
/// so the invariants below hold by construction:
/// `0 <= time_remaining <= interval_duration` and `interval_duration > 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    pub(crate) topics: Vec<String>,
    pub(crate) current_topic_index: usize,
    pub(crate) time_remaining: u32,
    pub(crate) overall_elapsed: u64,
    pub(crate) interval_duration: u32,
    pub(crate) has_fired_warning_cue: bool,
    pub(crate) is_paused: bool,
}

impl TimerState {
    /// Fresh state at the first topic with a full interval, running.
    pub(crate) fn new(topics: Vec<String>, interval_duration: u32) -> Self {
        Self {
            topics,
            current_topic_index: 0,
            time_remaining: interval_duration,
            overall_elapsed: 0,
            interval_duration,
            has_fired_warning_cue: false,
            is_paused: false,
        }
    }

    pub(crate) fn current_topic(&self) -> &str {
        &self.topics[self.current_topic_index]
    }

    pub(crate) fn next_topic_index(&self) -> usize {
        (self.current_topic_index + 1) % self.topics.len()
    }
}

/// Read-only view of the timer handed to the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub topic_index: usize,
    pub current_topic: String,
    pub next_topic: String,
    pub time_remaining: u32,
    pub overall_elapsed: u64,
    pub overall_elapsed_display: String,
    pub interval_duration: u32,
    pub warning_fired: bool,
    pub is_paused: bool,
}

impl From<&TimerState> for TimerSnapshot {
    fn from(state: &TimerState) -> Self {
        Self {
            topic_index: state.current_topic_index,
            current_topic: state.current_topic().to_string(),
            next_topic: state.topics[state.next_topic_index()].clone(),
            time_remaining: state.time_remaining,
            overall_elapsed: state.overall_elapsed,
            overall_elapsed_display: format_clock(state.overall_elapsed),
            interval_duration: state.interval_duration,
            warning_fired: state.has_fired_warning_cue,
            is_paused: state.is_paused,
        }
    }
}

/// Format seconds as `m:ss`; minutes are not wrapped into hours.
pub fn format_clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
