//! State management module
//!
//! This module contains the timer engine, its state record and the shared
//! host state that wraps it.

pub mod app_state;
pub mod effects;
pub mod engine;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, DurationInput};
pub use effects::{CueKind, Effect};
pub use engine::{TimerEngine, WARNING_THRESHOLD_SECS};
pub use timer_state::{format_clock, TimerSnapshot, TimerState};
