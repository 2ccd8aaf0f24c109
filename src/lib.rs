//! Bead Timer - a round-robin topic timer
//!
//! The core is [`TimerEngine`], a clock-less state machine that rotates
//! through topics, counts elapsed time and asks for audio cues. Around it
//! sits a small host: a 1 Hz tick driver, a cue player and an HTTP control
//! surface for pause, resume, reset and duration changes.

pub mod config;
pub mod error;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, EngineError};
pub use state::{AppState, CueKind, Effect, TimerEngine, TimerSnapshot};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
