//! Background tasks module
//!
//! This module contains the tasks that run alongside the HTTP server: the
//! clock that ticks the engine and the consumer of its effects.

pub mod cue_player;
pub mod tick_driver;

// Re-export main functions
pub use cue_player::cue_player_task;
pub use tick_driver::{tick_driver_task, TICK_PERIOD};
