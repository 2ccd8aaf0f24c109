//! External collaborators of the timer
//!
//! This module contains the audio side of cue playback. The engine only
//! asks for a cue; everything that touches the host system lives here.

pub mod audio;

// Re-export main types
pub use audio::CuePlayer;
