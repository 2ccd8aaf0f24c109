//! Side-effect intents emitted by the timer engine

use serde::{Deserialize, Serialize};

/// Which audio cue the host should play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CueKind {
    /// Near the end of an interval
    Warning,
    /// A topic became active, including on resume
    Transition,
}

impl CueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CueKind::Warning => "warning",
            CueKind::Transition => "transition",
        }
    }
}

/// An effect produced by an engine operation, in emission order.
///
/// The engine never performs these itself; the host renders and plays them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Effect {
    PlayCue(CueKind),
    TopicChanged(usize),
}
