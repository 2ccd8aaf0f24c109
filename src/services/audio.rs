//! Audio cue playback

use std::path::{Path, PathBuf};
use anyhow::{bail, Context};
use tokio::{io::AsyncWriteExt, process::Command};
use tracing::{debug, info};

use crate::state::CueKind;

/// Default sound played near the end of an interval
pub const WARNING_SOUND: &str = "lo-metal-tone.mp3";
/// Default sound played when a topic becomes active
pub const TRANSITION_SOUND: &str = "hi-metal-tone.mp3";

/// How the host turns a cue into sound
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CuePlayer {
    /// Only log the cue
    Silent,
    /// Ring the terminal bell
    Bell,
    /// Run `program <sound file>` for every cue
    Command {
        program: String,
        warning_sound: PathBuf,
        transition_sound: PathBuf,
    },
}

impl CuePlayer {
    /// Command player using the default sound names inside `sound_dir`.
    pub fn command(program: impl Into<String>, sound_dir: &Path) -> Self {
        CuePlayer::Command {
            program: program.into(),
            warning_sound: sound_dir.join(WARNING_SOUND),
            transition_sound: sound_dir.join(TRANSITION_SOUND),
        }
    }

    /// Play one cue to completion.
    pub async fn play(&self, kind: CueKind) -> anyhow::Result<()> {
        match self {
            CuePlayer::Silent => {
                info!("Cue: {}", kind.as_str());
                Ok(())
            }
            CuePlayer::Bell => {
                let mut stdout = tokio::io::stdout();
                stdout
                    .write_all(b"\x07")
                    .await
                    .context("Failed to ring terminal bell")?;
                stdout.flush().await.context("Failed to flush terminal bell")
            }
            CuePlayer::Command {
                program,
                warning_sound,
                transition_sound,
            } => {
                let sound = match kind {
                    CueKind::Warning => warning_sound,
                    CueKind::Transition => transition_sound,
                };
                debug!("Playing {} cue with {} {}", kind.as_str(), program, sound.display());

                let output = Command::new(program)
                    .arg(sound)
                    .output()
                    .await
                    .with_context(|| format!("Failed to execute {}", program))?;

                if !output.status.success() {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    bail!("{} exited with {}: {}", program, output.status, stderr.trim());
                }
                Ok(())
            }
        }
    }
}
