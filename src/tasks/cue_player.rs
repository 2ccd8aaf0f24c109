//! Effect consumer: logs topic changes and plays cues

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::{
    services::CuePlayer,
    state::{AppState, Effect},
};

/// Background task applying engine effects on the host.
///
/// Cues are played on their own tasks; a failed or slow cue never holds up
/// the effect stream or the timer.
pub async fn cue_player_task(state: Arc<AppState>, player: Arc<CuePlayer>) {
    info!("Starting cue player task ({:?})", player);

    let mut effect_rx = state.subscribe_effects();
    for effect in state.take_startup_effects() {
        handle_effect(&state, &player, effect);
    }

    loop {
        match effect_rx.recv().await {
            Ok(effect) => handle_effect(&state, &player, effect),
            Err(RecvError::Lagged(skipped)) => {
                warn!("Cue player fell behind, skipped {} effects", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Effect channel closed, stopping cue player");
                break;
            }
        }
    }
}

fn handle_effect(state: &AppState, player: &Arc<CuePlayer>, effect: Effect) {
    match effect {
        Effect::PlayCue(kind) => {
            let player = Arc::clone(player);
            tokio::spawn(async move {
                if let Err(e) = player.play(kind).await {
                    warn!("Failed to play {} cue: {:#}", kind.as_str(), e);
                }
            });
        }
        Effect::TopicChanged(index) => {
            let name = state.topic_name(index).unwrap_or_default();
            info!("Now on topic {}: {}", index + 1, name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn drains_startup_effects() {
        let topics = vec!["Focus".to_string()];
        let state = Arc::new(AppState::start(0, "test".to_string(), topics, 30).unwrap());
        let player = Arc::new(CuePlayer::Silent);

        tokio::spawn(cue_player_task(Arc::clone(&state), player));
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(state.take_startup_effects().is_empty());
    }

    #[tokio::test]
    async fn failing_player_does_not_stall_timer() {
        let topics = vec!["Focus".to_string(), "Rest".to_string()];
        let state = Arc::new(AppState::start(0, "test".to_string(), topics, 1).unwrap());
        let player = Arc::new(CuePlayer::command(
            "bead-timer-no-such-player",
            std::path::Path::new("."),
        ));

        tokio::spawn(cue_player_task(Arc::clone(&state), player));
        tokio::time::sleep(Duration::from_millis(20)).await;

        for _ in 0..4 {
            state.tick().unwrap();
        }
        tokio::time::sleep(Duration::from_millis(20)).await;

        let snapshot = state.snapshot().unwrap();
        assert_eq!(snapshot.overall_elapsed, 4);
        assert_eq!(snapshot.topic_index, 0);
    }
}
