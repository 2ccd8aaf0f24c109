//! External clock driving the timer engine

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info, trace};

use crate::state::AppState;

/// Nominal tick period
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Background task delivering one tick per `period` while the timer runs.
///
/// The clock is stopped when a snapshot shows the timer paused and re-armed
/// with a full period on resume or reset, even when a pause and resume land
/// between two polls. Ticks missed while the host was suspended are skipped
/// rather than replayed.
pub async fn tick_driver_task(state: Arc<AppState>, period: Duration) {
    info!("Starting tick driver ({}ms period)", period.as_millis());

    let mut snapshot_rx = state.subscribe_snapshots();
    let mut restart_rx = state.subscribe_clock_restarts();

    loop {
        // Wait for the timer to run
        loop {
            let paused = snapshot_rx.borrow_and_update().is_paused;
            if !paused {
                break;
            }
            if snapshot_rx.changed().await.is_err() {
                debug!("Snapshot channel closed, stopping tick driver");
                return;
            }
        }

        debug!("Arming clock");
        restart_rx.borrow_and_update();
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match state.tick() {
                        Ok(snapshot) => trace!(
                            "Tick: {} {}s remaining, {} overall",
                            snapshot.current_topic,
                            snapshot.time_remaining,
                            snapshot.overall_elapsed_display
                        ),
                        Err(e) => error!("Failed to apply tick: {}", e),
                    }
                }

                changed = restart_rx.changed() => {
                    if changed.is_err() {
                        debug!("Restart channel closed, stopping tick driver");
                        return;
                    }
                    restart_rx.borrow_and_update();
                    debug!("Restarting clock");
                    ticker.reset();
                }

                changed = snapshot_rx.changed() => {
                    if changed.is_err() {
                        debug!("Snapshot channel closed, stopping tick driver");
                        return;
                    }
                    if snapshot_rx.borrow_and_update().is_paused {
                        debug!("Timer paused, stopping clock");
                        break;
                    }
                }
            }
        }
    }
}
