//! Shared host state wrapping the timer engine

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use super::{Effect, TimerEngine, TimerSnapshot};
use crate::error::{AppError, EngineError};

/// Duration as it arrives from a client: a whole number or raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DurationInput {
    Seconds(i64),
    Raw(String),
}

impl From<serde_json::Value> for DurationInput {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(seconds) => DurationInput::Seconds(seconds),
                None => DurationInput::Raw(n.to_string()),
            },
            serde_json::Value::String(raw) => DurationInput::Raw(raw),
            other => DurationInput::Raw(other.to_string()),
        }
    }
}

/// Host state: the engine behind a mutex plus channels fanning out its output.
///
/// Every mutation goes through this type so the tick driver and the HTTP
/// handlers share one mutator context.
#[derive(Debug)]
pub struct AppState {
    engine: Mutex<TimerEngine>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Effects emitted by the engine, consumed by the cue player
    pub effect_tx: broadcast::Sender<Effect>,
    /// Latest snapshot after every mutation
    pub snapshot_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<TimerSnapshot>,
    /// Bumped whenever the clock must restart its period (resume, reset)
    pub clock_restart_tx: watch::Sender<u64>,
    /// Effects produced before anyone subscribed (the start cue)
    startup_effects: Mutex<Vec<Effect>>,
}

impl AppState {
    /// Wrap a freshly started engine.
    ///
    /// `initial_effects` are the ones returned by [`TimerEngine::start`]; they
    /// are held until a consumer calls [`take_startup_effects`](Self::take_startup_effects).
    pub fn new(port: u16, host: String, engine: TimerEngine, initial_effects: Vec<Effect>) -> Self {
        let (effect_tx, _) = broadcast::channel(100);
        let (snapshot_tx, snapshot_rx) = watch::channel(engine.snapshot());

        Self {
            engine: Mutex::new(engine),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            effect_tx,
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
            clock_restart_tx: watch::Sender::new(0),
            startup_effects: Mutex::new(initial_effects),
        }
    }

    /// Build an engine from `topics`/`duration_secs` and wrap it.
    pub fn start(
        port: u16,
        host: String,
        topics: Vec<String>,
        duration_secs: u32,
    ) -> Result<Self, EngineError> {
        let (engine, effects) = TimerEngine::start(topics, duration_secs)?;
        info!(
            "Timer started with {} topics, {}s per topic",
            engine.topics().len(),
            engine.interval_duration()
        );
        Ok(Self::new(port, host, engine, effects))
    }

    fn lock_engine(&self) -> Result<MutexGuard<'_, TimerEngine>, AppError> {
        self.engine
            .lock()
            .map_err(|e| AppError::StateLock(e.to_string()))
    }

    /// Lock the engine, apply `op`, then publish the snapshot and effects.
    fn apply<T, F>(&self, action: Option<&str>, op: F) -> Result<(T, TimerSnapshot), AppError>
    where
        F: FnOnce(&mut TimerEngine) -> Result<(T, Vec<Effect>), EngineError>,
    {
        let mut engine = self.lock_engine()?;
        let (value, effects) = op(&mut *engine)?;
        let snapshot = engine.snapshot();
        // Publish under the lock so effects keep emission order across callers
        self.publish(snapshot.clone(), effects);
        drop(engine);

        if let Some(action) = action {
            self.record_action(action);
        }
        Ok((value, snapshot))
    }

    fn publish(&self, snapshot: TimerSnapshot, effects: Vec<Effect>) {
        self.snapshot_tx.send_replace(snapshot);
        for effect in effects {
            // No subscribers is fine, effects are fire-and-forget
            if self.effect_tx.send(effect).is_err() {
                debug!("No effect listeners, dropping {:?}", effect);
            }
        }
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Deliver one clock tick.
    pub fn tick(&self) -> Result<TimerSnapshot, AppError> {
        self.apply(None, |engine| Ok(((), engine.on_tick())))
            .map(|(_, snapshot)| snapshot)
    }

    /// Pause the timer. Returns whether it was running.
    pub fn pause(&self) -> Result<(bool, TimerSnapshot), AppError> {
        let result = self.apply(Some("pause"), |engine| Ok((engine.pause(), Vec::new())))?;
        if result.0 {
            info!("Timer paused at {}s remaining", result.1.time_remaining);
        }
        Ok(result)
    }

    /// Resume the timer. Returns whether it was paused.
    pub fn resume(&self) -> Result<(bool, TimerSnapshot), AppError> {
        let result = self.apply(Some("resume"), |engine| {
            let effects = engine.resume();
            Ok((!effects.is_empty(), effects))
        })?;
        if result.0 {
            info!("Timer resumed on topic '{}'", result.1.current_topic);
            self.restart_clock();
        }
        Ok(result)
    }

    pub fn reset(&self) -> Result<TimerSnapshot, AppError> {
        info!("Resetting timer");
        let (_, snapshot) = self.apply(Some("reset"), |engine| Ok(((), engine.reset())))?;
        self.restart_clock();
        Ok(snapshot)
    }

    fn restart_clock(&self) {
        self.clock_restart_tx.send_modify(|generation| *generation += 1);
    }

    /// Change the per-topic duration. Rejected input leaves the timer untouched.
    pub fn set_duration(&self, input: &DurationInput) -> Result<TimerSnapshot, AppError> {
        let result = self.apply(Some("duration"), |engine| {
            match input {
                DurationInput::Seconds(seconds) => engine.set_duration(*seconds)?,
                DurationInput::Raw(raw) => engine.set_duration_from_input(raw)?,
            }
            Ok(((), Vec::new()))
        });

        match result {
            Ok((_, snapshot)) => {
                info!("Duration per topic set to {}s", snapshot.interval_duration);
                Ok(snapshot)
            }
            Err(e) => {
                warn!("Rejected duration change {:?}: {}", input, e);
                Err(e)
            }
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Result<TimerSnapshot, AppError> {
        Ok(self.lock_engine()?.snapshot())
    }

    /// The fixed topic rotation
    pub fn topics(&self) -> Vec<String> {
        self.lock_engine()
            .map(|engine| engine.topics().to_vec())
            .unwrap_or_default()
    }

    /// Name of the topic at `index`, if any.
    pub fn topic_name(&self, index: usize) -> Option<String> {
        self.lock_engine()
            .ok()
            .and_then(|engine| engine.topics().get(index).cloned())
    }

    /// Hand over effects emitted at construction. Later calls return nothing.
    pub fn take_startup_effects(&self) -> Vec<Effect> {
        self.startup_effects
            .lock()
            .map(|mut effects| std::mem::take(&mut *effects))
            .unwrap_or_default()
    }

    pub fn subscribe_effects(&self) -> broadcast::Receiver<Effect> {
        self.effect_tx.subscribe()
    }

    /// Changes each time the tick period has to start over
    pub fn subscribe_clock_restarts(&self) -> watch::Receiver<u64> {
        self.clock_restart_tx.subscribe()
    }

    pub fn subscribe_snapshots(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::state::CueKind;

    fn state() -> AppState {
        let topics = vec!["Focus".to_string(), "Reflect".to_string()];
        AppState::start(20554, "127.0.0.1".to_string(), topics, 60).unwrap()
    }

    #[test]
    fn duration_input_from_json() {
        assert_eq!(DurationInput::from(json!(90)), DurationInput::Seconds(90));
        assert_eq!(DurationInput::from(json!("90")), DurationInput::Raw("90".into()));
        assert_eq!(DurationInput::from(json!(1.5)), DurationInput::Raw("1.5".into()));
        assert_eq!(DurationInput::from(json!(null)), DurationInput::Raw("null".into()));
    }

    #[test]
    fn startup_effects_are_taken_once() {
        let state = state();
        assert_eq!(
            state.take_startup_effects(),
            vec![Effect::PlayCue(CueKind::Transition)]
        );
        assert!(state.take_startup_effects().is_empty());
    }

    #[test]
    fn mutations_publish_snapshot_and_effects() {
        let state = state();
        let mut effects = state.subscribe_effects();
        let snapshots = state.subscribe_snapshots();

        let (changed, snapshot) = state.pause().unwrap();
        assert!(changed);
        assert!(snapshot.is_paused);
        assert!(snapshots.borrow().is_paused);

        let (changed, _) = state.resume().unwrap();
        assert!(changed);
        assert_eq!(
            effects.try_recv().unwrap(),
            Effect::PlayCue(CueKind::Transition)
        );

        let restarts = state.subscribe_clock_restarts();
        state.reset().unwrap();
        assert_eq!(effects.try_recv().unwrap(), Effect::TopicChanged(0));
        assert!(restarts.has_changed().unwrap());
        assert_eq!(state.get_last_action().0.as_deref(), Some("reset"));
    }

    #[test]
    fn rejected_duration_is_reported_and_ignored() {
        let state = state();
        state.tick().unwrap();

        let err = state
            .set_duration(&DurationInput::Raw("soon".into()))
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(state.snapshot().unwrap().interval_duration, 60);
        assert_eq!(state.snapshot().unwrap().time_remaining, 59);
        assert_eq!(state.get_last_action().0, None);

        let snapshot = state.set_duration(&DurationInput::Seconds(30)).unwrap();
        assert_eq!(snapshot.time_remaining, 30);
    }

    #[test]
    fn uptime_is_formatted() {
        assert!(state().get_uptime().ends_with('s'));
    }
}
