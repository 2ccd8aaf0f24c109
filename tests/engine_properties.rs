//! Property tests for the timer engine

use bead_timer::{CueKind, Effect, EngineError, TimerEngine};
use proptest::prelude::*;

fn engine(topic_count: usize, duration: u32) -> TimerEngine {
    let topics = (0..topic_count).map(|i| format!("topic-{}", i)).collect();
    let (engine, _) = TimerEngine::start(topics, duration).unwrap();
    engine
}

#[derive(Debug, Clone)]
enum Op {
    Tick,
    Pause,
    Resume,
    Reset,
    SetDuration(i64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => Just(Op::Tick),
        1 => Just(Op::Pause),
        1 => Just(Op::Resume),
        1 => Just(Op::Reset),
        1 => (-5i64..120).prop_map(Op::SetDuration),
    ]
}

proptest! {
    #[test]
    fn rotation_follows_tick_count(n in 1usize..6, d in 1u32..30, t in 0u64..400) {
        let mut engine = engine(n, d);
        for _ in 0..t {
            engine.on_tick();
        }
        prop_assert_eq!(engine.current_topic_index() as u64, (t / u64::from(d)) % n as u64);
        prop_assert_eq!(engine.overall_elapsed(), t);
    }

    #[test]
    fn warning_fires_once_per_interval(d in 1u32..40, t in 0u64..300) {
        let mut engine = engine(3, d);
        let mut warnings = 0u64;
        for _ in 0..t {
            let effects = engine.on_tick();
            if effects.contains(&Effect::PlayCue(CueKind::Warning)) {
                prop_assert_eq!(engine.time_remaining(), 10);
                warnings += 1;
            }
        }

        let d = u64::from(d);
        let expected = if d <= 10 || t < d - 10 { 0 } else { (t - (d - 10)) / d + 1 };
        prop_assert_eq!(warnings, expected);
    }

    #[test]
    fn paused_ticks_change_nothing(warmup in 0usize..50, ticks in 1usize..50) {
        let mut engine = engine(4, 15);
        for _ in 0..warmup {
            engine.on_tick();
        }
        engine.pause();
        let before = engine.snapshot();
        for _ in 0..ticks {
            prop_assert!(engine.on_tick().is_empty());
        }
        prop_assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn non_positive_duration_is_rejected(bad in i64::MIN..=0, warmup in 0usize..40) {
        let mut engine = engine(2, 20);
        for _ in 0..warmup {
            engine.on_tick();
        }
        let before = engine.snapshot();
        prop_assert!(matches!(engine.set_duration(bad), Err(EngineError::InvalidArgument(_))));
        prop_assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn set_duration_clamps_remaining(new_d in 1i64..200, warmup in 0usize..90) {
        let mut engine = engine(2, 60);
        for _ in 0..warmup {
            engine.on_tick();
        }
        let before = engine.time_remaining();
        engine.set_duration(new_d).unwrap();
        prop_assert_eq!(i64::from(engine.time_remaining()), i64::from(before).min(new_d));
        prop_assert_eq!(i64::from(engine.interval_duration()), new_d);
    }

    #[test]
    fn invariants_hold_under_any_sequence(ops in prop::collection::vec(op_strategy(), 0..200)) {
        let mut engine = engine(3, 25);
        let mut elapsed = 0u64;

        for op in ops {
            let topic_before = engine.current_topic_index();
            match op {
                Op::Tick => {
                    let paused = engine.is_paused();
                    let effects = engine.on_tick();
                    if !paused {
                        elapsed += 1;
                    }
                    let transitions = effects
                        .iter()
                        .filter(|e| matches!(e, Effect::TopicChanged(_)))
                        .count();
                    prop_assert!(transitions <= 1);
                    if transitions == 1 {
                        prop_assert_eq!(engine.time_remaining(), engine.interval_duration());
                        prop_assert!(!engine.has_fired_warning_cue());
                        prop_assert_eq!(
                            effects,
                            vec![
                                Effect::TopicChanged(engine.current_topic_index()),
                                Effect::PlayCue(CueKind::Transition),
                            ]
                        );
                    }
                }
                Op::Pause => {
                    engine.pause();
                    prop_assert!(engine.is_paused());
                }
                Op::Resume => {
                    let was_paused = engine.is_paused();
                    let effects = engine.resume();
                    prop_assert_eq!(effects.is_empty(), !was_paused);
                    prop_assert_eq!(engine.current_topic_index(), topic_before);
                }
                Op::Reset => {
                    elapsed = 0;
                    prop_assert_eq!(engine.reset(), vec![Effect::TopicChanged(0)]);
                    prop_assert_eq!(engine.time_remaining(), engine.interval_duration());
                    prop_assert!(!engine.is_paused());
                }
                Op::SetDuration(seconds) => {
                    let _ = engine.set_duration(seconds);
                    prop_assert_eq!(engine.current_topic_index(), topic_before);
                }
            }

            prop_assert!(engine.time_remaining() >= 1);
            prop_assert!(engine.time_remaining() <= engine.interval_duration());
            prop_assert!(engine.current_topic_index() < engine.topics().len());
            prop_assert_eq!(engine.overall_elapsed(), elapsed);
        }
    }
}
