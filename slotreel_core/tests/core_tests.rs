use std::{cell::Cell, rc::Rc, time::Duration};

use futures::future::join;
use proptest::prelude::*;
use slotreel_core::{
    ConnectedFlag, EngineConfig, FixedRandom, MemorySlots, RandomSource, ReelEngine, RollPlan,
    SeededRandom, SequenceRandom, Silent, SlotError, SoundCue, TokioRuntime, Transition, WinKind,
    RESULT_SEPARATOR, ROLLING_TEXT,
};
use tokio::task::LocalSet;

fn engine_with(
    slots: &Rc<MemorySlots>,
    wallet: &Rc<ConnectedFlag>,
    rng: impl RandomSource + 'static,
) -> ReelEngine {
    ReelEngine::new(
        EngineConfig::default(),
        slots.clone(),
        wallet.clone(),
        Rc::new(Silent),
        Rc::new(TokioRuntime),
        Box::new(rng),
    )
    .unwrap()
}

fn connected() -> Rc<ConnectedFlag> {
    Rc::new(ConnectedFlag::new(true))
}

#[tokio::test(start_paused = true)]
async fn zero_draws_keep_indices_and_declare_triple() {
    LocalSet::new()
        .run_until(async {
            let slots = Rc::new(MemorySlots::new(4));
            let engine = engine_with(&slots, &connected(), FixedRandom(0.0));

            let outcome = engine.spin().await.unwrap();
            assert_eq!(outcome.indices, vec![0, 0, 0, 0]);
            assert_eq!(outcome.win, Some(WinKind::Triple));
            assert_eq!(outcome.text, "banana - banana - banana - banana");
            assert_eq!(slots.result_text(), outcome.text);
            assert_eq!(engine.indices(), vec![0, 0, 0, 0]);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn win_marker_clears_after_two_seconds() {
    LocalSet::new()
        .run_until(async {
            let slots = Rc::new(MemorySlots::new(4));
            let engine = engine_with(&slots, &connected(), FixedRandom(0.0));

            engine.spin().await.unwrap();
            assert_eq!(slots.markers(), vec![WinKind::Triple]);

            tokio::time::sleep(Duration::from_millis(1990)).await;
            assert_eq!(slots.markers(), vec![WinKind::Triple]);

            tokio::time::sleep(Duration::from_millis(20)).await;
            assert!(slots.markers().is_empty());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn adjacent_pair_is_win1() {
    LocalSet::new()
        .run_until(async {
            let slots = Rc::new(MemorySlots::new(4));
            let draws = SequenceRandom::new(vec![1.0 / 12.0, 1.0 / 12.0, 5.0 / 12.0, 0.0]);
            let engine = engine_with(&slots, &connected(), draws);

            let outcome = engine.spin().await.unwrap();
            assert_eq!(outcome.indices, vec![1, 1, 5, 0]);
            assert_eq!(outcome.win, Some(WinKind::Pair));
            assert_eq!(outcome.text, "seven - seven - cherry - banana");
            assert_eq!(slots.markers(), vec![WinKind::Pair]);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn no_win_leaves_markers_untouched() {
    LocalSet::new()
        .run_until(async {
            let slots = Rc::new(MemorySlots::new(4));
            let draws = SequenceRandom::new(vec![1.0 / 12.0, 2.0 / 12.0, 3.0 / 12.0, 4.0 / 12.0]);
            let engine = engine_with(&slots, &connected(), draws);

            let outcome = engine.spin().await.unwrap();
            assert_eq!(outcome.indices, vec![1, 2, 3, 4]);
            assert_eq!(outcome.win, None);
            assert!(slots.markers().is_empty());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn indices_accumulate_across_spins() {
    LocalSet::new()
        .run_until(async {
            let slots = Rc::new(MemorySlots::new(4));
            let draws = SequenceRandom::new(vec![5.0 / 12.0, 7.0 / 12.0, 11.0 / 12.0, 3.0 / 12.0]);
            let engine = engine_with(&slots, &connected(), draws);

            engine.spin().await.unwrap();
            let outcome = engine.spin().await.unwrap();
            assert_eq!(outcome.indices, vec![10, 2, 10, 6]);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn reel_moves_animate_then_snap_back() {
    LocalSet::new()
        .run_until(async {
            let slots = Rc::new(MemorySlots::new(4));
            let engine = engine_with(&slots, &connected(), FixedRandom(0.0));
            engine.spin().await.unwrap();

            let moves = slots.reel(0).moves();
            assert_eq!(moves.len(), 2);
            assert_eq!(moves[0].0, 24.0 * 79.0);
            match moves[0].1 {
                Transition::Ease { duration, .. } => {
                    assert_eq!(duration, Duration::from_millis(3200))
                }
                Transition::None => panic!("roll should animate"),
            }
            assert_eq!(moves[1], (0.0, Transition::None));
            assert_eq!(slots.reel(0).transition(), Transition::None);

            // fourth reel travels five full turns
            assert_eq!(slots.reel(3).moves()[0].0, 60.0 * 79.0);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn spin_waits_for_slowest_reel() {
    LocalSet::new()
        .run_until(async {
            let slots = Rc::new(MemorySlots::new(4));
            let engine = engine_with(&slots, &connected(), FixedRandom(0.0));

            let started = tokio::time::Instant::now();
            engine.spin().await.unwrap();
            let elapsed = started.elapsed();
            // reel 3: 450ms delay + (8 + 60) * 100ms
            assert!(elapsed >= Duration::from_millis(7250), "{elapsed:?}");
            assert!(elapsed < Duration::from_millis(7300), "{elapsed:?}");
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn concurrent_spin_is_rejected() {
    LocalSet::new()
        .run_until(async {
            let slots = Rc::new(MemorySlots::new(4));
            let engine = engine_with(&slots, &connected(), FixedRandom(0.0));

            let (first, second) = join(engine.spin(), engine.spin()).await;
            assert!(first.is_ok());
            assert!(matches!(second, Err(SlotError::SpinInProgress)));
            assert!(!engine.is_spinning());
            assert!(engine.can_spin());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn spin_in_progress_shows_rolling_text() {
    LocalSet::new()
        .run_until(async {
            let slots = Rc::new(MemorySlots::new(4));
            let engine = engine_with(&slots, &connected(), FixedRandom(0.0));

            let probe = async {
                tokio::task::yield_now().await;
                (engine.is_spinning(), engine.can_spin(), slots.result_text())
            };
            let (_, (spinning, can_spin, text)) = join(engine.spin(), probe).await;
            assert!(spinning);
            assert!(!can_spin);
            assert_eq!(text, ROLLING_TEXT);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn disconnected_wallet_blocks_spin() {
    LocalSet::new()
        .run_until(async {
            let slots = Rc::new(MemorySlots::new(4));
            let wallet = Rc::new(ConnectedFlag::new(false));
            let engine = engine_with(&slots, &wallet, FixedRandom(0.0));

            assert!(!engine.can_spin());
            assert!(matches!(
                engine.spin().await,
                Err(SlotError::WalletDisconnected)
            ));
            assert!(slots.reel(0).moves().is_empty());
            assert_eq!(slots.result_text(), "");

            wallet.set(true);
            assert!(engine.spin().await.is_ok());
        })
        .await;
}

#[derive(Default)]
struct CountingSound(Cell<usize>);

impl SoundCue for CountingSound {
    fn play_reel_spin(&self) {
        self.0.set(self.0.get() + 1);
    }
}

#[tokio::test(start_paused = true)]
async fn reel_sound_plays_once_per_accepted_spin() {
    LocalSet::new()
        .run_until(async {
            let slots = Rc::new(MemorySlots::new(4));
            let wallet = Rc::new(ConnectedFlag::new(false));
            let sound = Rc::new(CountingSound::default());
            let engine = ReelEngine::new(
                EngineConfig::default(),
                slots.clone(),
                wallet.clone(),
                sound.clone(),
                Rc::new(TokioRuntime),
                Box::new(FixedRandom(0.0)),
            )
            .unwrap();

            assert!(matches!(
                engine.spin().await,
                Err(SlotError::WalletDisconnected)
            ));
            assert_eq!(sound.0.get(), 0);

            wallet.set(true);
            let (first, second) = join(engine.spin(), engine.spin()).await;
            assert!(first.is_ok());
            assert!(matches!(second, Err(SlotError::SpinInProgress)));
            assert_eq!(sound.0.get(), 1);

            engine.spin().await.unwrap();
            assert_eq!(sound.0.get(), 2);
        })
        .await;
}

#[test]
fn reel_count_mismatch_is_a_config_error() {
    let err = ReelEngine::new(
        EngineConfig::default(),
        Rc::new(MemorySlots::new(3)),
        connected(),
        Rc::new(Silent),
        Rc::new(TokioRuntime),
        Box::new(FixedRandom(0.0)),
    )
    .err()
    .unwrap();
    assert!(matches!(
        err,
        SlotError::ReelCountMismatch {
            expected: 4,
            found: 3
        }
    ));
}

#[test]
fn invalid_config_rejected_at_construction() {
    let config = EngineConfig {
        reel_count: 2,
        ..EngineConfig::default()
    };
    let err = ReelEngine::new(
        config,
        Rc::new(MemorySlots::new(2)),
        connected(),
        Rc::new(Silent),
        Rc::new(TokioRuntime),
        Box::new(FixedRandom(0.0)),
    )
    .err()
    .unwrap();
    assert!(matches!(err, SlotError::Config(_)));
}

#[tokio::test(start_paused = true)]
async fn seeded_spins_stay_in_range_and_match_display() {
    LocalSet::new()
        .run_until(async {
            let slots = Rc::new(MemorySlots::new(4));
            let engine = engine_with(&slots, &connected(), SeededRandom::new(42));
            let config = EngineConfig::default();

            for _ in 0..25 {
                let outcome = engine.spin().await.unwrap();
                assert!(outcome.indices.iter().all(|&i| i < 12));
                assert_eq!(outcome.text.split(RESULT_SEPARATOR).count(), 4);
                for (reel, &index) in outcome.indices.iter().enumerate() {
                    assert_eq!(
                        slots.reel(reel).visible_index(config.icon_height, 12),
                        index
                    );
                }
            }
        })
        .await;
}

proptest! {
    #[test]
    fn roll_delta_in_range(
        stagger in 0usize..32,
        start in 0.0f64..100_000.0,
        draw in 0.0f64..1.0,
        icons in 1usize..40,
    ) {
        let config = EngineConfig {
            catalog: slotreel_core::IconCatalog::new((0..icons).map(|i| format!("icon{i}"))).unwrap(),
            ..EngineConfig::default()
        };
        let plan = RollPlan::new(&config, stagger, start, draw);
        prop_assert!(plan.delta < icons);
        prop_assert!(plan.distance >= 2 * icons as u64);
        prop_assert!(plan.resting_offset >= 0.0);
        prop_assert!(plan.resting_offset < config.strip_height());
    }
}
