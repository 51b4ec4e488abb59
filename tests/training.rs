use std::sync::atomic::AtomicBool;
use std::sync::{mpsc, Arc};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use xornet::data::xor;
use xornet::{evaluate, train, EpochStats, TrainConfig};

/// Random initialization can land in a poor basin, so the convergence and
/// generalization scenarios sweep a fixed set of seeds and assert on the best
/// run instead of demanding single-run success.
const SEEDS: [u64; 5] = [1, 2, 3, 7, 42];

#[test]
fn training_converges_on_xor() {
    let (bx, by) = xor::balanced(100);
    let mut best_accuracy = 0.0f64;
    let mut best_loss_decreased = false;

    for seed in SEEDS {
        let (tx, rx) = mpsc::channel();
        let mut config = TrainConfig::default();
        config.progress_tx = Some(tx);

        let mut rng = StdRng::seed_from_u64(seed);
        let network = train(&config, &mut rng);
        drop(config);

        let stats: Vec<EpochStats> = rx.try_iter().collect();
        let first = stats.first().expect("no progress reported");
        let last = stats.last().expect("no progress reported");

        let accuracy = evaluate(&network, &bx, &by);
        if accuracy > best_accuracy {
            best_accuracy = accuracy;
            best_loss_decreased = last.loss < first.loss;
        }
        if best_accuracy >= 0.95 && best_loss_decreased {
            break;
        }
    }

    assert!(
        best_accuracy >= 0.95,
        "best accuracy across seeds {:?} was {}",
        SEEDS,
        best_accuracy
    );
    assert!(best_loss_decreased, "loss did not decrease over the best run");
}

#[test]
fn trained_network_generalizes_to_fresh_data() {
    for seed in SEEDS {
        let config = TrainConfig::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let network = train(&config, &mut rng);

        let (test_x, test_y) = xor::generate(100, &mut rng);
        if evaluate(&network, &test_x, &test_y) >= 0.95 {
            return;
        }
    }
    panic!("no seed in {:?} generalized to fresh data", SEEDS);
}

#[test]
fn same_seed_reproduces_the_same_parameters() {
    let run = || {
        let mut config = TrainConfig::new(50, 2, 500, 0.01);
        config.resample = false;
        let mut rng = StdRng::seed_from_u64(99);
        train(&config, &mut rng)
    };

    let a = run();
    let b = run();
    assert_eq!(a.w1, b.w1);
    assert_eq!(a.b1, b.b1);
    assert_eq!(a.w2, b.w2);
    assert_eq!(a.b2, b.b2);
}

#[test]
fn resample_off_generates_data_only_once() {
    // With resampling off the rng is consumed only for initialization and a
    // single dataset, so the epoch count must not shift its state.
    let draw_after = |epochs: usize| {
        let mut config = TrainConfig::new(20, 2, epochs, 0.01);
        config.resample = false;
        let mut rng = StdRng::seed_from_u64(9);
        let _ = train(&config, &mut rng);
        rng.gen::<u64>()
    };

    assert_eq!(
        draw_after(5),
        draw_after(50),
        "epoch count changed rng consumption with resampling off"
    );
}

#[test]
fn stop_flag_halts_training_before_any_report() {
    let (tx, rx) = mpsc::channel();
    let mut config = TrainConfig::new(10, 2, 1_000_000, 0.01);
    config.report_every = 1;
    config.progress_tx = Some(tx);
    config.stop_flag = Some(Arc::new(AtomicBool::new(true)));

    let mut rng = StdRng::seed_from_u64(5);
    let network = train(&config, &mut rng);
    drop(config);

    assert_eq!(rx.try_iter().count(), 0, "stopped run still reported progress");
    assert_eq!(network.hidden_width(), 2);
}

#[test]
fn dropped_receiver_stops_training() {
    let (tx, rx) = mpsc::channel();
    drop(rx);

    let mut config = TrainConfig::new(10, 2, 1_000_000, 0.01);
    config.report_every = 1;
    config.progress_tx = Some(tx);

    // Would spin for a million epochs if the failed send were ignored.
    let mut rng = StdRng::seed_from_u64(6);
    let network = train(&config, &mut rng);
    assert_eq!(network.hidden_width(), 2);
}

#[test]
fn progress_cadence_includes_final_epoch() {
    let (tx, rx) = mpsc::channel();
    let mut config = TrainConfig::new(10, 2, 25, 0.05);
    config.report_every = 10;
    config.progress_tx = Some(tx);

    let mut rng = StdRng::seed_from_u64(8);
    let _ = train(&config, &mut rng);
    drop(config);

    let epochs: Vec<usize> = rx.try_iter().map(|s| s.epoch).collect();
    assert_eq!(epochs, vec![10, 20, 25]);
}

#[test]
#[should_panic(expected = "learning rate must be a finite positive number")]
fn train_rejects_nonpositive_learning_rate() {
    let config = TrainConfig::new(10, 2, 100, 0.0);
    let mut rng = StdRng::seed_from_u64(1);
    let _ = train(&config, &mut rng);
}
