use std::sync::mpsc;
use std::thread;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use xornet::data::xor;
use xornet::{evaluate, train, EpochStats, TrainConfig};

fn main() {
    let config = match std::env::args().nth(1) {
        Some(path) => match TrainConfig::load_json(&path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("failed to load config '{path}': {e}");
                std::process::exit(1);
            }
        },
        None => TrainConfig::default(),
    };

    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());

    let (tx, rx) = mpsc::channel::<EpochStats>();
    let mut worker_config = config.clone();
    worker_config.progress_tx = Some(tx);

    // Train on a worker thread; this thread drains the progress channel.
    let worker = thread::spawn(move || {
        let mut rng = StdRng::seed_from_u64(seed);
        train(&worker_config, &mut rng)
    });

    for stats in rx {
        println!(
            "epoch {:>5}/{}: loss = {:.6}, accuracy = {:.2}% ({} ms)",
            stats.epoch,
            stats.total_epochs,
            stats.loss,
            stats.accuracy * 100.0,
            stats.elapsed_ms
        );
    }

    let network = match worker.join() {
        Ok(network) => network,
        Err(_) => {
            eprintln!("training thread panicked");
            std::process::exit(1);
        }
    };

    // Held-out accuracy on a freshly generated test set.
    let mut test_rng = StdRng::seed_from_u64(seed.wrapping_add(1));
    let (test_x, test_y) = xor::generate(config.observations, &mut test_rng);
    println!(
        "test accuracy on {} fresh rows: {:.2}%",
        config.observations,
        evaluate(&network, &test_x, &test_y) * 100.0
    );

    let (inputs, _) = xor::truth_table();
    let probs = network.predict(&inputs);
    for i in 0..inputs.rows {
        println!(
            "input ({}, {}) -> p(xor=0) = {:.4}, p(xor=1) = {:.4}",
            inputs.data[i][0], inputs.data[i][1], probs.data[i][0], probs.data[i][1]
        );
    }
}
