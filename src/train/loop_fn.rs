use std::sync::atomic::Ordering;
use std::time::Instant;

use rand::Rng;

use crate::data::xor;
use crate::loss::cross_entropy::CrossEntropyLoss;
use crate::math::matrix::Matrix;
use crate::network::backprop::{backprop_hidden, backprop_layer};
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Trains a fresh two-layer XOR classifier for `config.epochs` epochs and
/// returns the trained parameters.
///
/// Each epoch: (re)generate data, forward pass, loss, backprop, parameter
/// update, optional progress report. The returned `Network` is the only
/// mutable epoch-spanning state; every other value lives inside one epoch.
///
/// # Early termination
/// The loop breaks early if:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
///
/// There is no convergence-based early stop: the epoch count is the sole
/// stopping criterion besides the two cooperative controls above.
///
/// # Panics
/// Panics if `observations` or `hidden` or `report_every` is zero, or if the
/// learning rate is not a finite positive number.
pub fn train<R: Rng>(config: &TrainConfig, rng: &mut R) -> Network {
    assert!(config.observations >= 1, "observations must be at least 1");
    assert!(config.hidden >= 1, "hidden width must be at least 1");
    assert!(
        config.learning_rate.is_finite() && config.learning_rate > 0.0,
        "learning rate must be a finite positive number, got {}",
        config.learning_rate
    );
    assert!(config.report_every >= 1, "report_every must be at least 1");

    let mut network = Network::new(config.hidden, rng);
    let optimizer = Sgd::new(config.learning_rate);

    // With resampling off, the whole run trains on one dataset.
    let fixed = if config.resample {
        None
    } else {
        Some(xor::generate(config.observations, rng))
    };

    for epoch in 1..=config.epochs {
        // Check stop flag at the top of each epoch.
        if let Some(ref flag) = config.stop_flag {
            if flag.load(Ordering::Relaxed) {
                break;
            }
        }

        let t_start = Instant::now();

        let fresh;
        let (x, y) = match fixed {
            Some(ref d) => (&d.0, &d.1),
            None => {
                fresh = xor::generate(config.observations, rng);
                (&fresh.0, &fresh.1)
            }
        };

        // ── Forward, loss, backward ─────────────────────────────────────────
        let (h, y_hat) = network.forward(x);
        let loss = CrossEntropyLoss::loss(&y_hat, y);

        let dz = CrossEntropyLoss::derivative(&y_hat, y);
        let dh = backprop_hidden(&h, &network.w2, &dz);
        let (dw1, db1) = backprop_layer(x, &dh);
        let (dw2, db2) = backprop_layer(&h, &dz);

        // ── Update parameters in place ──────────────────────────────────────
        network.w1 = optimizer.step(&network.w1, &dw1);
        network.b1 = optimizer.step(&network.b1, &db1);
        network.w2 = optimizer.step(&network.w2, &dw2);
        network.b2 = optimizer.step(&network.b2, &db2);

        // ── Emit progress at the reporting cadence ──────────────────────────
        if epoch % config.report_every == 0 || epoch == config.epochs {
            let stats = EpochStats {
                epoch,
                total_epochs: config.epochs,
                loss,
                accuracy: batch_accuracy(&y_hat, y),
                elapsed_ms: t_start.elapsed().as_millis() as u64,
            };

            if let Some(ref tx) = config.progress_tx {
                // If the receiver has been dropped, stop training.
                if tx.send(stats).is_err() {
                    break;
                }
            }
        }
    }

    network
}

/// Classification accuracy of `network` on a labeled set, as a fraction in
/// [0, 1]: rows where the predicted class (argmax of Ŷ) equals the true class
/// (argmax of Y).
///
/// # Panics
/// Panics if `inputs` and `targets` disagree on row count.
pub fn evaluate(network: &Network, inputs: &Matrix, targets: &Matrix) -> f64 {
    assert_eq!(
        inputs.rows, targets.rows,
        "evaluate: {} input rows but {} target rows",
        inputs.rows, targets.rows
    );

    let y_hat = network.predict(inputs);
    batch_accuracy(&y_hat, targets)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Fraction of rows whose predicted argmax matches the target argmax.
fn batch_accuracy(y_hat: &Matrix, y: &Matrix) -> f64 {
    let correct = y_hat
        .data
        .iter()
        .zip(y.data.iter())
        .filter(|(predicted, expected)| argmax(predicted) == argmax(expected))
        .count();

    correct as f64 / y.rows as f64
}

/// Index of the maximum element in a slice.
fn argmax(v: &[f64]) -> usize {
    v.iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0)
}
