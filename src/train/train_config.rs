use std::sync::mpsc;
use std::sync::{atomic::AtomicBool, Arc};

use serde::{Deserialize, Serialize};

use crate::train::epoch_stats::EpochStats;

/// Configuration for a `train` run.
///
/// # Fields
/// - `observations`  — rows per training batch
/// - `hidden`        — hidden-layer width H
/// - `epochs`        — total number of epochs
/// - `learning_rate` — gradient-descent step size
/// - `resample`      — when `true` (the default) a fresh random dataset is
///                     generated every epoch, a deliberate noise injection
///                     against poor local optima; when `false` one dataset is
///                     generated before the loop and reused throughout
/// - `report_every`  — reporting cadence in epochs; the final epoch is always
///                     reported so short runs still produce a record
/// - `seed`          — optional RNG seed, consumed by the caller that builds
///                     the random source passed to `train`
/// - `progress_tx`   — optional channel sender; one `EpochStats` is sent per
///                     reporting epoch.  If the receiver is dropped the loop
///                     terminates early (clean shutdown).
/// - `stop_flag`     — optional atomic flag; when set to `true` from another
///                     thread the loop terminates after the current epoch.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub observations: usize,
    pub hidden: usize,
    pub epochs: usize,
    pub learning_rate: f64,
    pub resample: bool,
    pub report_every: usize,
    pub seed: Option<u64>,
    #[serde(skip)]
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    #[serde(skip)]
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// Creates a minimal `TrainConfig` with no progress channel and no stop flag.
    pub fn new(observations: usize, hidden: usize, epochs: usize, learning_rate: f64) -> Self {
        TrainConfig {
            observations,
            hidden,
            epochs,
            learning_rate,
            ..TrainConfig::default()
        }
    }

    /// Deserializes a `TrainConfig` from a JSON file.  Omitted fields keep
    /// their defaults; the runtime-only fields (channel, stop flag) are never
    /// read from disk.
    pub fn load_json(path: &str) -> std::io::Result<TrainConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}

impl Default for TrainConfig {
    /// The reference scenario: 100 observations, hidden width 2, 10000 epochs
    /// at learning rate 0.01, resampling every epoch, reporting every 1000.
    fn default() -> Self {
        TrainConfig {
            observations: 100,
            hidden: 2,
            epochs: 10_000,
            learning_rate: 0.01,
            resample: true,
            report_every: 1000,
            seed: None,
            progress_tx: None,
            stop_flag: None,
        }
    }
}
