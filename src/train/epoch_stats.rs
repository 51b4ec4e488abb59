use serde::{Deserialize, Serialize};

/// Per-epoch training statistics emitted by `train`.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, the training
/// loop sends one `EpochStats` value at every reporting epoch (and always for
/// the final epoch).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Mean cross-entropy loss over this epoch's batch.
    pub loss: f64,
    /// Training accuracy on this epoch's batch, as a fraction in [0, 1].
    pub accuracy: f64,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}
