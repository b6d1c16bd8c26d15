use serde::{Serialize, Deserialize};

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `batch_size`    — samples per mini-batch; use `1` for online SGD
/// - `learning_rate` — SGD step size, divided by the batch length on apply
/// - `samples`       — total number of (randomly drawn) samples to train on
/// - `log_every`     — emit a progress line every this many samples; `0` disables
/// - `seed`          — seed for sample selection; random when absent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub batch_size: usize,
    pub learning_rate: f64,
    pub samples: usize,
    pub log_every: usize,
    pub seed: Option<u64>,
}

impl TrainConfig {
    pub fn new(samples: usize, batch_size: usize, learning_rate: f64) -> Self {
        TrainConfig {
            samples,
            batch_size,
            learning_rate,
            ..TrainConfig::default()
        }
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            batch_size: 128,
            learning_rate: 0.1,
            samples: 60_000,
            log_every: 10_000,
            seed: None,
        }
    }
}
