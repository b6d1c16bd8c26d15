use serde::{Serialize, Deserialize};

/// Summary returned by `train_loop`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrainStats {
    /// Samples run through forward + backward.
    pub samples: usize,
    /// Gradient applications, including a trailing partial batch.
    pub batches: usize,
    /// Mean per-sample loss over the whole run.
    pub mean_loss: f64,
    /// Fraction of samples whose top guess matched the label, in [0, 1].
    pub accuracy: f64,
}

/// Running totals over a window of samples.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Tally {
    pub samples: usize,
    pub loss: f64,
    pub correct: usize,
}

impl Tally {
    pub fn record(&mut self, loss: f64, correct: bool) {
        self.samples += 1;
        self.loss += loss;
        if correct {
            self.correct += 1;
        }
    }

    pub fn mean_loss(&self) -> f64 {
        if self.samples == 0 { 0.0 } else { self.loss / self.samples as f64 }
    }

    pub fn accuracy(&self) -> f64 {
        if self.samples == 0 { 0.0 } else { self.correct as f64 / self.samples as f64 }
    }
}
