use serde::{Serialize, Deserialize};

use crate::loss::{cross_entropy::CrossEntropyLoss, mse::MseLoss};

/// Selects which loss function the network trains against.
///
/// - `Mse`          — Mean-squared error; pair with Identity, ReLU or Sigmoid output.
/// - `CrossEntropy` — Categorical cross-entropy; must be paired with a Softmax
///   output.  The gradient is the combined Softmax+CE gradient
///   (output - target).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossType {
    #[default]
    Mse,
    CrossEntropy,
}

impl LossType {
    /// Loss contribution of a single output node.
    pub fn function(&self, output: f64, target: f64, output_count: usize) -> f64 {
        match self {
            LossType::Mse => MseLoss::loss(output, target, output_count),
            LossType::CrossEntropy => CrossEntropyLoss::loss(output, target, output_count),
        }
    }

    /// ∂L/∂output for a single output node.
    pub fn derivative(&self, output: f64, target: f64, output_count: usize) -> f64 {
        match self {
            LossType::Mse => MseLoss::derivative(output, target, output_count),
            LossType::CrossEntropy => CrossEntropyLoss::derivative(output, target, output_count),
        }
    }

    /// Total loss of one sample: sum of the per-output terms.
    pub fn loss(&self, outputs: &[f64], targets: &[f64]) -> f64 {
        let n = outputs.len();
        outputs.iter().zip(targets.iter())
            .map(|(&o, &t)| self.function(o, t, n))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn mse_total_is_mean_of_squares() {
        let l = LossType::Mse.loss(&[1.0, 0.0], &[0.0, 0.0]);
        assert_abs_diff_eq!(l, 0.5);
    }

    #[test]
    fn cross_entropy_total_reads_target_class_only() {
        let l = LossType::CrossEntropy.loss(&[0.25, 0.75], &[0.0, 1.0]);
        assert_abs_diff_eq!(l, -(0.75f64 + 1e-12).ln(), epsilon = 1e-12);
    }

    #[test]
    fn defaults_to_mse() {
        assert_eq!(LossType::default(), LossType::Mse);
        let json = serde_json::to_string(&LossType::CrossEntropy).unwrap();
        assert_eq!(json, "\"cross_entropy\"");
    }
}
