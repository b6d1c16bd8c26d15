use serde::{Serialize, Deserialize};
use std::f64::consts::E;

/// Whether an activation acts on one node at a time or on the whole layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationKind {
    /// Applied independently to each node's pre-activation sum.
    Scalar,
    /// Applied jointly to the ordered pre-activation sums of every node in a layer.
    Vector,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActivationFunction {
    #[default]
    Identity,
    ReLU,
    Sigmoid,
    /// Softmax is a vector-valued activation; it is applied at the layer level
    /// through `apply()`.  The element-wise `function()` is never used for it.
    Softmax,
}

impl ActivationFunction {
    pub fn kind(&self) -> ActivationKind {
        match self {
            ActivationFunction::Softmax => ActivationKind::Vector,
            _ => ActivationKind::Scalar,
        }
    }

    /// Element-wise activation.  `Softmax` of a single logit is always 1, which
    /// is what this returns; use `apply()` for the layer-wide form.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Identity => x,
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            ActivationFunction::Softmax => 1.0,
        }
    }

    /// Element-wise derivative, evaluated at the pre-activation sum.
    ///
    /// For `Softmax`, the layer is paired with cross-entropy and the combined
    /// gradient `predicted - expected` is already produced by
    /// `LossType::CrossEntropy`.  Returning `1.0` passes that delta through
    /// without applying the Jacobian twice.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Identity => 1.0,
            ActivationFunction::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
            ActivationFunction::Sigmoid => {
                let fx = self.function(x);
                fx * (1.0 - fx)
            }
            ActivationFunction::Softmax => 1.0,
        }
    }

    /// Applies the activation to a full layer of pre-activation sums and
    /// returns the outputs in the same order.
    pub fn apply(&self, wsums: &[f64]) -> Vec<f64> {
        match self.kind() {
            ActivationKind::Scalar => wsums.iter().map(|&x| self.function(x)).collect(),
            ActivationKind::Vector => softmax(wsums),
        }
    }
}

/// Numerically stable softmax: shifts by the max logit before exponentiating.
fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|&x| (x - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|x| x / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn relu_derivative_is_zero_at_zero() {
        let relu = ActivationFunction::ReLU;
        assert_eq!(relu.function(-3.0), 0.0);
        assert_eq!(relu.function(2.5), 2.5);
        assert_eq!(relu.derivative(0.0), 0.0);
        assert_eq!(relu.derivative(1e-9), 1.0);
    }

    #[test]
    fn sigmoid_matches_closed_form() {
        let sigmoid = ActivationFunction::Sigmoid;
        assert_abs_diff_eq!(sigmoid.function(0.0), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(sigmoid.derivative(0.0), 0.25, epsilon = 1e-12);
        let s = sigmoid.function(2.0);
        assert_abs_diff_eq!(sigmoid.derivative(2.0), s * (1.0 - s), epsilon = 1e-12);
    }

    #[test]
    fn identity_passes_through() {
        let id = ActivationFunction::Identity;
        assert_eq!(id.function(-7.25), -7.25);
        assert_eq!(id.derivative(123.0), 1.0);
        assert_eq!(id.apply(&[1.0, -2.0]), vec![1.0, -2.0]);
    }

    #[test]
    fn softmax_sums_to_one() {
        let logit_sets: [&[f64]; 4] = [
            &[1.0, 2.0, 3.0],
            &[-10.0, 0.0, 10.0, 5.0],
            &[1000.0, 1000.5, 999.0],
            &[0.0; 10],
        ];
        for logits in logit_sets {
            let out = ActivationFunction::Softmax.apply(logits);
            assert_eq!(out.len(), logits.len());
            assert_abs_diff_eq!(out.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
            assert!(out.iter().all(|&p| p > 0.0 && p < 1.0), "{out:?}");
        }
    }

    #[test]
    fn softmax_saturates_without_overflow() {
        // A spread this wide rounds the winner to exactly 1.0 in f64.
        let out = ActivationFunction::Softmax.apply(&[-50.0, 0.0, 50.0, 10.0]);
        assert!(out.iter().all(|&p| p.is_finite() && p >= 0.0 && p <= 1.0), "{out:?}");
        assert_abs_diff_eq!(out.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        assert_eq!(out[2], 1.0);
    }

    #[test]
    fn softmax_is_shift_invariant() {
        let a = ActivationFunction::Softmax.apply(&[0.1, 0.7, -0.3]);
        let b = ActivationFunction::Softmax.apply(&[100.1, 100.7, 99.7]);
        for (x, y) in a.iter().zip(&b) {
            assert_abs_diff_eq!(x, y, epsilon = 1e-12);
        }
        assert_eq!(ActivationFunction::Softmax.derivative(3.0), 1.0);
        assert_eq!(ActivationFunction::Softmax.kind(), ActivationKind::Vector);
    }
}
