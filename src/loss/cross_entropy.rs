/// Categorical cross-entropy loss for use with a Softmax output layer.
pub struct CrossEntropyLoss;

/// Small epsilon added inside log() to prevent log(0) = -inf.
const EPS: f64 = 1e-12;

impl CrossEntropyLoss {
    /// Per-output cross-entropy term: -t · ln(o + ε)
    ///
    /// `output` — softmax probability for this class
    /// `target` — one-hot (or soft) target for this class
    pub fn loss(output: f64, target: f64, _output_count: usize) -> f64 {
        -target * (output + EPS).ln()
    }

    /// Gradient of the combined Softmax + cross-entropy w.r.t. the pre-softmax
    /// logit:
    ///   ∂L/∂z_i = output_i - target_i
    ///
    /// Only valid behind a Softmax output layer, whose own derivative is 1.0 so
    /// the Jacobian is not applied twice.  `Network` construction enforces the
    /// pairing.
    pub fn derivative(output: f64, target: f64, _output_count: usize) -> f64 {
        output - target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn zero_probability_is_finite() {
        let l = CrossEntropyLoss::loss(0.0, 1.0, 10);
        assert!(l.is_finite());
        assert_abs_diff_eq!(l, -(1e-12f64).ln(), epsilon = 1e-9);
    }

    #[test]
    fn non_target_classes_cost_nothing() {
        assert_eq!(CrossEntropyLoss::loss(0.9, 0.0, 10), 0.0);
        assert_abs_diff_eq!(CrossEntropyLoss::derivative(0.9, 0.0, 10), 0.9);
        assert_abs_diff_eq!(CrossEntropyLoss::derivative(0.25, 1.0, 10), -0.75);
    }
}
