pub struct MseLoss;

impl MseLoss {
    /// Per-output MSE term: (o - t)² / n
    pub fn loss(output: f64, target: f64, output_count: usize) -> f64 {
        (output - target).powi(2) / output_count as f64
    }

    /// Per-output gradient: 2(o - t) / n
    pub fn derivative(output: f64, target: f64, output_count: usize) -> f64 {
        2.0 * (output - target) / output_count as f64
    }
}
