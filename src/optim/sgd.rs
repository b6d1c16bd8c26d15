use crate::network::network::Network;

/// Plain stochastic gradient descent over mini-batch-accumulated gradients.
#[derive(Debug, Clone, Copy)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies the gradients accumulated over `batch_len` samples, averaged
    /// by dividing the learning rate by the batch length, and clears them.
    pub fn step(&self, network: &mut Network, batch_len: usize) {
        if batch_len == 0 {
            return;
        }
        network.apply_gradients(self.learning_rate / batch_len as f64);
    }
}
