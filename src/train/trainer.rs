use log::debug;

use crate::data::mnist::{argmax, image_to_input, one_hot, MnistImage};
use crate::error::{Error, Result};
use crate::network::network::Network;
use crate::optim::sgd::Sgd;

/// Result of training on one sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub loss: f64,
    /// Output-layer values from the forward pass used for this step.
    pub outputs: Vec<f64>,
}

/// Drives the sample → forward → backward → (every N samples) apply cycle.
///
/// The network only accumulates gradients; the trainer owns the sample
/// counter that decides when a mini-batch is complete.
#[derive(Debug, Clone)]
pub struct Trainer {
    optimizer: Sgd,
    batch_size: usize,
    seen: usize,
    pending: usize,
    batches: usize,
}

impl Trainer {
    /// Fails with `Error::ZeroBatchSize` when `batch_size` is 0.
    pub fn new(optimizer: Sgd, batch_size: usize) -> Result<Trainer> {
        if batch_size == 0 {
            return Err(Error::ZeroBatchSize);
        }
        Ok(Trainer { optimizer, batch_size, seen: 0, pending: 0, batches: 0 })
    }

    pub fn samples_seen(&self) -> usize {
        self.seen
    }

    pub fn batches_applied(&self) -> usize {
        self.batches
    }

    /// Samples accumulated since the last gradient application.
    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn train_input(&mut self, network: &mut Network, input: &[f64], target: &[f64]) -> Result<Step> {
        let pass = network.forward(input)?;
        network.backward(&pass, target)?;
        let outputs = pass.into_output();
        let loss = network.loss.loss(&outputs, target);

        self.seen += 1;
        self.pending += 1;
        if self.pending == self.batch_size {
            self.apply(network);
        }
        Ok(Step { loss, outputs })
    }

    /// Trains on one labelled image, one-hot encoding the label against the
    /// network's output size.
    pub fn train_sample(&mut self, network: &mut Network, image: &MnistImage) -> Result<Step> {
        let input = image_to_input(image)?;
        let target = one_hot(image.label as usize, network.output_size())?;
        self.train_input(network, &input, &target)
    }

    /// Applies a trailing partial batch, if any.
    pub fn flush(&mut self, network: &mut Network) {
        if self.pending > 0 {
            self.apply(network);
        }
    }

    fn apply(&mut self, network: &mut Network) {
        self.optimizer.step(network, self.pending);
        self.batches += 1;
        debug!("applied batch {} ({} samples)", self.batches, self.pending);
        self.pending = 0;
    }
}

/// Whether the network's top guess for `outputs` is `label`.
pub fn is_correct(outputs: &[f64], label: u8) -> bool {
    argmax(outputs) == Some(label as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationFunction::Identity;
    use crate::loss::loss_type::LossType;

    fn unit_net() -> Network {
        let mut net = Network::new(&[1, 1], &[Identity, Identity], LossType::Mse).unwrap();
        net.layers[1].nodes[0].weights[0].value = 1.0;
        net
    }

    #[test]
    fn applies_every_batch_size_samples() {
        let mut net = unit_net();
        let mut trainer = Trainer::new(Sgd::new(0.1), 3).unwrap();

        for _ in 0..2 {
            trainer.train_input(&mut net, &[1.0], &[0.0]).unwrap();
        }
        assert_eq!(trainer.pending(), 2);
        assert_eq!(trainer.batches_applied(), 0);
        assert_eq!(net.layers[1].nodes[0].weights[0].value, 1.0);

        let step = trainer.train_input(&mut net, &[1.0], &[0.0]).unwrap();
        assert_eq!(step.outputs, vec![1.0]);
        assert_eq!(step.loss, 1.0);
        assert_eq!(trainer.pending(), 0);
        assert_eq!(trainer.batches_applied(), 1);
        assert!(net.layers[1].nodes[0].weights[0].value < 1.0);
        assert_eq!(net.layers[1].nodes[0].weights[0].gradient, 0.0);
    }

    #[test]
    fn flush_applies_partial_batch_once() {
        let mut net = unit_net();
        let mut trainer = Trainer::new(Sgd::new(0.1), 10).unwrap();
        trainer.train_input(&mut net, &[1.0], &[0.0]).unwrap();
        trainer.flush(&mut net);
        trainer.flush(&mut net);
        assert_eq!(trainer.batches_applied(), 1);
        assert_eq!(trainer.samples_seen(), 1);
        // Single-sample batch: w = 1 - 0.1 · 2
        assert!((net.layers[1].nodes[0].weights[0].value - 0.8).abs() < 1e-12);
    }

    #[test]
    fn zero_batch_size_is_an_error() {
        assert!(matches!(Trainer::new(Sgd::new(0.1), 0), Err(Error::ZeroBatchSize)));
    }

    #[test]
    fn correctness_uses_top_guess() {
        assert!(is_correct(&[0.1, 0.7, 0.2], 1));
        assert!(!is_correct(&[0.1, 0.7, 0.2], 2));
    }
}
