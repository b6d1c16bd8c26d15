use log::debug;
use rand::Rng;

use crate::activation::activation::{ActivationFunction, ActivationKind};
use crate::error::{Error, Result};
use crate::layers::dense::Layer;
use crate::loss::loss_type::LossType;
use crate::network::forward_pass::ForwardPass;

#[derive(Debug, Clone)]
pub struct Network {
    pub layers: Vec<Layer>,
    pub loss: LossType,
}

impl Network {
    /// Builds a network with randomly initialised weights.
    ///
    /// `activations[0]` belongs to the input layer and is never evaluated;
    /// by convention pass `ActivationFunction::Identity`.
    pub fn new(
        layer_sizes: &[usize],
        activations: &[ActivationFunction],
        loss: LossType,
    ) -> Result<Network> {
        Network::with_rng(layer_sizes, activations, loss, &mut rand::thread_rng())
    }

    /// Same as `new`, drawing initial weights from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(
        layer_sizes: &[usize],
        activations: &[ActivationFunction],
        loss: LossType,
        rng: &mut R,
    ) -> Result<Network> {
        validate_shape(layer_sizes, activations, loss)?;

        let mut layers = Vec::with_capacity(layer_sizes.len());
        layers.push(Layer::input(layer_sizes[0], activations[0]));
        for i in 1..layer_sizes.len() {
            layers.push(Layer::new(layer_sizes[i], layer_sizes[i - 1], activations[i], rng));
        }

        debug!("built network {:?} with {:?} loss", layer_sizes, loss);
        Ok(Network { layers, loss })
    }

    pub fn layer_sizes(&self) -> Vec<usize> {
        self.layers.iter().map(Layer::size).collect()
    }

    pub fn input_size(&self) -> usize {
        self.layers[0].size()
    }

    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].size()
    }

    /// Forward pass.  Layer 0 takes `input` as its outputs; every later layer
    /// is computed strictly after its predecessor.
    ///
    /// The network is not mutated; the returned cache feeds `backward`.
    pub fn forward(&self, input: &[f64]) -> Result<ForwardPass> {
        let expected = self.input_size();
        if input.len() != expected {
            return Err(Error::InputSize { expected, found: input.len() });
        }

        self.check_weights()?;

        let mut pass = ForwardPass::with_input(input, self.layers.len());
        for layer in &self.layers[1..] {
            let wsum = layer.weighted_sums(pass.output());
            let output = layer.activator.apply(&wsum);
            pass.push(wsum, output);
        }
        Ok(pass)
    }

    /// Output vector for `input`, discarding the intermediate cache.
    pub fn predict(&self, input: &[f64]) -> Result<Vec<f64>> {
        Ok(self.forward(input)?.into_output())
    }

    /// Backward pass for one sample.  Adds ∂L/∂bias and ∂L/∂w into every
    /// node's and weight's gradient accumulator; values are left untouched.
    ///
    /// `pass` must be the result of `forward` on this network for the sample
    /// whose `target` is given.
    pub fn backward(&mut self, pass: &ForwardPass, target: &[f64]) -> Result<()> {
        self.check_weights()?;
        self.check_pass(pass)?;
        let last = self.layers.len() - 1;
        let output_count = self.output_size();
        if target.len() != output_count {
            return Err(Error::TargetSize { expected: output_count, found: target.len() });
        }

        let loss = self.loss;
        let activator = self.layers[last].activator;
        let mut deltas: Vec<f64> = pass.layer_output(last).iter()
            .zip(pass.layer_wsum(last))
            .zip(target)
            .map(|((&o, &z), &t)| loss.derivative(o, t, output_count) * activator.derivative(z))
            .collect();

        for i in (1..=last).rev() {
            self.layers[i].accumulate_gradients(&deltas, pass.layer_output(i - 1));
            if i > 1 {
                deltas = self.hidden_deltas(i - 1, &deltas, pass);
            }
        }
        Ok(())
    }

    /// ∂L/∂wsum for every node of hidden layer `index`, given the deltas of
    /// the layer after it (the transpose of the forward weight matrix).
    fn hidden_deltas(&self, index: usize, next_deltas: &[f64], pass: &ForwardPass) -> Vec<f64> {
        let layer = &self.layers[index];
        let next = &self.layers[index + 1];
        pass.layer_wsum(index).iter()
            .enumerate()
            .map(|(j, &z)| {
                let upstream: f64 = next.nodes.iter().zip(next_deltas)
                    .map(|(node, &delta)| delta * node.weights[j].value)
                    .sum();
                upstream * layer.activator.derivative(z)
            })
            .collect()
    }

    /// Every node past the input layer must hold one weight per node of the
    /// previous layer.  `layers` is public, so this is rechecked per pass.
    fn check_weights(&self) -> Result<()> {
        for (i, pair) in self.layers.windows(2).enumerate() {
            let expected = pair[0].size();
            if let Some((node, n)) = pair[1].nodes.iter().enumerate()
                .find(|(_, n)| n.weights.len() != expected)
            {
                return Err(Error::WeightCount { layer: i + 1, node, expected, found: n.weights.len() });
            }
        }
        Ok(())
    }

    fn check_pass(&self, pass: &ForwardPass) -> Result<()> {
        let matches = pass.layer_count() == self.layers.len()
            && self.layers.iter().enumerate().all(|(i, layer)| {
                pass.layer_output(i).len() == layer.size() && pass.layer_wsum(i).len() == layer.size()
            });
        if matches { Ok(()) } else { Err(Error::StaleForwardPass) }
    }

    /// One descent step: `value -= rate · gradient` for every weight and bias
    /// past the input layer, then every accumulator is reset to 0.
    ///
    /// For mini-batches pass `learning_rate / batch_size`.
    pub fn apply_gradients(&mut self, rate: f64) {
        for layer in &mut self.layers[1..] {
            layer.apply_gradients(rate);
        }
    }

    /// Drops accumulated gradients without applying them.
    pub fn clear_gradients(&mut self) {
        for layer in &mut self.layers[1..] {
            layer.clear_gradients();
        }
    }
}

fn validate_shape(
    layer_sizes: &[usize],
    activations: &[ActivationFunction],
    loss: LossType,
) -> Result<()> {
    if layer_sizes.len() != activations.len() {
        return Err(Error::LayerCountMismatch {
            sizes: layer_sizes.len(),
            activations: activations.len(),
        });
    }
    if layer_sizes.len() < 2 {
        return Err(Error::TooFewLayers(layer_sizes.len()));
    }
    if let Some(i) = layer_sizes.iter().position(|&size| size == 0) {
        return Err(Error::EmptyLayer(i));
    }

    let last = activations.len() - 1;
    if let Some(i) = (1..last).find(|&i| activations[i].kind() == ActivationKind::Vector) {
        return Err(Error::MisplacedSoftmax(i));
    }

    let softmax_output = activations[last] == ActivationFunction::Softmax;
    if softmax_output != (loss == LossType::CrossEntropy) {
        return Err(Error::IncompatibleLoss { loss, activation: activations[last] });
    }
    Ok(())
}
