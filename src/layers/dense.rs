use rand::Rng;

use crate::activation::activation::ActivationFunction;

/// A single connection into a node from one node of the previous layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Weight {
    pub value: f64,
    /// Accumulated ∂L/∂value since the last gradient application.
    pub gradient: f64,
}

/// One unit of a layer.  Nodes of the input layer carry no weights; their
/// bias slot exists only so every layer serializes the same way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    pub bias: f64,
    /// Accumulated ∂L/∂bias since the last gradient application.
    pub bias_gradient: f64,
    pub weights: Vec<Weight>,
}

impl Node {
    /// Number of values this node writes to a weight file line.
    pub fn param_count(&self) -> usize {
        1 + self.weights.len()
    }

    /// bias + Σ inputs[k] · weights[k].value
    pub fn weighted_sum(&self, inputs: &[f64]) -> f64 {
        self.weights.iter().zip(inputs.iter())
            .fold(self.bias, |acc, (w, x)| acc + x * w.value)
    }
}

#[derive(Debug, Clone)]
pub struct Layer {
    pub activator: ActivationFunction,
    pub nodes: Vec<Node>,
}

impl Layer {
    /// The input layer: `size` weightless nodes with zero bias.
    pub fn input(size: usize, activation: ActivationFunction) -> Layer {
        Layer {
            activator: activation,
            nodes: vec![Node::default(); size],
        }
    }

    /// A fully-connected layer of `size` nodes, each with `input_size`
    /// weights drawn uniformly from ±√(1 / input_size) and a zero bias.
    pub fn new<R: Rng + ?Sized>(
        size: usize,
        input_size: usize,
        activation: ActivationFunction,
        rng: &mut R,
    ) -> Layer {
        let limit = (1.0 / input_size as f64).sqrt();
        let nodes = (0..size)
            .map(|_| Node {
                bias: 0.0,
                bias_gradient: 0.0,
                weights: (0..input_size)
                    .map(|_| Weight {
                        value: (rng.gen::<f64>() - 0.5) * 2.0 * limit,
                        gradient: 0.0,
                    })
                    .collect(),
            })
            .collect();

        Layer { activator: activation, nodes }
    }

    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// Pre-activation sums of every node for the given previous-layer outputs.
    pub fn weighted_sums(&self, inputs: &[f64]) -> Vec<f64> {
        self.nodes.iter().map(|node| node.weighted_sum(inputs)).collect()
    }

    /// Adds this sample's gradients: `deltas[j]` is ∂L/∂wsum of node j and
    /// `inputs` the previous layer's outputs.
    pub fn accumulate_gradients(&mut self, deltas: &[f64], inputs: &[f64]) {
        for (node, &delta) in self.nodes.iter_mut().zip(deltas.iter()) {
            node.bias_gradient += delta;
            for (weight, &x) in node.weights.iter_mut().zip(inputs.iter()) {
                weight.gradient += delta * x;
            }
        }
    }

    /// Applies accumulated gradients scaled by `rate` and zeroes them.
    pub fn apply_gradients(&mut self, rate: f64) {
        for node in &mut self.nodes {
            node.bias -= rate * node.bias_gradient;
            node.bias_gradient = 0.0;
            for weight in &mut node.weights {
                weight.value -= rate * weight.gradient;
                weight.gradient = 0.0;
            }
        }
    }

    /// Zeroes accumulated gradients without touching values.
    pub fn clear_gradients(&mut self) {
        for node in &mut self.nodes {
            node.bias_gradient = 0.0;
            for weight in &mut node.weights {
                weight.gradient = 0.0;
            }
        }
    }
}
