use std::path::Path;

use rand::{rngs::StdRng, SeedableRng};
use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::error::Result;
use crate::loss::loss_type::LossType;
use crate::network::network::Network;

/// A fully serializable description of a network architecture plus its
/// training loss.
///
/// `NetworkSpec` is saved to / loaded from JSON independently of the trained
/// weights, which live in the plain-text weight format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Human-readable name, used in log output.
    pub name: String,
    /// Node count of every layer, input first.
    pub layer_sizes: Vec<usize>,
    /// One activation per layer; the input layer's entry is ignored.
    pub activations: Vec<ActivationFunction>,
    #[serde(default)]
    pub loss: LossType,
    /// Seed for weight initialisation; random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl NetworkSpec {
    /// 784 → 128 (ReLU) → 64 (ReLU) → 10 (Softmax), cross-entropy.
    pub fn mnist() -> NetworkSpec {
        NetworkSpec {
            name: "mnist".to_string(),
            layer_sizes: vec![784, 128, 64, 10],
            activations: vec![
                ActivationFunction::Identity,
                ActivationFunction::ReLU,
                ActivationFunction::ReLU,
                ActivationFunction::Softmax,
            ],
            loss: LossType::CrossEntropy,
            seed: None,
        }
    }

    pub fn build(&self) -> Result<Network> {
        match self.seed {
            Some(seed) => Network::with_rng(
                &self.layer_sizes,
                &self.activations,
                self.loss,
                &mut StdRng::seed_from_u64(seed),
            ),
            None => Network::new(&self.layer_sizes, &self.activations, self.loss),
        }
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

impl Network {
    pub fn from_spec(spec: &NetworkSpec) -> Result<Network> {
        spec.build()
    }
}
