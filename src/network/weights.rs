use std::path::Path;

use log::info;

use crate::error::{Error, Result};
use crate::network::network::Network;

/// Plain-text weight format: one line per layer, values comma-separated.
/// Each node of a hidden or output layer contributes its bias followed by its
/// incoming weights.  The input layer is never evaluated and writes a single
/// bias slot.
impl Network {
    pub fn export_weights(&self) -> String {
        let mut contents = String::new();
        for (i, layer) in self.layers.iter().enumerate() {
            let values: Vec<String> = if i == 0 {
                vec![layer.nodes[0].bias.to_string()]
            } else {
                layer.nodes.iter()
                    .flat_map(|node| {
                        std::iter::once(node.bias)
                            .chain(node.weights.iter().map(|w| w.value))
                    })
                    .map(|v| v.to_string())
                    .collect()
            };
            contents.push_str(&values.join(","));
            contents.push('\n');
        }
        contents
    }

    /// Inverse of `export_weights`.  The whole text is parsed and checked
    /// against the network shape before any value is written.
    ///
    /// The input-layer line may hold either the single bias slot or one bias
    /// per input node; a single value is copied to every input node.
    pub fn import_weights(&mut self, contents: &str) -> Result<()> {
        let mut lines: Vec<&str> = contents.lines().map(str::trim).collect();
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        if lines.len() != self.layers.len() {
            return Err(Error::LineCount { expected: self.layers.len(), found: lines.len() });
        }

        let input_size = self.input_size();
        let per_node = lines[0].split(',').count() == input_size;
        let input_line = parse_line(0, lines[0], if per_node { input_size } else { 1 })?;
        let parsed = lines.iter()
            .zip(&self.layers)
            .enumerate()
            .skip(1)
            .map(|(i, (line, layer))| {
                let expected: usize = layer.nodes.iter().map(|n| n.param_count()).sum();
                parse_line(i, line, expected)
            })
            .collect::<Result<Vec<_>>>()?;

        for (j, node) in self.layers[0].nodes.iter_mut().enumerate() {
            node.bias = input_line[j % input_line.len()];
        }
        for (layer, values) in self.layers[1..].iter_mut().zip(parsed) {
            let mut values = values.into_iter();
            for node in &mut layer.nodes {
                // Lengths were checked above; the fallbacks are unreachable.
                node.bias = values.next().unwrap_or(node.bias);
                for weight in &mut node.weights {
                    weight.value = values.next().unwrap_or(weight.value);
                }
            }
        }
        Ok(())
    }

    pub fn save_weights<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path.as_ref(), self.export_weights())?;
        info!("saved weights to {}", path.as_ref().display());
        Ok(())
    }

    pub fn load_weights<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        self.import_weights(&contents)?;
        info!("loaded weights from {}", path.as_ref().display());
        Ok(())
    }
}

fn parse_line(layer: usize, line: &str, expected: usize) -> Result<Vec<f64>> {
    let tokens: Vec<&str> = if line.is_empty() { Vec::new() } else { line.split(',').collect() };
    if tokens.len() != expected {
        return Err(Error::TokenCount { layer, expected, found: tokens.len() });
    }
    tokens.iter()
        .enumerate()
        .map(|(index, token)| {
            token.trim().parse::<f64>().map_err(|_| Error::ParseValue {
                layer,
                index,
                value: token.trim().to_string(),
            })
        })
        .collect()
}
