/// Per-sample activation cache produced by `Network::forward`.
///
/// Holds the pre-activation sums (`wsum`) and outputs of every layer for one
/// input.  The backward pass reads it instead of state stored on the nodes,
/// so a cache can only ever describe the sample it was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardPass {
    pub(crate) wsums: Vec<Vec<f64>>,
    pub(crate) outputs: Vec<Vec<f64>>,
}

impl ForwardPass {
    pub(crate) fn with_input(input: &[f64], layer_count: usize) -> ForwardPass {
        let mut wsums = Vec::with_capacity(layer_count);
        let mut outputs = Vec::with_capacity(layer_count);
        // The input layer has no weighted sum; its outputs are the raw input.
        wsums.push(vec![0.0; input.len()]);
        outputs.push(input.to_vec());
        ForwardPass { wsums, outputs }
    }

    pub(crate) fn push(&mut self, wsum: Vec<f64>, output: Vec<f64>) {
        self.wsums.push(wsum);
        self.outputs.push(output);
    }

    pub fn layer_count(&self) -> usize {
        self.outputs.len()
    }

    /// Outputs of the final layer.
    pub fn output(&self) -> &[f64] {
        self.outputs.last().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Post-activation values of layer `index`.
    pub fn layer_output(&self, index: usize) -> &[f64] {
        &self.outputs[index]
    }

    /// Pre-activation sums of layer `index` (all zero for the input layer).
    pub fn layer_wsum(&self, index: usize) -> &[f64] {
        &self.wsums[index]
    }

    pub fn into_output(mut self) -> Vec<f64> {
        self.outputs.pop().unwrap_or_default()
    }
}
