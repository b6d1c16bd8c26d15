use thiserror::Error;

/// Errors surfaced by network construction, the forward/backward passes,
/// weight import and dataset loading.
///
/// Every variant is a caller error: the network is never left half-updated.
#[derive(Debug, Error)]
pub enum Error {
    #[error("a network needs at least 2 layers, got {0}")]
    TooFewLayers(usize),

    #[error("{sizes} layer sizes but {activations} activations")]
    LayerCountMismatch { sizes: usize, activations: usize },

    #[error("layer {0} has no nodes")]
    EmptyLayer(usize),

    #[error("loss {loss:?} cannot be paired with a {activation:?} output layer")]
    IncompatibleLoss {
        loss: crate::loss::LossType,
        activation: crate::activation::ActivationFunction,
    },

    #[error("softmax is only supported on the output layer, found on layer {0}")]
    MisplacedSoftmax(usize),

    #[error("input has {found} values, input layer has {expected} nodes")]
    InputSize { expected: usize, found: usize },

    #[error("target has {found} values, output layer has {expected} nodes")]
    TargetSize { expected: usize, found: usize },

    #[error("forward pass does not match the network shape")]
    StaleForwardPass,

    #[error("layer {layer}, node {node}: {found} weights, previous layer has {expected} nodes")]
    WeightCount {
        layer: usize,
        node: usize,
        expected: usize,
        found: usize,
    },

    #[error("batch size must be at least 1")]
    ZeroBatchSize,

    #[error("weight text has {found} lines, network has {expected} layers")]
    LineCount { expected: usize, found: usize },

    #[error("layer {layer}: expected {expected} values, found {found}")]
    TokenCount {
        layer: usize,
        expected: usize,
        found: usize,
    },

    #[error("layer {layer}, value {index}: '{value}' is not a number")]
    ParseValue {
        layer: usize,
        index: usize,
        value: String,
    },

    #[error("label {label} is out of range for {classes} classes")]
    Label { label: usize, classes: usize },

    #[error("pixel buffer has {found} bytes, expected {expected}")]
    PixelBufferSize { expected: usize, found: usize },

    #[error("row {row}: {message}")]
    Csv { row: usize, message: String },

    #[error("image decode failed: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
