pub mod dense;

pub use dense::{Layer, Node, Weight};
