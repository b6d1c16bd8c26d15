pub mod forward_pass;
pub mod network;
pub mod spec;
pub mod weights;

pub use forward_pass::ForwardPass;
pub use network::Network;
pub use spec::NetworkSpec;
