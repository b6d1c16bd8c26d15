pub mod loop_fn;
pub mod train_config;
pub mod train_stats;
pub mod trainer;

pub use loop_fn::{evaluate, train_loop};
pub use train_config::TrainConfig;
pub use train_stats::TrainStats;
pub use trainer::{Step, Trainer};
