//! fcnn command-line driver.
//!
//! Set RUST_LOG=info (or debug) for progress output.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use fcnn::data::csv::load_mnist_csv_file;
use fcnn::{evaluate, guesses, image_to_input, train_loop, Network, NetworkSpec, TrainConfig};

#[derive(Parser, Debug)]
#[command(name = "fcnn", about = "Train and query a fully-connected MNIST classifier")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the default MNIST network spec
    Init {
        spec: PathBuf,
    },

    /// Train on a labelled CSV; resumes from the weights file if it exists
    Train {
        spec: PathBuf,
        data: PathBuf,
        weights: PathBuf,

        /// Number of samples drawn (with replacement) from the dataset
        #[arg(long, default_value_t = 60_000)]
        samples: usize,

        /// Samples per gradient application
        #[arg(long, default_value_t = 128)]
        batch_size: usize,

        #[arg(long, default_value_t = 0.1)]
        learning_rate: f64,

        /// Log progress every N samples (0 disables)
        #[arg(long, default_value_t = 10_000)]
        log_every: usize,

        /// Seed for sample selection; random when omitted
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Report accuracy on a labelled CSV
    Test {
        spec: PathBuf,
        weights: PathBuf,
        data: PathBuf,
    },

    /// Print the top two guesses for an image file
    Guess {
        spec: PathBuf,
        weights: PathBuf,
        image: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    match Args::parse().command {
        Command::Init { spec } => init(&spec),
        Command::Train { spec, data, weights, samples, batch_size, learning_rate, log_every, seed } => {
            let config = TrainConfig { samples, batch_size, learning_rate, log_every, seed };
            train(&spec, &data, &weights, &config)
        }
        Command::Test { spec, weights, data } => test(&spec, &weights, &data),
        Command::Guess { spec, weights, image } => guess(&spec, &weights, &image),
    }
}

fn init(spec_path: &Path) -> Result<()> {
    NetworkSpec::mnist().save_json(spec_path)
        .with_context(|| format!("writing {}", spec_path.display()))?;
    println!("wrote default MNIST spec to {}", spec_path.display());
    Ok(())
}

fn load_network(spec_path: &Path) -> Result<Network> {
    let spec = NetworkSpec::load_json(spec_path)
        .with_context(|| format!("reading spec {}", spec_path.display()))?;
    let network = spec.build().with_context(|| format!("building network '{}'", spec.name))?;
    info!("network '{}': layers {:?}", spec.name, network.layer_sizes());
    Ok(network)
}

fn load_trained(spec_path: &Path, weights_path: &Path) -> Result<Network> {
    let mut network = load_network(spec_path)?;
    network.load_weights(weights_path)
        .with_context(|| format!("reading weights {}", weights_path.display()))?;
    Ok(network)
}

fn train(spec_path: &Path, data_path: &Path, weights_path: &Path, config: &TrainConfig) -> Result<()> {
    let mut network = if weights_path.exists() {
        load_trained(spec_path, weights_path)?
    } else {
        load_network(spec_path)?
    };

    let images = load_mnist_csv_file(data_path)
        .with_context(|| format!("loading dataset {}", data_path.display()))?;
    let stats = train_loop(&mut network, &images, config)?;
    network.save_weights(weights_path)
        .with_context(|| format!("writing {}", weights_path.display()))?;

    println!(
        "{} samples, {} batches, mean loss {:.4}, accuracy {:.2}%",
        stats.samples, stats.batches, stats.mean_loss, stats.accuracy * 100.0
    );
    Ok(())
}

fn test(spec_path: &Path, weights_path: &Path, data_path: &Path) -> Result<()> {
    let network = load_trained(spec_path, weights_path)?;
    let images = load_mnist_csv_file(data_path)
        .with_context(|| format!("loading dataset {}", data_path.display()))?;

    let accuracy = evaluate(&network, &images)?;
    println!("accuracy on {} images: {:.2}%", images.len(), accuracy * 100.0);
    Ok(())
}

fn guess(spec_path: &Path, weights_path: &Path, image_path: &Path) -> Result<()> {
    let network = load_trained(spec_path, weights_path)?;

    let bytes = std::fs::read(image_path)
        .with_context(|| format!("reading {}", image_path.display()))?;
    let image = fcnn::data::image_bytes_to_mnist(&bytes)?;
    let outputs = network.predict(&image_to_input(&image)?)?;

    for (rank, g) in guesses(&outputs).iter().take(2).enumerate() {
        println!("#{} guess: {} ({:.2}%)", rank + 1, g.index, g.confidence * 100.0);
    }
    Ok(())
}
