use std::time::Instant;

use log::{info, warn};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::data::mnist::{image_to_input, MnistImage};
use crate::error::Result;
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::train_config::TrainConfig;
use crate::train::train_stats::{Tally, TrainStats};
use crate::train::trainer::{is_correct, Trainer};

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Trains `network` on `config.samples` images drawn uniformly at random (with
/// replacement) from `images`, applying SGD every `config.batch_size` samples.
///
/// A trailing partial batch is applied before returning, so no accumulated
/// gradient is left on the network.
///
/// Fails with `Error::ZeroBatchSize` when `config.batch_size` is 0, even if
/// `images` is empty.
pub fn train_loop(
    network: &mut Network,
    images: &[MnistImage],
    config: &TrainConfig,
) -> Result<TrainStats> {
    let mut trainer = Trainer::new(Sgd::new(config.learning_rate), config.batch_size)?;
    if images.is_empty() {
        warn!("no training images; nothing to do");
        return Ok(TrainStats::default());
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut total = Tally::default();
    let mut window = Tally::default();
    let t_start = Instant::now();

    for _ in 0..config.samples {
        let Some(image) = images.choose(&mut rng) else { break };
        let step = trainer.train_sample(network, image)?;
        let correct = is_correct(&step.outputs, image.label);
        total.record(step.loss, correct);
        window.record(step.loss, correct);

        if config.log_every > 0 && trainer.samples_seen() % config.log_every == 0 {
            info!(
                "{} samples: loss {:.4}, accuracy {:.2}% ({} ms)",
                trainer.samples_seen(),
                window.mean_loss(),
                window.accuracy() * 100.0,
                t_start.elapsed().as_millis(),
            );
            window = Tally::default();
        }
    }
    trainer.flush(network);

    let stats = TrainStats {
        samples: total.samples,
        batches: trainer.batches_applied(),
        mean_loss: total.mean_loss(),
        accuracy: total.accuracy(),
    };
    info!(
        "trained on {} samples in {} batches: mean loss {:.4}, accuracy {:.2}%",
        stats.samples, stats.batches, stats.mean_loss, stats.accuracy * 100.0,
    );
    Ok(stats)
}

/// Fraction of `images` whose top guess matches the label (eval mode: no
/// gradients are accumulated).
pub fn evaluate(network: &Network, images: &[MnistImage]) -> Result<f64> {
    let mut tally = Tally::default();
    for image in images {
        let input = image_to_input(image)?;
        let outputs = network.predict(&input)?;
        tally.record(0.0, is_correct(&outputs, image.label));
    }
    Ok(tally.accuracy())
}
