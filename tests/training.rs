//! Training-driver behaviour: the network actually learns, and the MNIST
//! sample path (pixels → inputs → one-hot → guesses) fits together.

use fcnn::{
    evaluate, guesses, train_loop, ActivationFunction::*, LossType, MnistImage, Network,
    Sgd, TrainConfig, Trainer,
};
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn learns_xor() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut net = Network::with_rng(&[2, 8, 1], &[Identity, Sigmoid, Sigmoid], LossType::Mse, &mut rng)
        .unwrap();
    let data = [
        ([0.0, 0.0], [0.0]),
        ([0.0, 1.0], [1.0]),
        ([1.0, 0.0], [1.0]),
        ([1.0, 1.0], [0.0]),
    ];

    let mut trainer = Trainer::new(Sgd::new(2.0), 4).unwrap();
    let first_loss: f64 = data.iter()
        .map(|(x, t)| net.loss.loss(&net.predict(x).unwrap(), t))
        .sum();
    for _ in 0..10_000 {
        for (x, t) in &data {
            trainer.train_input(&mut net, x, t).unwrap();
        }
    }
    let last_loss: f64 = data.iter()
        .map(|(x, t)| net.loss.loss(&net.predict(x).unwrap(), t))
        .sum();

    assert!(last_loss < first_loss);
    for (x, t) in &data {
        let out = net.predict(x).unwrap()[0];
        assert!((out - t[0]).abs() < 0.3, "{x:?} -> {out}");
    }
}

/// Ten synthetic "digits": class k lights up a distinct horizontal band.
fn banded_images() -> Vec<MnistImage> {
    (0..10u8)
        .map(|label| {
            let brightness: Vec<u8> = (0..784)
                .map(|i| {
                    let row = i / 28;
                    if row / 3 == label as usize { 255 } else { 0 }
                })
                .collect();
            MnistImage::from_grayscale(label, &brightness)
        })
        .collect()
}

#[test]
fn train_loop_fits_separable_digits() {
    let images = banded_images();
    let mut rng = StdRng::seed_from_u64(8);
    let mut net = Network::with_rng(
        &[784, 32, 10],
        &[Identity, ReLU, Softmax],
        LossType::CrossEntropy,
        &mut rng,
    ).unwrap();

    let config = TrainConfig {
        batch_size: 8,
        learning_rate: 0.5,
        samples: 3_000,
        log_every: 1_000,
        seed: Some(1),
    };
    let stats = train_loop(&mut net, &images, &config).unwrap();
    assert_eq!(stats.samples, 3_000);
    assert_eq!(stats.batches, 375);
    assert!(stats.mean_loss.is_finite());

    assert_eq!(evaluate(&net, &images).unwrap(), 1.0);

    let input = fcnn::image_to_input(&images[4]).unwrap();
    let ranked = guesses(&net.predict(&input).unwrap());
    assert_eq!(ranked[0].index, 4);
    assert!(ranked[0].confidence > ranked[1].confidence);
}

#[test]
fn partial_final_batch_is_flushed() {
    let images = banded_images();
    let mut net = Network::new(&[784, 10], &[Identity, Softmax], LossType::CrossEntropy).unwrap();
    let config = TrainConfig { batch_size: 4, samples: 10, log_every: 0, ..TrainConfig::default() };
    let stats = train_loop(&mut net, &images, &config).unwrap();
    assert_eq!(stats.batches, 3);
    assert!(net.layers[1].nodes.iter().all(|n| n.bias_gradient == 0.0));
}

#[test]
fn empty_dataset_trains_nothing() {
    let mut net = Network::new(&[784, 10], &[Identity, Softmax], LossType::CrossEntropy).unwrap();
    let stats = train_loop(&mut net, &[], &TrainConfig::default()).unwrap();
    assert_eq!(stats.samples, 0);
    assert_eq!(evaluate(&net, &[]).unwrap(), 0.0);
}

#[test]
fn zero_batch_size_is_rejected_before_training() {
    let images = banded_images();
    let mut net = Network::new(&[784, 10], &[Identity, Softmax], LossType::CrossEntropy).unwrap();
    let before = net.export_weights();
    let config = TrainConfig { batch_size: 0, samples: 10, log_every: 0, ..TrainConfig::default() };

    assert!(matches!(train_loop(&mut net, &images, &config), Err(fcnn::Error::ZeroBatchSize)));
    assert!(matches!(train_loop(&mut net, &[], &config), Err(fcnn::Error::ZeroBatchSize)));
    assert_eq!(net.export_weights(), before);
}

#[test]
fn label_outside_output_layer_is_an_error() {
    let mut net = Network::new(&[784, 5], &[Identity, Softmax], LossType::CrossEntropy).unwrap();
    let mut trainer = Trainer::new(Sgd::new(0.1), 1).unwrap();
    let image = MnistImage::from_grayscale(7, &[0; 784]);
    assert!(matches!(
        trainer.train_sample(&mut net, &image),
        Err(fcnn::Error::Label { label: 7, classes: 5 })
    ));
}
