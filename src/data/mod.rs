pub mod csv;
pub mod image;
pub mod mnist;

pub use csv::load_mnist_csv;
pub use self::image::image_bytes_to_mnist;
pub use mnist::{guesses, image_to_input, one_hot, Guess, MnistImage};
