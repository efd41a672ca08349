pub mod normalizer;
pub mod scorer;

pub use normalizer::{closed_on, Normalizer};
pub use scorer::score;
