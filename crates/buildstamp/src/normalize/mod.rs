mod normalizer;
mod tables;

pub use normalizer::*;
pub use tables::*;
