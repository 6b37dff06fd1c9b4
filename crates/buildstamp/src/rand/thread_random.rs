use crate::{BuildToken, RandSource, Result};
use rand::{Rng, rng};

/// A `RandSource` that uses the thread-local RNG (`rand::rng()`).
///
/// This RNG is fast, cryptographically secure (ChaCha-based), and
/// automatically reseeded periodically. A failure to seed it panics inside
/// `rand`, so this source never returns an error.
///
/// This type does **not** store the RNG itself; it accesses the thread-local
/// generator on each call and may be freely shared across threads.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource<u128> for ThreadRandom {
    fn rand(&self) -> Result<u128> {
        Ok(rng().random())
    }
}

impl RandSource<BuildToken> for ThreadRandom {
    fn rand(&self) -> Result<BuildToken> {
        <Self as RandSource<u128>>::rand(self).map(BuildToken::from_random)
    }
}
