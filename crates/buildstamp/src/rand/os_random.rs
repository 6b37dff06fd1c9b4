use crate::{BuildToken, Error, RandSource, Result};
use rand::{TryRngCore, rngs::OsRng};

/// A `RandSource` that reads directly from the operating system's entropy
/// source.
///
/// Slower than [`crate::ThreadRandom`], but an unavailable entropy source is
/// reported as [`Error::Randomness`] instead of panicking.
#[derive(Default, Clone, Copy, Debug)]
pub struct OsRandom;

impl RandSource<u128> for OsRandom {
    fn rand(&self) -> Result<u128> {
        let mut bytes = [0u8; 16];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| Error::Randomness {
                reason: e.to_string(),
            })?;
        Ok(u128::from_be_bytes(bytes))
    }
}

impl RandSource<BuildToken> for OsRandom {
    fn rand(&self) -> Result<BuildToken> {
        <Self as RandSource<u128>>::rand(self).map(BuildToken::from_random)
    }
}
