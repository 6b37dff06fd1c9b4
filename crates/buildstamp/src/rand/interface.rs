use crate::Result;

/// A trait for random sources.
///
/// This abstraction allows you to plug in a real random source or a mocked
/// random source in tests.
///
/// The random type `T` is generic (typically `u128` or a [`crate::BuildToken`]).
///
/// # Example
/// ```
/// use buildstamp::{BuildToken, RandSource, Result};
///
/// struct FixedRand;
/// impl RandSource<BuildToken> for FixedRand {
///     fn rand(&self) -> Result<BuildToken> {
///         Ok(BuildToken::new("1234567890abcdef"))
///     }
/// }
///
/// let rng = FixedRand;
/// assert_eq!(rng.rand().unwrap().as_str(), "1234567890abcdef");
/// ```
pub trait RandSource<T> {
    /// Returns a random value.
    ///
    /// # Errors
    /// - Returns [`crate::Error::Randomness`] if the entropy source failed.
    fn rand(&self) -> Result<T>;
}
