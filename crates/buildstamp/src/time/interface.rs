use crate::Result;
use time::OffsetDateTime;

/// A trait for time sources that return the current wall-clock time.
///
/// This abstraction allows you to plug in the real system clock or a mocked
/// time source in tests.
///
/// The returned value carries the UTC offset of the zone build identifiers
/// are stamped in; only its calendar fields (to whole seconds) are used.
///
/// # Example
///
/// ```
/// use buildstamp::{Result, TimeSource};
/// use time::OffsetDateTime;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn now(&self) -> Result<OffsetDateTime> {
///         Ok(OffsetDateTime::UNIX_EPOCH)
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.now().unwrap().year(), 1970);
/// ```
pub trait TimeSource {
    /// Returns the current wall-clock time.
    ///
    /// # Errors
    /// - Returns [`crate::Error::Clock`] if the time cannot be determined.
    fn now(&self) -> Result<OffsetDateTime>;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> Result<OffsetDateTime> {
        (**self).now()
    }
}
