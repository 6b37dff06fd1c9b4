use core::fmt;

/// Version nibble and variant bits of an RFC 4122 version-4 UUID.
const V4_VERSION_MASK: u128 = 0xF << 76;
const V4_VERSION: u128 = 0x4 << 76;
const V4_VARIANT_MASK: u128 = 0b11 << 62;
const V4_VARIANT: u128 = 0b10 << 62;

/// An opaque, per-build random token.
///
/// Tokens carry no temporal meaning; they exist only to correlate the
/// artifacts and logs of a single build. Tokens drawn from a real random
/// source are 32 lowercase hex characters laid out as a version-4 UUID
/// (without dashes), but any string handed out by a [`crate::RandSource`] is
/// accepted verbatim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BuildToken(String);

impl BuildToken {
    /// Wraps an already rendered token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Renders 128 random bits as a version-4 UUID hex digest.
    ///
    /// # Example
    /// ```
    /// use buildstamp::BuildToken;
    ///
    /// let token = BuildToken::from_random(u128::MAX);
    /// assert_eq!(token.as_str(), "ffffffffffff4fffbfffffffffffffff");
    /// ```
    pub fn from_random(bits: u128) -> Self {
        let bits = (bits & !V4_VERSION_MASK & !V4_VARIANT_MASK) | V4_VERSION | V4_VARIANT;
        Self(format!("{bits:032x}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for BuildToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<BuildToken> for String {
    fn from(token: BuildToken) -> Self {
        token.0
    }
}
