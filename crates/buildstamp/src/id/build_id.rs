use crate::{Error, Result};
use core::{fmt, str::FromStr};
use time::{Date, Duration, Month, OffsetDateTime, PrimitiveDateTime, Time};

/// Number of digits in the `YYYYMMDDHHMMSS` base of a build identifier.
pub const BUILD_ID_LEN: usize = 14;

/// Number of digits in the legacy sequence suffix (`YYYYMMDDHHMMSSNNN`).
pub const LEGACY_SUFFIX_LEN: usize = 3;

/// A wall-clock build identifier of the form `YYYYMMDDHHMMSS`.
///
/// The identifier is the calendar time (to whole seconds) in the zone of the
/// clock that produced it. No offset is stored: ordering is the ordering of
/// the calendar fields, which is also the lexical ordering of the rendered
/// strings.
///
/// Parsing additionally accepts the legacy suffixed form
/// `YYYYMMDDHHMMSSNNN`; the suffix is discarded, since only the 14-digit base
/// takes part in ordering.
///
/// # Example
/// ```
/// use buildstamp::BuildId;
///
/// let id: BuildId = "20250101235959".parse().unwrap();
/// assert_eq!(id.successor().unwrap().to_string(), "20250102000000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BuildId {
    stamp: PrimitiveDateTime,
}

impl BuildId {
    /// The sentinel used when a scheduler has never allocated an identifier:
    /// `19700101000000`.
    pub const EPOCH: Self = Self {
        stamp: PrimitiveDateTime::new(
            match Date::from_calendar_date(1970, Month::January, 1) {
                Ok(date) => date,
                Err(_) => panic!("invalid epoch date"),
            },
            Time::MIDNIGHT,
        ),
    };

    /// Builds an identifier from a calendar date-time, dropping sub-second
    /// precision.
    pub fn from_datetime(stamp: PrimitiveDateTime) -> Self {
        Self {
            stamp: stamp.replace_nanosecond(0).unwrap_or(stamp),
        }
    }

    /// Builds an identifier from a clock reading, using the calendar fields
    /// in the reading's own offset.
    pub fn from_offset_datetime(now: OffsetDateTime) -> Self {
        Self::from_datetime(PrimitiveDateTime::new(now.date(), now.time()))
    }

    /// Returns the calendar date-time this identifier encodes.
    pub const fn datetime(&self) -> PrimitiveDateTime {
        self.stamp
    }

    /// Returns the identifier one second later, carrying into minutes, hours,
    /// days, months and years as needed.
    ///
    /// # Errors
    /// - Returns [`Error::Clock`] if the result would leave the representable
    ///   calendar range.
    pub fn successor(&self) -> Result<Self> {
        self.stamp
            .checked_add(Duration::SECOND)
            .map(|stamp| Self { stamp })
            .ok_or_else(|| Error::clock(format!("no build id after {self}")))
    }

    fn parse_base(digits: &str) -> Option<Self> {
        let field = |range: core::ops::Range<usize>| digits.get(range)?.parse::<u16>().ok();

        let year = i32::from(field(0..4)?);
        let month = Month::try_from(u8::try_from(field(4..6)?).ok()?).ok()?;
        let day = u8::try_from(field(6..8)?).ok()?;
        let hour = u8::try_from(field(8..10)?).ok()?;
        let minute = u8::try_from(field(10..12)?).ok()?;
        let second = u8::try_from(field(12..14)?).ok()?;

        let date = Date::from_calendar_date(year, month, day).ok()?;
        let time = Time::from_hms(hour, minute, second).ok()?;
        Some(Self {
            stamp: PrimitiveDateTime::new(date, time),
        })
    }
}

impl Default for BuildId {
    fn default() -> Self {
        Self::EPOCH
    }
}

impl fmt::Display for BuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.stamp;
        write!(
            f,
            "{:04}{:02}{:02}{:02}{:02}{:02}",
            s.year(),
            u8::from(s.month()),
            s.day(),
            s.hour(),
            s.minute(),
            s.second()
        )
    }
}

impl FromStr for BuildId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let corrupt = || Error::CorruptState {
            key: "buildid".to_string(),
            value: s.to_string(),
        };

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(corrupt());
        }

        match s.len() {
            BUILD_ID_LEN => Self::parse_base(s).ok_or_else(corrupt),
            len if len == BUILD_ID_LEN + LEGACY_SUFFIX_LEN => {
                Self::parse_base(&s[..BUILD_ID_LEN]).ok_or_else(corrupt)
            }
            _ => Err(corrupt()),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for BuildId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for BuildId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> BuildId {
        s.parse().unwrap()
    }

    #[test]
    fn epoch_renders_as_sentinel() {
        assert_eq!(BuildId::EPOCH.to_string(), "19700101000000");
        assert_eq!(BuildId::default(), BuildId::EPOCH);
    }

    #[test]
    fn parse_and_display_agree() {
        assert_eq!(id("20240229123456").to_string(), "20240229123456");
    }

    #[test]
    fn legacy_suffix_is_ignored() {
        assert_eq!(id("20240229123456007"), id("20240229123456"));
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in [
            "",
            "2024",
            "2024022912345x",
            "20240230123456", // no Feb 30
            "20241301000000",
            "20240101246000",
            "202402291234567",
            "-2024022912345",
        ] {
            assert!(
                matches!(bad.parse::<BuildId>(), Err(Error::CorruptState { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn successor_carries_across_fields() {
        assert_eq!(id("19700102000059").successor().unwrap(), id("19700102000100"));
        assert_eq!(id("20231231235959").successor().unwrap(), id("20240101000000"));
        assert_eq!(id("20240228235959").successor().unwrap(), id("20240229000000"));
    }

    #[test]
    fn ordering_matches_lexical_ordering() {
        let a = id("20240101000059");
        let b = id("20240101000100");
        assert!(a < b);
        assert!(a.to_string() < b.to_string());
    }

    #[test]
    fn from_datetime_drops_subseconds() {
        let stamp = PrimitiveDateTime::new(
            Date::from_calendar_date(2024, Month::March, 1).unwrap(),
            Time::from_hms_milli(10, 20, 30, 999).unwrap(),
        );
        assert_eq!(BuildId::from_datetime(stamp).to_string(), "20240301102030");
    }
}
