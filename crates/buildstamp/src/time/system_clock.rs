use crate::{Error, Result, TimeSource};
use time::{OffsetDateTime, UtcOffset};
#[cfg(feature = "tracing")]
use tracing::debug;

/// The zone build identifiers are stamped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Zone {
    /// Coordinated Universal Time.
    Utc,
    /// The host's local zone, resolved on every read.
    #[default]
    Local,
    /// A fixed offset from UTC.
    Fixed(UtcOffset),
}

/// A [`TimeSource`] backed by the system wall clock.
///
/// Unlike a monotonic timer this clock follows the host's wall time, so it
/// may stall or jump backward (NTP steps, DST transitions). The allocators
/// compensate for that; the clock itself reports what the host reports.
///
/// ## Local zone
/// On most Unix platforms the `time` crate refuses to read the local offset
/// once the process has spawned threads. [`SystemClock::local`] therefore
/// detects the offset at construction and falls back to it whenever a fresh
/// read is refused. Construct it early (before starting a runtime) to get a
/// usable fallback.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    zone: Zone,
    detected: Option<UtcOffset>,
}

impl Default for SystemClock {
    /// Constructs a clock in the host's local zone.
    fn default() -> Self {
        Self::local()
    }
}

impl SystemClock {
    /// Constructs a clock in the host's local zone.
    pub fn local() -> Self {
        Self::with_zone(Zone::Local)
    }

    /// Constructs a clock reporting UTC.
    pub const fn utc() -> Self {
        Self {
            zone: Zone::Utc,
            detected: Some(UtcOffset::UTC),
        }
    }

    /// Constructs a clock for `zone`.
    pub fn with_zone(zone: Zone) -> Self {
        let detected = match zone {
            Zone::Utc => Some(UtcOffset::UTC),
            Zone::Fixed(offset) => Some(offset),
            Zone::Local => UtcOffset::current_local_offset().ok(),
        };
        Self { zone, detected }
    }

    /// Returns the zone this clock reports in.
    pub const fn zone(&self) -> Zone {
        self.zone
    }

    fn offset_at(&self, utc: OffsetDateTime) -> Result<UtcOffset> {
        match self.zone {
            Zone::Utc => Ok(UtcOffset::UTC),
            Zone::Fixed(offset) => Ok(offset),
            Zone::Local => resolve_local(UtcOffset::local_offset_at(utc).ok(), self.detected),
        }
    }
}

/// Picks the fresh local offset when the host allowed reading it, otherwise
/// the one detected at construction.
fn resolve_local(fresh: Option<UtcOffset>, detected: Option<UtcOffset>) -> Result<UtcOffset> {
    if let Some(offset) = fresh {
        return Ok(offset);
    }

    #[cfg(feature = "tracing")]
    debug!(?detected, "local offset read refused, using offset detected at startup");
    detected.ok_or_else(|| Error::clock("local UTC offset could not be determined"))
}

impl TimeSource for SystemClock {
    fn now(&self) -> Result<OffsetDateTime> {
        let utc = OffsetDateTime::now_utc();
        let offset = self.offset_at(utc)?;
        Ok(utc.to_offset(offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utc_clock_reports_utc() {
        let now = SystemClock::utc().now().unwrap();
        assert_eq!(now.offset(), UtcOffset::UTC);
    }

    #[test]
    fn fixed_clock_reports_its_offset() {
        let offset = UtcOffset::from_hms(5, 30, 0).unwrap();
        let now = SystemClock::with_zone(Zone::Fixed(offset)).now().unwrap();
        assert_eq!(now.offset(), offset);
    }

    #[test]
    fn default_clock_is_local() {
        assert_eq!(SystemClock::default().zone(), Zone::Local);
    }

    #[test]
    fn fresh_local_offset_wins() {
        let fresh = UtcOffset::from_hms(-7, 0, 0).unwrap();
        let detected = UtcOffset::from_hms(1, 0, 0).unwrap();
        assert_eq!(resolve_local(Some(fresh), Some(detected)), Ok(fresh));
        assert_eq!(resolve_local(Some(fresh), None), Ok(fresh));
    }

    #[test]
    fn refused_local_read_falls_back_to_detected_offset() {
        let detected = UtcOffset::from_hms(9, 0, 0).unwrap();
        assert_eq!(resolve_local(None, Some(detected)), Ok(detected));
    }

    #[test]
    fn refused_local_read_without_detected_offset_is_a_clock_error() {
        assert!(matches!(resolve_local(None, None), Err(Error::Clock { .. })));
    }

    #[test]
    fn local_clock_reads_now() {
        let clock = SystemClock::local();
        let before = OffsetDateTime::now_utc();

        // The test harness is multi-threaded, so the host may refuse every
        // local offset read; only then may the clock fail.
        match clock.now() {
            Ok(now) => {
                let after = OffsetDateTime::now_utc();
                assert!(before <= now && now <= after);
            }
            Err(err) => {
                assert!(clock.detected.is_none());
                assert!(matches!(err, Error::Clock { .. }));
            }
        }
    }
}
