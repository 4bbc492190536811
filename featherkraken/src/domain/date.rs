//! Travel dates and timespans.
//!
//! The search backend exchanges every date as a `DD.MM.YYYY` string. This
//! module keeps dates typed internally and only produces or accepts that
//! exact format at the boundary.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when parsing an invalid travel date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date: {reason}")]
pub struct InvalidDate {
    reason: &'static str,
}

impl InvalidDate {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A calendar date in the `DD.MM.YYYY` wire format.
///
/// # Examples
///
/// ```
/// use featherkraken::domain::TravelDate;
///
/// let date = TravelDate::parse("01.06.2024").unwrap();
/// assert_eq!(date.to_string(), "01.06.2024");
///
/// // Single-digit components and ISO dates are rejected
/// assert!(TravelDate::parse("1.6.2024").is_err());
/// assert!(TravelDate::parse("2024-06-01").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TravelDate(NaiveDate);

impl TravelDate {
    /// Wrap an existing calendar date.
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parse a date from `DD.MM.YYYY`.
    pub fn parse(s: &str) -> Result<Self, InvalidDate> {
        // Must be exactly 10 characters: DD.MM.YYYY
        let bytes = s.as_bytes();
        if bytes.len() != 10 {
            return Err(InvalidDate::new("expected DD.MM.YYYY format"));
        }

        if bytes[2] != b'.' || bytes[5] != b'.' {
            return Err(InvalidDate::new("expected dots at positions 2 and 5"));
        }

        let day = parse_digits(&bytes[0..2]).ok_or_else(|| InvalidDate::new("invalid day digits"))?;
        let month =
            parse_digits(&bytes[3..5]).ok_or_else(|| InvalidDate::new("invalid month digits"))?;
        let year =
            parse_digits(&bytes[6..10]).ok_or_else(|| InvalidDate::new("invalid year digits"))?;

        NaiveDate::from_ymd_opt(year as i32, month, day)
            .map(Self)
            .ok_or_else(|| InvalidDate::new("no such calendar day"))
    }

    /// Returns the underlying calendar date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for TravelDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for TravelDate {
    type Err = InvalidDate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for TravelDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TravelDate({self})")
    }
}

impl fmt::Display for TravelDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}.{:02}.{:04}",
            self.0.day(),
            self.0.month(),
            self.0.year()
        )
    }
}

impl Serialize for TravelDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TravelDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        TravelDate::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Parse a run of ASCII digits into a u32.
fn parse_digits(bytes: &[u8]) -> Option<u32> {
    bytes.iter().try_fold(0u32, |acc, &b| {
        let digit = (b as char).to_digit(10)?;
        Some(acc * 10 + digit)
    })
}

/// A date or date range for one travel leg.
///
/// `to` absent means the single exact date `from`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timespan {
    pub from: TravelDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<TravelDate>,
}

impl Timespan {
    /// A single exact date.
    pub fn exact(from: TravelDate) -> Self {
        Self { from, to: None }
    }

    /// A flexible range. The end may still be unpicked.
    pub fn range(from: TravelDate, to: Option<TravelDate>) -> Self {
        Self { from, to }
    }

    /// Returns true if this span names a single date.
    pub fn is_exact(&self) -> bool {
        self.to.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_valid_dates() {
        assert_eq!(
            TravelDate::parse("10.05.2024").unwrap().date(),
            ymd(2024, 5, 10)
        );
        assert_eq!(
            TravelDate::parse("29.02.2024").unwrap().date(),
            ymd(2024, 2, 29)
        );
        assert_eq!(
            TravelDate::parse("31.12.1999").unwrap().date(),
            ymd(1999, 12, 31)
        );
    }

    #[test]
    fn reject_wrong_shape() {
        assert!(TravelDate::parse("").is_err());
        assert!(TravelDate::parse("1.05.2024").is_err());
        assert!(TravelDate::parse("10/05/2024").is_err());
        assert!(TravelDate::parse("2024-05-10").is_err());
        assert!(TravelDate::parse("10.05.24").is_err());
        assert!(TravelDate::parse("1a.05.2024").is_err());
    }

    #[test]
    fn reject_impossible_days() {
        assert!(TravelDate::parse("30.02.2024").is_err());
        assert!(TravelDate::parse("29.02.2023").is_err());
        assert!(TravelDate::parse("00.01.2024").is_err());
        assert!(TravelDate::parse("01.13.2024").is_err());
    }

    #[test]
    fn display_pads_components() {
        let date = TravelDate::new(ymd(2024, 6, 1));
        assert_eq!(date.to_string(), "01.06.2024");
        assert_eq!(format!("{date:?}"), "TravelDate(01.06.2024)");
    }

    #[test]
    fn ordering_is_chronological() {
        let early = TravelDate::parse("31.12.2023").unwrap();
        let late = TravelDate::parse("01.01.2024").unwrap();
        assert!(early < late);
    }

    #[test]
    fn timespan_json_uses_wire_format() {
        let span = Timespan::exact(TravelDate::parse("01.06.2024").unwrap());
        assert_eq!(
            serde_json::to_string(&span).unwrap(),
            r#"{"from":"01.06.2024"}"#
        );

        let span = Timespan::range(
            TravelDate::parse("01.06.2024").unwrap(),
            Some(TravelDate::parse("05.06.2024").unwrap()),
        );
        assert_eq!(
            serde_json::to_string(&span).unwrap(),
            r#"{"from":"01.06.2024","to":"05.06.2024"}"#
        );
    }

    #[test]
    fn timespan_rejects_iso_dates() {
        let result: Result<Timespan, _> = serde_json::from_str(r#"{"from":"2024-06-01"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn exact_and_range() {
        let from = TravelDate::parse("01.06.2024").unwrap();
        assert!(Timespan::exact(from).is_exact());
        assert!(Timespan::range(from, None).is_exact());
        assert!(!Timespan::range(from, Some(from)).is_exact());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every real calendar day formats and parses back to itself
        #[test]
        fn display_then_parse(days in 0i64..200_000) {
            let date = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap() + chrono::Duration::days(days);
            let travel = TravelDate::new(date);
            prop_assert_eq!(TravelDate::parse(&travel.to_string()).unwrap(), travel);
        }

        /// Strings of the wrong length are always rejected
        #[test]
        fn wrong_length_rejected(s in "[0-9.]{0,9}|[0-9.]{11,14}") {
            prop_assert!(TravelDate::parse(&s).is_err());
        }
    }
}
