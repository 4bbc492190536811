//! Date selection policy.
//!
//! Pure functions that turn picker selections into canonical timespans and
//! keep the return date from preceding the departure date. UI focus
//! bookkeeping stays with the caller; this module only decides values.

use chrono::NaiveDate;

use crate::domain::{InvalidDate, Timespan, TravelDate};

/// Today's date in local time.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse a `DD.MM.YYYY` string, defaulting to `today` when absent.
///
/// Unset fields compare as today so ordering checks are always defined.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use featherkraken::dates::canonical_date;
///
/// let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
/// assert_eq!(canonical_date(None, today).unwrap(), today);
/// assert_eq!(
///     canonical_date(Some("10.05.2024"), today).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
/// );
/// ```
pub fn canonical_date(raw: Option<&str>, today: NaiveDate) -> Result<NaiveDate, InvalidDate> {
    match raw {
        Some(raw) => TravelDate::parse(raw).map(|d| d.date()),
        None => Ok(today),
    }
}

/// Start date of a stored span, defaulting to `today`.
pub fn canonical_start(span: Option<&Timespan>, today: NaiveDate) -> NaiveDate {
    span.map_or(today, |s| s.from.date())
}

/// End date of a stored span, defaulting to `today` when there is no end.
pub fn canonical_end(span: Option<&Timespan>, today: NaiveDate) -> NaiveDate {
    span.and_then(|s| s.to).map_or(today, |d| d.date())
}

/// Collapse the return window onto the departure if it starts earlier.
///
/// Call this when return-date editing begins, not on every edit, so the
/// return field never changes while the user is not looking at it.
///
/// If the departure starts after the return, the result is a copy of the
/// departure (including its end, if any). Otherwise the current return is
/// returned unchanged.
pub fn normalize_return(
    departure: Option<&Timespan>,
    current: Option<&Timespan>,
    today: NaiveDate,
) -> Option<Timespan> {
    let departs = canonical_start(departure, today);
    let returns = canonical_start(current, today);

    if departs > returns {
        departure.cloned()
    } else {
        current.cloned()
    }
}

/// Which picker owns edits for one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateMode {
    /// Single-date picker; selections produce `{from}`.
    #[default]
    Exact,
    /// Range picker; selections produce `{from, to}`.
    Flexible,
}

/// Editor state for one travel direction (departure or return).
///
/// The axis only tracks which picker is active. The stored timespan lives
/// in the request and is never converted when the mode flips, so switching
/// back and forth loses nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateAxis {
    mode: DateMode,
}

impl DateAxis {
    pub fn new(mode: DateMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> DateMode {
        self.mode
    }

    pub fn is_flexible(&self) -> bool {
        self.mode == DateMode::Flexible
    }

    pub fn set_mode(&mut self, mode: DateMode) {
        self.mode = mode;
    }

    /// Flip between exact and flexible.
    pub fn toggle(&mut self) {
        self.mode = match self.mode {
            DateMode::Exact => DateMode::Flexible,
            DateMode::Flexible => DateMode::Exact,
        };
    }

    /// Timespan for a date picked in the single-date picker.
    pub fn select_exact(date: NaiveDate) -> Timespan {
        Timespan::exact(date.into())
    }

    /// Timespan for a range picked in the range picker.
    pub fn select_range(start: NaiveDate, end: Option<NaiveDate>) -> Timespan {
        Timespan::range(start.into(), end.map(TravelDate::from))
    }

    /// Dates the active picker shows for a stored span.
    ///
    /// The exact picker shows only the start; the range picker shows both
    /// ends. Missing dates show as `today`.
    pub fn displayed(
        &self,
        stored: Option<&Timespan>,
        today: NaiveDate,
    ) -> (NaiveDate, Option<NaiveDate>) {
        let start = canonical_start(stored, today);
        match self.mode {
            DateMode::Exact => (start, None),
            DateMode::Flexible => (start, Some(canonical_end(stored, today))),
        }
    }
}
