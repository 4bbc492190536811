//! In-progress search request.
//!
//! The builder owns the request being edited in the search form. Every edit
//! produces a new request value, so a snapshot taken for submission is never
//! changed by later edits.

use chrono::NaiveDate;
use tracing::debug;

use crate::dates::{DateAxis, DateMode, normalize_return};
use crate::domain::{RequestField, SearchRequest, UnknownVariant};

/// Error from a by-name field assignment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The name is not a text-editable request field
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// A numeric field got text that is not a number
    #[error("invalid number for {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    /// A boolean field got something other than true/false
    #[error("invalid flag for {field}: {value:?}")]
    InvalidFlag { field: &'static str, value: String },

    /// An enum field got an unknown variant name
    #[error(transparent)]
    InvalidVariant(#[from] UnknownVariant),
}

/// Holds and edits the search request for one session.
#[derive(Debug, Clone, Default)]
pub struct SearchRequestBuilder {
    request: SearchRequest,
    departure_axis: DateAxis,
    return_axis: DateAxis,
}

impl SearchRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing request.
    pub fn from_request(request: SearchRequest) -> Self {
        Self {
            request,
            ..Self::default()
        }
    }

    /// The current request.
    pub fn request(&self) -> &SearchRequest {
        &self.request
    }

    /// An owned copy of the current request, for submission.
    pub fn snapshot(&self) -> SearchRequest {
        self.request.clone()
    }

    /// Replace one field of the request.
    ///
    /// Values are not range-checked here; completeness and ranges are
    /// checked when the request is submitted.
    pub fn set(&mut self, field: RequestField) {
        let current = std::mem::take(&mut self.request);
        self.request = current.with(field);
    }

    /// Assign a field from form text.
    ///
    /// Names are the request's wire names (`passengers`, `limit`, ...).
    /// An empty `passengers` or `radius` clears the field, and an empty or
    /// `any` value for `stops` means no stop limit.
    pub fn set_by_name(&mut self, name: &str, raw: &str) -> Result<(), FieldError> {
        let raw = raw.trim();
        let field = match name {
            "tripType" => RequestField::TripType(raw.parse()?),
            "classType" => RequestField::ClassType(raw.parse()?),
            "passengers" => RequestField::Passengers(parse_optional(raw, "passengers")?),
            "limit" => RequestField::Limit(parse_number(raw, "limit")?),
            "radius" => {
                let radius: Option<f64> = parse_optional(raw, "radius")?;
                if radius.is_some_and(|r| !r.is_finite()) {
                    return Err(FieldError::InvalidNumber {
                        field: "radius",
                        value: raw.to_string(),
                    });
                }
                RequestField::Radius(radius)
            }
            "stops" => {
                if raw.eq_ignore_ascii_case("any") || raw.eq_ignore_ascii_case("null") {
                    RequestField::Stops(None)
                } else {
                    RequestField::Stops(parse_optional(raw, "stops")?)
                }
            }
            "mixClasses" => RequestField::MixClasses(parse_flag(raw, "mixClasses")?),
            other => return Err(FieldError::UnknownField(other.to_string())),
        };

        self.set(field);
        Ok(())
    }

    pub fn departure_axis(&self) -> DateAxis {
        self.departure_axis
    }

    pub fn return_axis(&self) -> DateAxis {
        self.return_axis
    }

    /// Switch the departure picker. The stored departure is kept as is.
    pub fn set_departure_mode(&mut self, mode: DateMode) {
        self.departure_axis.set_mode(mode);
    }

    /// Switch the return picker. The stored return is kept as is.
    pub fn set_return_mode(&mut self, mode: DateMode) {
        self.return_axis.set_mode(mode);
    }

    /// Record a departure pick from whichever picker is active.
    ///
    /// The exact picker ignores `end`.
    pub fn pick_departure(&mut self, start: NaiveDate, end: Option<NaiveDate>) {
        let span = pick(self.departure_axis, start, end);
        self.set(RequestField::Departure(Some(span)));
    }

    /// Record a return pick from whichever picker is active.
    pub fn pick_return(&mut self, start: NaiveDate, end: Option<NaiveDate>) {
        let span = pick(self.return_axis, start, end);
        self.set(RequestField::Return(Some(span)));
    }

    /// Apply the return-date rule as return editing begins.
    ///
    /// Returns true if the return was changed.
    pub fn begin_return_edit(&mut self, today: NaiveDate) -> bool {
        let normalized = normalize_return(
            self.request.departure.as_ref(),
            self.request.return_date.as_ref(),
            today,
        );

        if normalized == self.request.return_date {
            return false;
        }

        debug!(
            departure = ?self.request.departure,
            previous = ?self.request.return_date,
            "collapsing return onto departure"
        );
        self.set(RequestField::Return(normalized));
        true
    }
}

fn pick(axis: DateAxis, start: NaiveDate, end: Option<NaiveDate>) -> crate::domain::Timespan {
    match axis.mode() {
        DateMode::Exact => DateAxis::select_exact(start),
        DateMode::Flexible => DateAxis::select_range(start, end),
    }
}

fn parse_number<T: std::str::FromStr>(raw: &str, field: &'static str) -> Result<T, FieldError> {
    raw.parse().map_err(|_| FieldError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

/// Like `parse_number`, but empty text means "unset".
fn parse_optional<T: std::str::FromStr>(
    raw: &str,
    field: &'static str,
) -> Result<Option<T>, FieldError> {
    if raw.is_empty() {
        return Ok(None);
    }
    parse_number(raw, field).map(Some)
}

fn parse_flag(raw: &str, field: &'static str) -> Result<bool, FieldError> {
    match raw {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(FieldError::InvalidFlag {
            field,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Airport, ClassType, Timespan, TravelDate, TripType};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn span(s: &str) -> Timespan {
        Timespan::exact(TravelDate::parse(s).unwrap())
    }

    #[test]
    fn set_replaces_field() {
        let mut builder = SearchRequestBuilder::new();
        builder.set(RequestField::Source(Some(Airport::new("LHR", "London"))));
        builder.set(RequestField::Source(Some(Airport::new("LGW", "Gatwick"))));
        assert_eq!(builder.request().source.as_ref().unwrap().name, "LGW");
    }

    #[test]
    fn snapshot_is_not_aliased_by_later_edits() {
        let mut builder = SearchRequestBuilder::new();
        builder.set(RequestField::Limit(50));
        let snapshot = builder.snapshot();
        builder.set(RequestField::Limit(75));
        assert_eq!(snapshot.limit, 50);
        assert_eq!(builder.request().limit, 75);
    }

    #[test]
    fn set_by_name_coerces_text() {
        let mut builder = SearchRequestBuilder::new();
        builder.set_by_name("passengers", "3").unwrap();
        builder.set_by_name("limit", "250").unwrap();
        builder.set_by_name("radius", "150.5").unwrap();
        builder.set_by_name("stops", "1").unwrap();
        builder.set_by_name("tripType", "One way").unwrap();
        builder.set_by_name("classType", "BUSINESS").unwrap();
        builder.set_by_name("mixClasses", "false").unwrap();

        let request = builder.request();
        assert_eq!(request.passengers, Some(3));
        assert_eq!(request.limit, 250);
        assert_eq!(request.radius, Some(150.5));
        assert_eq!(request.stops, Some(1));
        assert_eq!(request.trip_type, TripType::OneWay);
        assert_eq!(request.class_type, ClassType::Business);
        assert!(!request.mix_classes);
    }

    #[test]
    fn set_by_name_does_not_clamp() {
        let mut builder = SearchRequestBuilder::new();
        builder.set_by_name("passengers", "0").unwrap();
        builder.set_by_name("limit", "5000").unwrap();
        assert_eq!(builder.request().passengers, Some(0));
        assert_eq!(builder.request().limit, 5000);
    }

    #[test]
    fn empty_text_clears_optional_fields() {
        let mut builder = SearchRequestBuilder::new();
        builder.set_by_name("radius", "100").unwrap();
        builder.set_by_name("stops", "2").unwrap();

        builder.set_by_name("passengers", "").unwrap();
        builder.set_by_name("radius", " ").unwrap();
        builder.set_by_name("stops", "any").unwrap();

        assert_eq!(builder.request().passengers, None);
        assert_eq!(builder.request().radius, None);
        assert_eq!(builder.request().stops, None);
    }

    #[test]
    fn set_by_name_errors() {
        let mut builder = SearchRequestBuilder::new();
        assert_eq!(
            builder.set_by_name("color", "red"),
            Err(FieldError::UnknownField("color".to_string()))
        );
        assert!(matches!(
            builder.set_by_name("passengers", "two"),
            Err(FieldError::InvalidNumber { field: "passengers", .. })
        ));
        assert!(matches!(
            builder.set_by_name("radius", "inf"),
            Err(FieldError::InvalidNumber { field: "radius", .. })
        ));
        assert!(matches!(
            builder.set_by_name("mixClasses", "yes"),
            Err(FieldError::InvalidFlag { .. })
        ));
        assert!(matches!(
            builder.set_by_name("classType", "coach"),
            Err(FieldError::InvalidVariant(_))
        ));

        // Failed edits leave the request untouched
        assert_eq!(builder.request(), &SearchRequest::default());
    }

    #[test]
    fn pick_follows_active_editor() {
        let mut builder = SearchRequestBuilder::new();
        builder.pick_departure(ymd(2024, 6, 1), Some(ymd(2024, 6, 3)));
        assert_eq!(builder.request().departure, Some(span("01.06.2024")));

        builder.set_departure_mode(DateMode::Flexible);
        builder.pick_departure(ymd(2024, 6, 1), Some(ymd(2024, 6, 3)));
        let departure = builder.request().departure.clone().unwrap();
        assert_eq!(departure.to.unwrap().to_string(), "03.06.2024");
    }

    #[test]
    fn mode_switch_keeps_stored_value() {
        let mut builder = SearchRequestBuilder::new();
        builder.set_return_mode(DateMode::Flexible);
        builder.pick_return(ymd(2024, 6, 8), Some(ymd(2024, 6, 10)));
        let stored = builder.request().return_date.clone();

        builder.set_return_mode(DateMode::Exact);
        builder.set_return_mode(DateMode::Flexible);
        assert_eq!(builder.request().return_date, stored);
    }

    #[test]
    fn return_focus_collapses_earlier_return() {
        // LHR -> JFK, departing 01.06.2024 with a return on 30.05.2024
        let mut builder = SearchRequestBuilder::new();
        builder.set(RequestField::TripType(TripType::RoundTrip));
        builder.set(RequestField::Source(Some(Airport::from_code("LHR"))));
        builder.set(RequestField::Target(Some(Airport::from_code("JFK"))));
        builder.set(RequestField::Departure(Some(span("01.06.2024"))));
        builder.set(RequestField::Return(Some(span("30.05.2024"))));

        assert!(builder.begin_return_edit(ymd(2024, 1, 1)));
        assert_eq!(builder.request().return_date, Some(span("01.06.2024")));

        // Already consistent: a second focus changes nothing
        assert!(!builder.begin_return_edit(ymd(2024, 1, 1)));
    }
}
