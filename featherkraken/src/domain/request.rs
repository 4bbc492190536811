//! Flight search request.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Airport, Timespan};

/// Largest result limit the backend accepts.
pub const MAX_LIMIT: u32 = 1000;

/// Step the result-limit input moves in.
pub const LIMIT_STEP: u32 = 25;

/// Largest stop filter the backend understands ("up to 2 stops").
pub const MAX_STOPS: u8 = 2;

/// Result limit of a fresh request.
pub const DEFAULT_LIMIT: u32 = 100;

/// Error returned when a variant name cannot be matched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

/// Lowercase and strip separators so "Round trip", "round-trip" and
/// "ROUND_TRIP" all compare equal.
fn fold(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TripType {
    OneWay,
    #[default]
    RoundTrip,
    MultiCity,
}

impl TripType {
    pub const ALL: [TripType; 3] = [TripType::OneWay, TripType::RoundTrip, TripType::MultiCity];

    /// Label shown in the trip type menu.
    pub fn label(&self) -> &'static str {
        match self {
            TripType::OneWay => "One way",
            TripType::RoundTrip => "Round trip",
            TripType::MultiCity => "Multi city",
        }
    }
}

impl fmt::Display for TripType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TripType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold(s).as_str() {
            "oneway" => Ok(TripType::OneWay),
            "roundtrip" => Ok(TripType::RoundTrip),
            "multicity" => Ok(TripType::MultiCity),
            _ => Err(UnknownVariant {
                kind: "trip type",
                value: s.to_string(),
            }),
        }
    }
}

/// Cabin class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClassType {
    #[default]
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl ClassType {
    pub const ALL: [ClassType; 4] = [
        ClassType::Economy,
        ClassType::PremiumEconomy,
        ClassType::Business,
        ClassType::First,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ClassType::Economy => "Economy",
            ClassType::PremiumEconomy => "Premium economy",
            ClassType::Business => "Business",
            ClassType::First => "First",
        }
    }
}

impl fmt::Display for ClassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ClassType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold(s).as_str() {
            "economy" => Ok(ClassType::Economy),
            "premiumeconomy" => Ok(ClassType::PremiumEconomy),
            "business" => Ok(ClassType::Business),
            "first" => Ok(ClassType::First),
            _ => Err(UnknownVariant {
                kind: "class type",
                value: s.to_string(),
            }),
        }
    }
}

/// Reasons a request is not ready to submit.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestError {
    #[error("at least one passenger is required")]
    NoPassengers,

    #[error("no source airport selected")]
    MissingSource,

    #[error("no target airport selected")]
    MissingTarget,

    #[error("no departure date selected")]
    MissingDeparture,

    #[error("round trip requires a return date")]
    MissingReturn,

    #[error("result limit {0} exceeds 1000")]
    LimitOutOfRange(u32),

    #[error("stop filter {0} exceeds 2")]
    TooManyStops(u8),

    #[error("radius must not be negative (got {0} km)")]
    NegativeRadius(f64),
}

/// A flight search request, as posted to `/flights`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub trip_type: TripType,

    /// `None` when the passenger input has been cleared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passengers: Option<u32>,

    pub class_type: ClassType,

    /// Allow itineraries that mix cabin classes across segments.
    pub mix_classes: bool,

    /// Maximum number of stops; `None` means any.
    pub stops: Option<u8>,

    /// Maximum number of trips to return.
    pub limit: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Airport>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Airport>,

    /// Search radius around the source airport, in kilometres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure: Option<Timespan>,

    #[serde(
        rename = "return",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub return_date: Option<Timespan>,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            trip_type: TripType::default(),
            passengers: Some(1),
            class_type: ClassType::default(),
            mix_classes: true,
            stops: None,
            limit: DEFAULT_LIMIT,
            source: None,
            target: None,
            radius: None,
            departure: None,
            return_date: None,
        }
    }
}

/// One field of a [`SearchRequest`] together with its new value.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestField {
    TripType(TripType),
    Passengers(Option<u32>),
    ClassType(ClassType),
    MixClasses(bool),
    Stops(Option<u8>),
    Limit(u32),
    Source(Option<Airport>),
    Target(Option<Airport>),
    Radius(Option<f64>),
    Departure(Option<Timespan>),
    Return(Option<Timespan>),
}

impl SearchRequest {
    /// Returns a copy of this request with one field replaced.
    ///
    /// Composite values such as timespans are replaced whole, never merged.
    pub fn with(self, field: RequestField) -> Self {
        match field {
            RequestField::TripType(trip_type) => Self { trip_type, ..self },
            RequestField::Passengers(passengers) => Self { passengers, ..self },
            RequestField::ClassType(class_type) => Self { class_type, ..self },
            RequestField::MixClasses(mix_classes) => Self {
                mix_classes,
                ..self
            },
            RequestField::Stops(stops) => Self { stops, ..self },
            RequestField::Limit(limit) => Self { limit, ..self },
            RequestField::Source(source) => Self { source, ..self },
            RequestField::Target(target) => Self { target, ..self },
            RequestField::Radius(radius) => Self { radius, ..self },
            RequestField::Departure(departure) => Self { departure, ..self },
            RequestField::Return(return_date) => Self {
                return_date,
                ..self
            },
        }
    }

    /// Check the request is complete enough to submit.
    pub fn validate(&self) -> Result<(), RequestError> {
        if !self.passengers.is_some_and(|n| n >= 1) {
            return Err(RequestError::NoPassengers);
        }

        if self.source.is_none() {
            return Err(RequestError::MissingSource);
        }

        if self.target.is_none() {
            return Err(RequestError::MissingTarget);
        }

        if self.departure.is_none() {
            return Err(RequestError::MissingDeparture);
        }

        if self.trip_type == TripType::RoundTrip && self.return_date.is_none() {
            return Err(RequestError::MissingReturn);
        }

        if self.limit > MAX_LIMIT {
            return Err(RequestError::LimitOutOfRange(self.limit));
        }

        if let Some(stops) = self.stops
            && stops > MAX_STOPS
        {
            return Err(RequestError::TooManyStops(stops));
        }

        if let Some(radius) = self.radius
            && radius < 0.0
        {
            return Err(RequestError::NegativeRadius(radius));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TravelDate;

    fn span(s: &str) -> Timespan {
        Timespan::exact(TravelDate::parse(s).unwrap())
    }

    fn complete_round_trip() -> SearchRequest {
        SearchRequest::default()
            .with(RequestField::Source(Some(Airport::new("LHR", "London Heathrow"))))
            .with(RequestField::Target(Some(Airport::new("JFK", "New York JFK"))))
            .with(RequestField::Departure(Some(span("01.06.2024"))))
            .with(RequestField::Return(Some(span("08.06.2024"))))
    }

    #[test]
    fn defaults() {
        let request = SearchRequest::default();
        assert_eq!(request.trip_type, TripType::RoundTrip);
        assert_eq!(request.passengers, Some(1));
        assert_eq!(request.class_type, ClassType::Economy);
        assert!(request.mix_classes);
        assert_eq!(request.stops, None);
        assert_eq!(request.limit, DEFAULT_LIMIT);
        assert!(request.source.is_none());
        assert!(request.departure.is_none());
    }

    #[test]
    fn with_replaces_only_the_named_field() {
        let before = complete_round_trip();
        let after = before.clone().with(RequestField::Limit(250));
        assert_eq!(after.limit, 250);
        assert_eq!(after.source, before.source);
        assert_eq!(after.departure, before.departure);
    }

    #[test]
    fn with_replaces_timespans_whole() {
        let ranged = Timespan::range(
            TravelDate::parse("01.06.2024").unwrap(),
            Some(TravelDate::parse("04.06.2024").unwrap()),
        );
        let request = SearchRequest::default()
            .with(RequestField::Departure(Some(ranged)))
            .with(RequestField::Departure(Some(span("02.06.2024"))));
        assert_eq!(request.departure, Some(span("02.06.2024")));
    }

    #[test]
    fn json_shape() {
        let json = serde_json::to_value(complete_round_trip()).unwrap();
        assert_eq!(json["tripType"], "ROUND_TRIP");
        assert_eq!(json["classType"], "ECONOMY");
        assert_eq!(json["passengers"], 1);
        assert_eq!(json["mixClasses"], true);
        assert!(json["stops"].is_null());
        assert_eq!(json["limit"], 100);
        assert_eq!(json["source"]["name"], "LHR");
        assert_eq!(json["source"]["displayName"], "London Heathrow");
        assert_eq!(json["departure"]["from"], "01.06.2024");
        assert_eq!(json["return"]["from"], "08.06.2024");
        assert!(json.get("radius").is_none());
    }

    #[test]
    fn stops_serialize_as_number() {
        let request = SearchRequest::default().with(RequestField::Stops(Some(0)));
        let json = serde_json::to_value(request).unwrap();
        assert_eq!(json["stops"], 0);
    }

    #[test]
    fn validate_complete_request() {
        assert_eq!(complete_round_trip().validate(), Ok(()));
    }

    #[test]
    fn validate_requires_return_only_for_round_trips() {
        let request = complete_round_trip().with(RequestField::Return(None));
        assert_eq!(request.validate(), Err(RequestError::MissingReturn));

        let request = request.with(RequestField::TripType(TripType::OneWay));
        assert_eq!(request.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        let base = complete_round_trip();

        let request = base.clone().with(RequestField::Passengers(Some(0)));
        assert_eq!(request.validate(), Err(RequestError::NoPassengers));

        let request = base.clone().with(RequestField::Passengers(None));
        assert_eq!(request.validate(), Err(RequestError::NoPassengers));

        let request = base.clone().with(RequestField::Limit(1025));
        assert_eq!(request.validate(), Err(RequestError::LimitOutOfRange(1025)));

        let request = base.clone().with(RequestField::Stops(Some(3)));
        assert_eq!(request.validate(), Err(RequestError::TooManyStops(3)));

        let request = base.with(RequestField::Radius(Some(-1.0)));
        assert_eq!(request.validate(), Err(RequestError::NegativeRadius(-1.0)));
    }

    #[test]
    fn validate_requires_airports_and_departure() {
        let request = complete_round_trip().with(RequestField::Source(None));
        assert_eq!(request.validate(), Err(RequestError::MissingSource));

        let request = complete_round_trip().with(RequestField::Target(None));
        assert_eq!(request.validate(), Err(RequestError::MissingTarget));

        let request = complete_round_trip().with(RequestField::Departure(None));
        assert_eq!(request.validate(), Err(RequestError::MissingDeparture));
    }

    #[test]
    fn parse_variant_names() {
        assert_eq!("Round trip".parse::<TripType>(), Ok(TripType::RoundTrip));
        assert_eq!("one-way".parse::<TripType>(), Ok(TripType::OneWay));
        assert_eq!("MULTI_CITY".parse::<TripType>(), Ok(TripType::MultiCity));
        assert!("return".parse::<TripType>().is_err());

        assert_eq!(
            "premium economy".parse::<ClassType>(),
            Ok(ClassType::PremiumEconomy)
        );
        assert_eq!("FIRST".parse::<ClassType>(), Ok(ClassType::First));
        assert!("coach".parse::<ClassType>().is_err());
    }
}
