//! Featherkraken command line client.
//!
//! Runs one flight search against the configured backend and prints the
//! trips that survive the requested airline and airport exclusions.

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use featherkraken::api::{ApiConfig, FlightApi, FlightClient};
use featherkraken::cache::{AirportCacheConfig, CachedFlightClient};
use featherkraken::dates::{self, DateMode};
use featherkraken::domain::{Airport, ClassType, RequestField, TravelDate, TripType};
use featherkraken::labels;
use featherkraken::session::{MIN_QUERY_CHARS, SearchSession, SessionError};

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "featherkraken")]
#[command(about = "Search flights and filter the results by airline and airport")]
#[command(version)]
struct Args {
    /// Origin airport code or name
    #[arg(long, value_name = "AIRPORT")]
    from: String,

    /// Destination airport code or name
    #[arg(long, value_name = "AIRPORT")]
    to: String,

    /// Departure date (DD.MM.YYYY)
    #[arg(long, value_name = "DATE")]
    departure: TravelDate,

    /// Last acceptable departure date, for a flexible departure
    #[arg(long, value_name = "DATE")]
    departure_until: Option<TravelDate>,

    /// Return date (DD.MM.YYYY)
    #[arg(long = "return", value_name = "DATE")]
    return_date: Option<TravelDate>,

    /// Last acceptable return date, for a flexible return
    #[arg(long, value_name = "DATE")]
    return_until: Option<TravelDate>,

    /// one-way, round-trip or multi-city (defaults to round-trip with a return date)
    #[arg(long)]
    trip_type: Option<TripType>,

    #[arg(long, default_value_t = 1)]
    passengers: u32,

    /// economy, premium-economy, business or first
    #[arg(long = "class", default_value_t = ClassType::Economy)]
    class_type: ClassType,

    /// Maximum number of stops (any if omitted)
    #[arg(long)]
    stops: Option<u8>,

    /// Maximum number of results
    #[arg(long, default_value_t = featherkraken::domain::DEFAULT_LIMIT)]
    limit: u32,

    /// Search radius around the origin in kilometres
    #[arg(long, value_name = "KM")]
    radius: Option<f64>,

    /// Only offer trips in a single cabin class
    #[arg(long)]
    no_mix_classes: bool,

    /// Hide trips operated by this airline (repeatable)
    #[arg(long, value_name = "CODE")]
    exclude_airline: Vec<String>,

    /// Hide trips starting from or returning to this airport (repeatable)
    #[arg(long, value_name = "NAME")]
    exclude_airport: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ApiConfig::from_env()?;
    info!(base_url = %config.base_url, "using search backend");
    let client = CachedFlightClient::new(FlightClient::new(&config)?, &AirportCacheConfig::default());

    let mut session = SearchSession::new();
    let source = resolve_airport(&mut session, &client, &args.from).await?;
    let target = resolve_airport(&mut session, &client, &args.to).await?;
    info!(source = %source, target = %target, "resolved airports");

    let trip_type = args.trip_type.unwrap_or(if args.return_date.is_some() {
        TripType::RoundTrip
    } else {
        TripType::OneWay
    });

    let builder = session.builder_mut();
    builder.set(RequestField::TripType(trip_type));
    builder.set(RequestField::Source(Some(source)));
    builder.set(RequestField::Target(Some(target)));
    builder.set(RequestField::Passengers(Some(args.passengers)));
    builder.set(RequestField::ClassType(args.class_type));
    builder.set(RequestField::MixClasses(!args.no_mix_classes));
    builder.set(RequestField::Stops(args.stops));
    builder.set(RequestField::Limit(args.limit));
    builder.set(RequestField::Radius(args.radius));

    if args.departure_until.is_some() {
        builder.set_departure_mode(DateMode::Flexible);
    }
    builder.pick_departure(
        args.departure.date(),
        args.departure_until.map(|d| d.date()),
    );

    if let Some(return_date) = args.return_date {
        if args.return_until.is_some() {
            builder.set_return_mode(DateMode::Flexible);
        }
        builder.pick_return(return_date.date(), args.return_until.map(|d| d.date()));
        if builder.begin_return_edit(dates::today()) {
            warn!("return date preceded departure; using the departure date");
        }
    }

    info!(
        passengers = %labels::passenger_title(Some(args.passengers)),
        limit = %labels::limit_title(args.limit),
        "submitting search"
    );
    session.submit(&client).await?;

    for code in &args.exclude_airline {
        if !session.toggle_airline_facet(code, false) {
            warn!(code, "airline not in result");
        }
    }
    for name in &args.exclude_airport {
        if !session.toggle_airport_facet(name, false) {
            warn!(name, "airport not in result");
        }
    }

    let total = session.result().map_or(0, |r| r.trips.len());
    let visible = session.filtered_trips();
    println!("{} of {} trips", visible.len(), total);
    for trip in visible {
        println!("{}", labels::trip_summary(trip));
    }

    Ok(())
}

/// Look up an airport and take the best match.
///
/// Prefers an exact code match, then the first option. Falls back to a bare
/// code airport when the query is too short to look up or finds nothing.
async fn resolve_airport<A: FlightApi>(
    session: &mut SearchSession,
    api: &A,
    query: &str,
) -> Result<Airport, SessionError> {
    let query = query.trim();
    if query.chars().count() < MIN_QUERY_CHARS {
        return Ok(Airport::from_code(query.to_uppercase()));
    }

    let options = session.lookup_airports(api, query).await?;
    let found = options
        .iter()
        .find(|a| a.name.eq_ignore_ascii_case(query))
        .or_else(|| options.first())
        .cloned();

    Ok(found.unwrap_or_else(|| Airport::from_code(query.to_uppercase())))
}
