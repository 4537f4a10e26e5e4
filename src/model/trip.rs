use crate::model::TravelDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered origin/destination pair on a single route.
///
/// Built by [`pick_stations`](crate::trip::pick_stations), which guarantees the
/// two names differ, share a route, and `start` precedes `end` in travel order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationPair {
    pub start: String,
    pub end: String,
}

impl StationPair {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// A route as listed by the route service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    #[serde(default)]
    pub id: String,
    pub stations: Vec<String>,
    #[serde(default)]
    pub distances: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub stay_time: i64,
}

/// Two-part train designator, e.g. `{type: "G", number: "1234"}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TripId {
    #[serde(rename = "type")]
    pub kind: String,
    pub number: String,
}

impl fmt::Display for TripId {
    /// The joined key the rest of the system uses, e.g. `G1234`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind, self.number)
    }
}

/// A scheduled trip as listed by `GET /travelservice/trips`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub trip_id: TripId,
    pub route_id: String,
    #[serde(default)]
    pub train_type_id: String,
}

/// One hit of the direct "left tickets" trip search.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeftTrip {
    pub trip_id: TripId,
    pub starting_station: String,
    pub terminal_station: String,
}

/// One hit of the route-planning search.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePlanEntry {
    pub trip_id: String,
    pub from_station_name: String,
    pub to_station_name: String,
}

/// Planning criterion accepted by the route-plan service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePlanMode {
    Cheapest,
    Quickest,
    MinStops,
}

impl RoutePlanMode {
    pub const ALL: [RoutePlanMode; 3] = [Self::Cheapest, Self::Quickest, Self::MinStops];

    /// Path segment under `/routeplanservice/routePlan/`.
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Cheapest => "cheapestRoute",
            Self::Quickest => "quickestRoute",
            Self::MinStops => "minStopStations",
        }
    }
}

/// Body of a route-plan search.
///
/// The backend spells the origin field `formStationName`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePlanQuery {
    #[serde(rename = "formStationName")]
    pub from_station_name: String,
    pub to_station_name: String,
    pub travel_date: TravelDate,
}

/// Body of the direct trip search.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeftTripQuery {
    pub starting_place: String,
    pub end_place: String,
    pub departure_time: TravelDate,
}

/// Normalized, minimal trip descriptor sufficient to place an order.
///
/// All three fields are non-empty; use [`TripCandidate::try_new`] to build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripCandidate {
    trip_id: String,
    starting_station: String,
    terminal_station: String,
}

impl TripCandidate {
    /// Returns `None` if any field is blank.
    pub fn try_new(
        trip_id: impl Into<String>,
        starting_station: impl Into<String>,
        terminal_station: impl Into<String>,
    ) -> Option<Self> {
        let candidate = Self {
            trip_id: trip_id.into(),
            starting_station: starting_station.into(),
            terminal_station: terminal_station.into(),
        };
        let complete = !candidate.trip_id.trim().is_empty()
            && !candidate.starting_station.trim().is_empty()
            && !candidate.terminal_station.trim().is_empty();
        complete.then_some(candidate)
    }

    pub fn trip_id(&self) -> &str {
        &self.trip_id
    }

    pub fn starting_station(&self) -> &str {
        &self.starting_station
    }

    pub fn terminal_station(&self) -> &str {
        &self.terminal_station
    }
}

impl RoutePlanEntry {
    pub fn to_candidate(&self) -> Option<TripCandidate> {
        TripCandidate::try_new(
            self.trip_id.clone(),
            self.from_station_name.clone(),
            self.to_station_name.clone(),
        )
    }
}

impl LeftTrip {
    pub fn to_candidate(&self) -> Option<TripCandidate> {
        TripCandidate::try_new(
            self.trip_id.to_string(),
            self.starting_station.clone(),
            self.terminal_station.clone(),
        )
    }
}
