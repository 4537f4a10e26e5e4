//! # Trip Resolver
//!
//! Two backends expose overlapping trip data under different shapes. A visit
//! uses exactly one of them, chosen by a coin flip:
//!
//! - **Route plan**: one of three planning criteria, answered with
//!   [`RoutePlanEntry`](crate::model::RoutePlanEntry) records.
//! - **Direct search**: the travel service's "left tickets" search, answered with
//!   [`LeftTrip`](crate::model::LeftTrip) records whose id is split into type and number.
//!
//! Whichever shape comes back is normalized into a [`TripCandidate`]. An empty
//! result is `Ok(None)`: a valid outcome the caller answers by searching again.

use crate::clients::{ClientError, RouteClient, TravelClient};
use crate::model::{LeftTripQuery, RoutePlanMode, RoutePlanQuery, StationPair, TravelDate, TripCandidate};
use crate::random::{choose, Dice};
use crate::session::Session;
use crate::trip::TripError;
use tracing::{debug, info, instrument};

/// How one visit looks for a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStrategy {
    RoutePlan(RoutePlanMode),
    DirectSearch,
}

impl SearchStrategy {
    /// Fair coin between the two backends; for route planning, a uniform
    /// choice among the criteria.
    pub fn roll(dice: &mut dyn Dice) -> Self {
        if dice.flip() {
            let mode = RoutePlanMode::ALL[dice.pick(RoutePlanMode::ALL.len())];
            Self::RoutePlan(mode)
        } else {
            Self::DirectSearch
        }
    }
}

#[derive(Clone)]
pub struct TripResolver {
    routes: RouteClient,
    travel: TravelClient,
}

impl TripResolver {
    pub fn new(routes: RouteClient, travel: TravelClient) -> Self {
        Self { routes, travel }
    }

    /// Finds one trip between the pair on `date`, or `None` if the chosen
    /// backend has nothing.
    #[instrument(skip(self, session, dice, pair), fields(start = %pair.start, end = %pair.end))]
    pub async fn resolve_trip(
        &self,
        session: &Session,
        dice: &mut dyn Dice,
        pair: &StationPair,
        date: TravelDate,
    ) -> Result<Option<TripCandidate>, TripError> {
        let strategy = SearchStrategy::roll(dice);
        debug!(?strategy, "Searching");
        self.resolve_with(strategy, session, dice, pair, date).await
    }

    /// Same as [`resolve_trip`](Self::resolve_trip) with the strategy fixed.
    pub async fn resolve_with(
        &self,
        strategy: SearchStrategy,
        session: &Session,
        dice: &mut dyn Dice,
        pair: &StationPair,
        date: TravelDate,
    ) -> Result<Option<TripCandidate>, TripError> {
        let token = session.token()?;

        let candidate = match strategy {
            SearchStrategy::RoutePlan(mode) => {
                let query = RoutePlanQuery {
                    from_station_name: pair.start.clone(),
                    to_station_name: pair.end.clone(),
                    travel_date: date,
                };
                let entries = self.routes.plan(mode, &query, token).await?;
                match choose(dice, &entries) {
                    None => None,
                    Some(entry) => Some(entry.to_candidate().ok_or(ClientError::Incomplete("route plan entry"))?),
                }
            }
            SearchStrategy::DirectSearch => {
                let query = LeftTripQuery {
                    starting_place: pair.start.clone(),
                    end_place: pair.end.clone(),
                    departure_time: date,
                };
                let trips = self.travel.search_left(&query, token).await?;
                match choose(dice, &trips) {
                    None => None,
                    Some(trip) => Some(trip.to_candidate().ok_or(ClientError::Incomplete("trip"))?),
                }
            }
        };

        match &candidate {
            Some(trip) => info!(trip_id = %trip.trip_id(), "Trip found"),
            None => info!(?strategy, "No trip"),
        }
        Ok(candidate)
    }
}
