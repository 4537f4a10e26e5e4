//! # Probes
//!
//! Single read-only requests against the order, seat, travel and food-map
//! services. They sit beside the purchase workflow, not on it: each one logs
//! what came back and returns the raw `data` payload.
//!
//! | Kind           | Request                                              |
//! |----------------|------------------------------------------------------|
//! | `query-orders` | order query by travel date, state or bought date     |
//! | `sold-tickets` | sold tickets for a random existing order's train     |
//! | `already-sold` | already-sold orders for a random existing order      |
//! | `left-tickets` | seats left on a random segment of a random trip      |
//! | `food-map`     | train foods and food stores                          |
//! | `all-trips`    | every scheduled trip                                 |
//! | `all-stations` | every station name                                   |

pub mod error;

pub use error::*;

use crate::clients::Clients;
use crate::model::{
    LeftTicketQuery, OrderFilter, OrderQuery, SeatType, TicketQuery, TravelDate,
};
use crate::random::{choose, Dice};
use crate::session::Session;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde_json::{json, Value};
use std::fmt;
use tracing::{info, instrument};

/// Milliseconds per "day" in order-query ranges. Slightly short of a real day.
const QUERY_RANGE_UNIT_MS: i64 = 84_000 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProbeKind {
    QueryOrders,
    SoldTickets,
    AlreadySold,
    LeftTickets,
    FoodMap,
    AllTrips,
    AllStations,
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::QueryOrders => "query-orders",
            Self::SoldTickets => "sold-tickets",
            Self::AlreadySold => "already-sold",
            Self::LeftTickets => "left-tickets",
            Self::FoodMap => "food-map",
            Self::AllTrips => "all-trips",
            Self::AllStations => "all-stations",
        };
        f.write_str(name)
    }
}

/// Builds an order query with one of the three filters, chosen uniformly.
///
/// Date ranges start at a random travel date and span 10 to 100 range units.
pub fn random_order_query(
    account_id: &str,
    dice: &mut dyn Dice,
    now: DateTime<Utc>,
    window_days: u32,
) -> OrderQuery {
    let range = |dice: &mut dyn Dice| {
        let start = TravelDate::random_within(dice, now, window_days);
        let units = 10 + dice.below(91) as i64;
        (start, start.plus_millis(QUERY_RANGE_UNIT_MS * units))
    };

    let filter = match dice.pick(3) {
        0 => {
            let (start, end) = range(dice);
            OrderFilter::TravelDate {
                enable_travel_date_query: true,
                travel_date_start: start,
                travel_date_end: end,
            }
        }
        1 => OrderFilter::State {
            enable_state_query: true,
            state: if dice.flip() { 0 } else { 1 },
        },
        _ => {
            let (start, end) = range(dice);
            OrderFilter::BoughtDate {
                enable_bought_date_query: true,
                bought_date_start: start,
                bought_date_end: end,
            }
        }
    };

    OrderQuery {
        login_id: account_id.to_string(),
        filter,
    }
}

/// Runs probes for one logged-in session.
#[derive(Clone)]
pub struct Prober {
    clients: Clients,
    travel_window_days: u32,
}

impl Prober {
    pub fn new(clients: Clients, travel_window_days: u32) -> Self {
        Self {
            clients,
            travel_window_days,
        }
    }

    #[instrument(skip(self, session, dice), fields(username = %session.username()))]
    pub async fn run(
        &self,
        kind: ProbeKind,
        session: &Session,
        dice: &mut dyn Dice,
    ) -> Result<Value, ProbeError> {
        let data = match kind {
            ProbeKind::QueryOrders => self.query_orders(session, dice).await?,
            ProbeKind::SoldTickets => self.sold_tickets(session, dice).await?,
            ProbeKind::AlreadySold => self.already_sold(session, dice).await?,
            ProbeKind::LeftTickets => self.left_tickets(session, dice).await?,
            ProbeKind::FoodMap => self.food_map(session).await?,
            ProbeKind::AllTrips => self.all_trips(session).await?,
            ProbeKind::AllStations => self.all_stations(session).await?,
        };
        info!(%kind, %data, "Probe answered");
        Ok(data)
    }

    pub async fn query_orders(&self, session: &Session, dice: &mut dyn Dice) -> Result<Value, ProbeError> {
        let query = random_order_query(session.account_id()?, dice, Utc::now(), self.travel_window_days);
        Ok(self.clients.orders.query(&query, session.token()?).await?)
    }

    pub async fn sold_tickets(&self, session: &Session, dice: &mut dyn Dice) -> Result<Value, ProbeError> {
        let query = self.sample_order(session, dice).await?;
        Ok(self.clients.orders.sold_tickets(&query, session.token()?).await?)
    }

    pub async fn already_sold(&self, session: &Session, dice: &mut dyn Dice) -> Result<Value, ProbeError> {
        let query = self.sample_order(session, dice).await?;
        Ok(self.clients.orders.already_sold(&query, session.token()?).await?)
    }

    /// Seats left between two ordered stations of a random trip's route.
    pub async fn left_tickets(&self, session: &Session, dice: &mut dyn Dice) -> Result<Value, ProbeError> {
        let token = session.token()?;
        let date = TravelDate::random_within(dice, Utc::now(), self.travel_window_days);
        let trips = self.clients.travel.all_trips(token).await?;
        let trip = choose(dice, &trips).ok_or(ProbeError::NoTrips)?;

        let route = self.clients.routes.route(&trip.route_id, token).await?;
        if route.stations.len() < 2 {
            return Err(ProbeError::RouteTooShort(route.id));
        }
        let (first, second) = dice.pick_two(route.stations.len());

        let query = LeftTicketQuery {
            travel_date: date,
            train_number: trip.trip_id.to_string(),
            start_station: route.stations[first].clone(),
            dest_station: route.stations[second].clone(),
            seat_type: SeatType::from_index(dice.pick(SeatType::COUNT)),
        };
        Ok(self.clients.seats.left_tickets(&query, token).await?)
    }

    pub async fn food_map(&self, session: &Session) -> Result<Value, ProbeError> {
        let token = session.token()?;
        let train_foods = self.clients.food.train_foods(token).await?;
        let food_stores = self.clients.food.food_stores(token).await?;
        Ok(json!({ "trainFoods": train_foods, "foodStores": food_stores }))
    }

    pub async fn all_trips(&self, session: &Session) -> Result<Value, ProbeError> {
        let trips = self.clients.travel.all_trips(session.token()?).await?;
        Ok(Value::from(trips.len()))
    }

    pub async fn all_stations(&self, session: &Session) -> Result<Value, ProbeError> {
        let stations = self.clients.stations.all_stations(session.token()?).await?;
        let names: Vec<_> = stations.into_iter().map(|station| station.name).collect();
        Ok(Value::from(names))
    }

    async fn sample_order(&self, session: &Session, dice: &mut dyn Dice) -> Result<TicketQuery, ProbeError> {
        let orders = self.clients.orders.all_orders(session.token()?).await?;
        let order = choose(dice, &orders)
            .ok_or_else(|| ProbeError::NoOrders(session.username().to_string()))?;
        Ok(TicketQuery {
            travel_date: order.travel_date.clone(),
            train_number: order.train_number.clone(),
        })
    }
}
