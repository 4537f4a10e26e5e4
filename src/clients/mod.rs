//! Type-safe wrappers around [`ServiceClient`], one per backend.

pub mod auth_client;
pub mod contact_client;
pub mod error;
pub mod food_client;
pub mod order_client;
pub mod preserve_client;
pub mod route_client;
pub mod seat_client;
pub mod service_client;
pub mod station_client;
pub mod travel_client;

pub use auth_client::*;
pub use contact_client::*;
pub use error::*;
pub use food_client::*;
pub use order_client::*;
pub use preserve_client::*;
pub use route_client::*;
pub use seat_client::*;
pub use service_client::*;
pub use station_client::*;
pub use travel_client::*;

use crate::{
    ServiceDirectory, CONTACTS_SERVICE, FOOD_MAP_SERVICE, FOOD_SERVICE, ORDER_SERVICE,
    PRESERVE_SERVICE, ROUTE_PLAN_SERVICE, ROUTE_SERVICE, SEAT_SERVICE, STATION_SERVICE,
    TRAVEL_SERVICE, UI_DASHBOARD,
};
use crate::transport::Transport;
use std::sync::Arc;

/// Every typed client, wired to one transport and one directory.
///
/// Cloning is cheap; all clients share the same `Arc`s.
#[derive(Clone)]
pub struct Clients {
    pub auth: AuthClient,
    pub travel: TravelClient,
    pub stations: StationClient,
    pub contacts: ContactClient,
    pub routes: RouteClient,
    pub orders: OrderClient,
    pub seats: SeatClient,
    pub food: FoodClient,
    pub preserve: PreserveClient,
}

impl Clients {
    pub fn new(transport: Arc<dyn Transport>, directory: Arc<dyn ServiceDirectory>) -> Self {
        let bind = |service| ServiceClient::new(service, transport.clone(), directory.clone());
        Self {
            auth: AuthClient::new(bind(UI_DASHBOARD)),
            travel: TravelClient::new(bind(TRAVEL_SERVICE)),
            stations: StationClient::new(bind(STATION_SERVICE)),
            contacts: ContactClient::new(bind(CONTACTS_SERVICE)),
            routes: RouteClient::new(
                bind(ROUTE_SERVICE),
                bind(ROUTE_PLAN_SERVICE),
            ),
            orders: OrderClient::new(bind(ORDER_SERVICE)),
            seats: SeatClient::new(bind(SEAT_SERVICE)),
            food: FoodClient::new(
                bind(FOOD_SERVICE),
                bind(FOOD_MAP_SERVICE),
            ),
            preserve: PreserveClient::new(bind(PRESERVE_SERVICE)),
        }
    }
}
