//! Logical service name to `host:port` resolution.
//!
//! The directory is filled once at startup and read-only afterwards. There is no
//! refresh and no health checking; an address is used verbatim for the process
//! lifetime.

use std::collections::HashMap;
use thiserror::Error;

/// Login endpoint host.
pub const UI_DASHBOARD: &str = "ui-dashboard";
pub const TRAVEL_SERVICE: &str = "travel-service";
pub const STATION_SERVICE: &str = "station-service";
pub const CONTACTS_SERVICE: &str = "contacts-service";
pub const ROUTE_SERVICE: &str = "route-service";
pub const ROUTE_PLAN_SERVICE: &str = "route-plan-service";
pub const ORDER_SERVICE: &str = "order-service";
pub const SEAT_SERVICE: &str = "seat-service";
pub const FOOD_SERVICE: &str = "food-service";
pub const FOOD_MAP_SERVICE: &str = "food-map-service";
pub const PRESERVE_SERVICE: &str = "preserve-service";

/// Every service the workflow and the probes talk to.
pub const ALL_SERVICES: [&str; 11] = [
    UI_DASHBOARD,
    TRAVEL_SERVICE,
    STATION_SERVICE,
    CONTACTS_SERVICE,
    ROUTE_SERVICE,
    ROUTE_PLAN_SERVICE,
    ORDER_SERVICE,
    SEAT_SERVICE,
    FOOD_SERVICE,
    FOOD_MAP_SERVICE,
    PRESERVE_SERVICE,
];

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DirectoryError {
    #[error("Unknown service: {0}")]
    UnknownService(String),
}

/// Maps a logical service name to the address it is reachable at.
pub trait ServiceDirectory: Send + Sync {
    fn resolve(&self, service: &str) -> Result<String, DirectoryError>;
}

/// A fixed name-to-address table.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    addresses: HashMap<String, String>,
}

impl StaticDirectory {
    pub fn new(addresses: HashMap<String, String>) -> Self {
        Self { addresses }
    }

    /// Points every known service at the same address. Handy for tests and for
    /// deployments that sit behind a single gateway.
    pub fn uniform(address: impl Into<String>) -> Self {
        let address = address.into();
        let addresses = ALL_SERVICES
            .iter()
            .map(|service| (service.to_string(), address.clone()))
            .collect();
        Self { addresses }
    }

    /// Names from [`ALL_SERVICES`] with no address.
    pub fn missing(&self) -> Vec<&'static str> {
        ALL_SERVICES
            .iter()
            .copied()
            .filter(|service| !self.addresses.contains_key(*service))
            .collect()
    }
}

impl ServiceDirectory for StaticDirectory {
    fn resolve(&self, service: &str) -> Result<String, DirectoryError> {
        self.addresses
            .get(service)
            .cloned()
            .ok_or_else(|| DirectoryError::UnknownService(service.to_string()))
    }
}
