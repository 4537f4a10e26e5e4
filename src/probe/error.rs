//! Error types for the one-shot probes.

use crate::clients::ClientError;
use crate::session::SessionError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProbeError {
    #[error("User {0} has no orders to sample")]
    NoOrders(String),

    #[error("No trips to sample")]
    NoTrips,

    /// Route detail lists fewer than two stations.
    #[error("Route {0} is too short for a segment query")]
    RouteTooShort(String),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Client(#[from] ClientError),
}
