//! Error types for trip discovery.

use crate::clients::ClientError;
use crate::session::SessionError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TripError {
    /// No route has at least two stations to travel between.
    #[error("No usable routes")]
    NoRoutes,

    /// The chosen route lists the same station at both picked positions.
    #[error("Route {0} yields identical start and end stations")]
    DegenerateRoute(String),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Client(#[from] ClientError),
}
