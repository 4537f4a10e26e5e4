//! Errors that stop a whole scenario, as opposed to one user's run.

use crate::config::ConfigError;
use crate::probe::ProbeError;
use crate::session::SessionError;
use crate::transport::TransportError;
use crate::trip::TripError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DriverError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The scout user could not pick the shared station pair.
    #[error("Station scouting failed: {0}")]
    Scout(#[from] TripError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Probe(#[from] ProbeError),
}
