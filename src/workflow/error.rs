//! Error types for the workflow.

use crate::clients::ClientError;
use crate::order::OrderError;
use crate::session::SessionError;
use crate::trip::TripError;
use thiserror::Error;

/// Anything that ends one user's run. Failures stay local to that user.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WorkflowError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Trip(#[from] TripError),

    #[error(transparent)]
    Order(#[from] OrderError),

    /// Submission failed.
    #[error(transparent)]
    Client(#[from] ClientError),
}
