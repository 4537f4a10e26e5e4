//! Error types for order assembly.

use crate::clients::ClientError;
use crate::session::SessionError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The user has no saved contacts, so no well-formed order can be built.
    #[error("User {0} has no contacts")]
    NoContacts(String),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Client(#[from] ClientError),
}
