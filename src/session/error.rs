//! Error types for the session.

use crate::clients::ClientError;
use thiserror::Error;

/// Errors that can occur while authenticating or using a session.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    /// The backend answered but refused the credentials.
    #[error("Login rejected for {username}: {msg}")]
    LoginRejected { username: String, msg: String },

    /// A token was needed before login completed.
    #[error("Session for {0} is not authenticated")]
    NotAuthenticated(String),

    /// An error occurred while talking to the auth service.
    #[error(transparent)]
    Client(#[from] ClientError),
}
