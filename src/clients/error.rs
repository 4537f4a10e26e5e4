//! Error types for the service clients.

use crate::directory::DirectoryError;
use crate::transport::TransportError;
use thiserror::Error;

/// Errors that can occur while calling a backend service.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClientError {
    /// The service name has no address.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// The call never produced a JSON body.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The envelope had no usable `data` field.
    #[error("{service} {path}: response has no data ({msg})")]
    MissingData {
        service: String,
        path: String,
        msg: String,
    },

    /// The envelope or its `data` did not have the expected shape.
    #[error("{service} {path}: unexpected response shape: {message}")]
    Decode {
        service: String,
        path: String,
        message: String,
    },

    /// The request body could not be encoded.
    #[error("Request encoding error: {0}")]
    Encode(String),

    /// A record came back with a blank mandatory field.
    #[error("Incomplete {0} in response")]
    Incomplete(&'static str),
}
