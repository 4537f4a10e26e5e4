//! Request transport for the load driver.
//!
//! This module provides the one seam through which every backend call flows.
//!
//! # Main Components
//!
//! - [`Transport`] - Trait that sends one JSON request and returns the parsed body
//! - [`HttpTransport`] - Production transport built on `reqwest`
//! - [`ApiRequest`] - A fully addressed request (address, path, body, bearer token)
//! - [`TransportError`] - Connectivity, status and decoding failures
//!
//! # Testing
//!
//! See [`mock`] module for a scripted transport that records every call.

pub mod core;
pub mod mock;

pub use self::core::*;
