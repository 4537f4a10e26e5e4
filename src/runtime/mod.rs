//! Runtime orchestration.
//!
//! - [`LoadDriver`] wires transport, directory and clients from a [`Config`](crate::Config)
//!   and runs the scenarios and probes.
//! - [`setup_tracing`] installs the log subscriber.

pub mod driver;
pub mod error;
pub mod tracing;

pub use driver::*;
pub use error::*;
pub use tracing::*;
