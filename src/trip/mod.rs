//! Trip discovery: where to travel and on which train.
//!
//! - [`pick_stations`] chooses an ordered station pair on one route.
//! - [`TripResolver`] turns a pair and a date into a [`TripCandidate`](crate::model::TripCandidate)
//!   by asking one of two search backends.

pub mod error;
pub mod resolver;
pub mod stations;

pub use error::*;
pub use resolver::*;
pub use stations::*;
