//! Pure data structures exchanged with the backends.
//!
//! Upstream shapes (what the services return) live next to the normalized
//! shapes the workflow consumes ([`TripCandidate`], [`FoodSelection`],
//! [`OrderRequest`]).

pub mod date;
pub mod food;
pub mod order;
pub mod trip;
pub mod user;

pub use date::*;
pub use food::*;
pub use order::*;
pub use trip::*;
pub use user::*;
