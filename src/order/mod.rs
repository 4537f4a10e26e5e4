//! Order assembly: contact, optional food, seat, and the final payload.

pub mod assembler;
pub mod error;

pub use assembler::*;
pub use error::*;
