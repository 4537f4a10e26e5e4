//! The virtual-user purchase journey and the driver that interleaves users.
//!
//! - [`Workflow`]: one user's state machine, run to completion or stepped.
//! - [`InterleaveScheduler`]: round-robin driver over [`Steppable`] workflows.
//! - [`ScenarioReport`]: what each user ended up doing.

pub mod engine;
pub mod error;
pub mod report;
pub mod scheduler;

pub use engine::*;
pub use error::*;
pub use report::*;
pub use scheduler::*;
