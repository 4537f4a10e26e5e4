//! # Ticket Load Generator
//!
//! > **Virtual users buying train tickets, one request at a time.**
//!
//! This crate drives a train-ticket booking backend the way a crowd of users
//! would: log in, find a trip, pick a contact, food and a seat, then place the
//! order. Every decision is random, so repeated runs touch different routes,
//! trips and menus.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### One thread of control
//! Nothing is spawned. Each network call is awaited before the next one starts,
//! and "concurrency" between users is cooperative: a workflow suspends itself
//! right before each submission and the [`InterleaveScheduler`](workflow::InterleaveScheduler)
//! decides who goes next. The order of requests on the wire is the order in
//! which the scheduler resumes workflows.
//!
//! ### Failures stay with their user
//! A user whose login, search or submission fails is recorded in the
//! [`ScenarioReport`](workflow::ScenarioReport). The other users keep going.
//!
//! ### Randomness is injected
//! Every random choice goes through [`Dice`](random::Dice). Production runs use a
//! seedable `StdRng`; tests script the answers and force each branch.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Wire ([`transport`], [`directory`])
//! - **Role**: Sends one JSON request to one `host:port` and hands back the JSON
//!   body. Service names resolve to addresses through the directory.
//! - **Key items**: [`Transport`](transport::Transport), [`HttpTransport`](transport::HttpTransport),
//!   [`MockTransport`](transport::mock::MockTransport), [`StaticDirectory`](directory::StaticDirectory).
//!
//! ### 2. The Interface ([`clients`])
//! - **Role**: One typed client per backend over a shared [`ServiceClient`](clients::ServiceClient)
//!   that unwraps the `{status, msg, data}` envelope.
//!
//! ### 3. The Journey ([`session`], [`trip`], [`order`], [`workflow`])
//! - **Role**: Login, station and trip discovery, order assembly, and the state
//!   machine that strings them together.
//! - **Key items**: [`Workflow`](workflow::Workflow), [`TripResolver`](trip::TripResolver),
//!   [`OrderAssembler`](order::OrderAssembler).
//!
//! ### 4. The Orchestrator ([`runtime`], [`config`])
//! - **Role**: Builds everything from a TOML file and runs the consecutive and
//!   interleaved scenarios, plus the one-shot [`probe`]s.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info ticket-loadgen --config loadgen.toml consecutive --users 5 --repeat 3
//! RUST_LOG=info ticket-loadgen --config loadgen.toml interleave --users 5 --rounds 3
//! RUST_LOG=info ticket-loadgen --config loadgen.toml probe left-tickets
//! ```
//!
//! See `demos/loadgen.toml` for a sample configuration.

pub mod clients;
pub mod config;
pub mod directory;
pub mod model;
pub mod order;
pub mod probe;
pub mod random;
pub mod runtime;
pub mod session;
pub mod transport;
pub mod trip;
pub mod workflow;

pub use config::{Config, ConfigError};
pub use directory::*;
