//! # Logging
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`.
//!
//! ```bash
//! # milestones: logins, picked stations, submissions, per-user outcomes
//! RUST_LOG=info ticket-loadgen consecutive
//!
//! # every request, suspension and retried search
//! RUST_LOG=debug ticket-loadgen interleave --rounds 3
//!
//! # only the scheduler
//! RUST_LOG=ticket_loadgen::workflow=debug ticket-loadgen interleave
//! ```
//!
//! Spans carry the username, so interleaved users stay apart in the output:
//!
//! ```text
//! INFO run_to_completion{username="fdse_microservice"}:login: Logged in account_id="4d2a..."
//! WARN run_to_completion{username="fdse_microservice"}: Trip not found, searching again attempt=1
//! INFO run_to_completion{username="fdse_microservice"}:submit{trip_id="G1234"}: Submitted status=Some(1) msg=Some("Success.")
//! ```

/// Installs the global subscriber. Call once, before anything logs.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
