//! # Interleave Scheduler
//!
//! Drives several [`Steppable`] workflows in lock-step on one logical thread.
//!
//! 1. [`prime`](InterleaveScheduler::prime) advances every workflow to its first
//!    suspension point (login, trip search and order assembly happen here, one
//!    user after another).
//! 2. [`run`](InterleaveScheduler::run) then resumes each live workflow exactly
//!    once per round, in the order they were handed in.
//!
//! Within round *k*, user *i* is resumed before user *i+1*, and every round-*k*
//! resumption happens before any round-*k+1* one. That ordering is logical:
//! nothing is said about how close in time the calls land.
//!
//! A workflow that fails is marked failed and skipped from then on; its
//! siblings keep going.

use crate::workflow::{StepOutcome, Steppable, UserOutcome, ScenarioReport, WorkflowError};
use tracing::{debug, error, info, instrument};

#[derive(Debug)]
enum LaneStatus {
    Live,
    Done,
    Failed(WorkflowError),
}

struct Lane<W> {
    workflow: W,
    status: LaneStatus,
}

/// Round-robin driver over independent workflows.
pub struct InterleaveScheduler<W: Steppable> {
    lanes: Vec<Lane<W>>,
    rounds_run: u32,
}

impl<W: Steppable> InterleaveScheduler<W> {
    pub fn new(workflows: impl IntoIterator<Item = W>) -> Self {
        let lanes = workflows
            .into_iter()
            .map(|workflow| Lane {
                workflow,
                status: LaneStatus::Live,
            })
            .collect();
        Self {
            lanes,
            rounds_run: 0,
        }
    }

    /// Advances every workflow to its first suspension point.
    #[instrument(skip(self), fields(users = self.lanes.len()))]
    pub async fn prime(&mut self) {
        info!("Priming workflows");
        self.resume_all().await;
    }

    /// Resumes every live workflow once per round, for `rounds` rounds.
    #[instrument(skip(self), fields(users = self.lanes.len()))]
    pub async fn run(&mut self, rounds: u32) {
        for _ in 0..rounds {
            self.rounds_run += 1;
            debug!(round = self.rounds_run, live = self.live(), "Round start");
            self.resume_all().await;
        }
        info!(rounds_run = self.rounds_run, live = self.live(), "Rounds finished");
    }

    /// Workflows neither done nor failed.
    pub fn live(&self) -> usize {
        self.lanes
            .iter()
            .filter(|lane| matches!(lane.status, LaneStatus::Live))
            .count()
    }

    pub fn report(&self) -> ScenarioReport {
        let outcomes = self
            .lanes
            .iter()
            .map(|lane| UserOutcome {
                username: lane.workflow.label().to_string(),
                submissions: lane.workflow.submissions(),
                error: match &lane.status {
                    LaneStatus::Failed(e) => Some(e.to_string()),
                    LaneStatus::Live | LaneStatus::Done => None,
                },
            })
            .collect();
        ScenarioReport { outcomes }
    }

    async fn resume_all(&mut self) {
        for lane in &mut self.lanes {
            if !matches!(lane.status, LaneStatus::Live) {
                continue;
            }
            match lane.workflow.step().await {
                Ok(StepOutcome::Suspended) => {}
                Ok(StepOutcome::Done) => {
                    debug!(user = lane.workflow.label(), "Workflow done");
                    lane.status = LaneStatus::Done;
                }
                Err(e) => {
                    error!(user = lane.workflow.label(), error = %e, "Workflow failed");
                    lane.status = LaneStatus::Failed(e);
                }
            }
        }
    }
}
