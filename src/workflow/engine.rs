//! # Workflow Engine
//!
//! One virtual user's purchase journey as an explicit state machine:
//!
//! ```text
//! LoggedOut -> Authenticated -> Searching -> OrderAssembled -> Submitting -> Done
//!                                  ^   |                         ^   |
//!                                  +---+ no trip                 +---+ repeat
//! ```
//!
//! - **Searching** retries with a fresh travel date until a trip is found. There
//!   is no cap and no backoff.
//! - **OrderAssembled** builds the order once; it is never rebuilt.
//! - **Submitting** posts that same order `repeat` times. Each post is a new
//!   purchase attempt, not a retry.
//!
//! Two ways to drive it:
//! - [`Workflow::run_to_completion`] takes every transition back to back.
//! - [`Steppable::step`] suspends right before each submission, so a
//!   [`InterleaveScheduler`](crate::workflow::InterleaveScheduler) can interleave users.

use crate::clients::{Clients, PreserveClient};
use crate::model::{OrderRequest, StationPair, TravelDate, TripCandidate};
use crate::order::OrderAssembler;
use crate::random::Dice;
use crate::session::{Session, DEFAULT_VERIFICATION_CODE};
use crate::trip::TripResolver;
use crate::workflow::WorkflowError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

/// Observable workflow state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    LoggedOut,
    Authenticated,
    Searching,
    OrderAssembled,
    Submitting,
    Done,
}

/// Result of driving a workflow to its next suspension point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Parked right before a submission; call `step` again to perform it.
    Suspended,
    /// Terminal state reached.
    Done,
}

/// Anything the [`InterleaveScheduler`](crate::workflow::InterleaveScheduler) can drive.
#[async_trait]
pub trait Steppable: Send {
    /// Name used in logs and reports.
    fn label(&self) -> &str;

    /// Submissions performed so far.
    fn submissions(&self) -> u32;

    /// Runs until the next suspension point or the end.
    async fn step(&mut self) -> Result<StepOutcome, WorkflowError>;
}

/// Knobs fixed for one workflow run.
#[derive(Debug, Clone)]
pub struct WorkflowSettings {
    /// How many times the assembled order is submitted.
    pub repeat: u32,
    pub verification_code: String,
    /// Travel dates are drawn from `now + [0, travel_window_days)` days.
    pub travel_window_days: u32,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            repeat: 1,
            verification_code: DEFAULT_VERIFICATION_CODE.to_string(),
            travel_window_days: 100,
        }
    }
}

/// Internal state, carrying what each phase needs.
#[derive(Debug, Clone)]
enum Phase {
    LoggedOut,
    Authenticated,
    Searching { date: TravelDate },
    OrderAssembled { trip: TripCandidate, date: TravelDate },
    Submitting { order: OrderRequest },
    Done { order: Option<OrderRequest> },
}

/// One virtual user's journey.
pub struct Workflow {
    session: Session,
    resolver: TripResolver,
    assembler: OrderAssembler,
    preserve: PreserveClient,
    dice: Box<dyn Dice>,
    pair: StationPair,
    settings: WorkflowSettings,
    started_at: DateTime<Utc>,
    phase: Phase,
    searches: u32,
    submitted: u32,
    parked_at: Option<u32>,
}

impl Workflow {
    pub fn new(
        session: Session,
        clients: &Clients,
        pair: StationPair,
        settings: WorkflowSettings,
        dice: Box<dyn Dice>,
    ) -> Self {
        Self {
            session,
            resolver: TripResolver::new(clients.routes.clone(), clients.travel.clone()),
            assembler: OrderAssembler::new(clients.contacts.clone(), clients.food.clone()),
            preserve: clients.preserve.clone(),
            dice,
            pair,
            settings,
            started_at: Utc::now(),
            phase: Phase::LoggedOut,
            searches: 0,
            submitted: 0,
            parked_at: None,
        }
    }

    pub fn username(&self) -> &str {
        self.session.username()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> WorkflowState {
        match self.phase {
            Phase::LoggedOut => WorkflowState::LoggedOut,
            Phase::Authenticated => WorkflowState::Authenticated,
            Phase::Searching { .. } => WorkflowState::Searching,
            Phase::OrderAssembled { .. } => WorkflowState::OrderAssembled,
            Phase::Submitting { .. } => WorkflowState::Submitting,
            Phase::Done { .. } => WorkflowState::Done,
        }
    }

    /// The assembled order, once there is one.
    pub fn order(&self) -> Option<&OrderRequest> {
        match &self.phase {
            Phase::Submitting { order } => Some(order),
            Phase::Done { order } => order.as_ref(),
            _ => None,
        }
    }

    /// Trip searches performed, including empty ones.
    pub fn searches(&self) -> u32 {
        self.searches
    }

    /// Takes every remaining transition. Returns the number of submissions.
    #[instrument(skip(self), fields(username = %self.session.username()))]
    pub async fn run_to_completion(&mut self) -> Result<u32, WorkflowError> {
        while self.state() != WorkflowState::Done {
            self.advance().await?;
        }
        info!(submitted = self.submitted, searches = self.searches, "Workflow done");
        Ok(self.submitted)
    }

    fn roll_travel_date(&mut self) -> TravelDate {
        TravelDate::random_within(self.dice.as_mut(), self.started_at, self.settings.travel_window_days)
    }

    /// Takes exactly one transition.
    async fn advance(&mut self) -> Result<(), WorkflowError> {
        match &self.phase {
            Phase::LoggedOut => {
                self.session.login(&self.settings.verification_code).await?;
                self.phase = Phase::Authenticated;
            }
            Phase::Authenticated => {
                let date = self.roll_travel_date();
                debug!(%date, "Travel date picked");
                self.phase = Phase::Searching { date };
            }
            Phase::Searching { date } => {
                let date = *date;
                self.searches += 1;
                let found = self
                    .resolver
                    .resolve_trip(&self.session, self.dice.as_mut(), &self.pair, date)
                    .await?;
                match found {
                    Some(trip) => self.phase = Phase::OrderAssembled { trip, date },
                    None => {
                        let date = self.roll_travel_date();
                        warn!(attempt = self.searches, %date, "Trip not found, searching again");
                        self.phase = Phase::Searching { date };
                    }
                }
            }
            Phase::OrderAssembled { trip, date } => {
                let order = self
                    .assembler
                    .assemble_order(&self.session, self.dice.as_mut(), trip, *date)
                    .await?;
                self.phase = if self.settings.repeat == 0 {
                    Phase::Done { order: Some(order) }
                } else {
                    Phase::Submitting { order }
                };
            }
            Phase::Submitting { order } => {
                self.preserve.submit(order, self.session.token()?).await?;
                self.submitted += 1;
                debug!(submitted = self.submitted, repeat = self.settings.repeat, "Submission sent");
                if self.submitted >= self.settings.repeat {
                    let order = order.clone();
                    self.phase = Phase::Done { order: Some(order) };
                }
            }
            Phase::Done { .. } => {}
        }
        Ok(())
    }
}

#[async_trait]
impl Steppable for Workflow {
    fn label(&self) -> &str {
        self.session.username()
    }

    fn submissions(&self) -> u32 {
        self.submitted
    }

    async fn step(&mut self) -> Result<StepOutcome, WorkflowError> {
        loop {
            match self.state() {
                WorkflowState::Done => return Ok(StepOutcome::Done),
                WorkflowState::Submitting if self.parked_at != Some(self.submitted) => {
                    self.parked_at = Some(self.submitted);
                    debug!(username = %self.session.username(), submitted = self.submitted, "Suspended");
                    return Ok(StepOutcome::Suspended);
                }
                _ => self.advance().await?,
            }
        }
    }
}
