use crate::clients::Clients;
use crate::config::{Config, ConfigError};
use crate::directory::ServiceDirectory;
use crate::model::{Credentials, StationPair};
use crate::probe::{ProbeKind, Prober};
use crate::random::DiceSource;
use crate::runtime::DriverError;
use crate::session::Session;
use crate::transport::{HttpTransport, Transport};
use crate::trip::pick_stations;
use crate::workflow::{InterleaveScheduler, ScenarioReport, Steppable, UserOutcome, Workflow};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, info_span, instrument, Instrument};

/// Wires the clients once and runs scenarios against them.
///
/// `LoadDriver` owns:
/// - **Clients**: one set, shared by every virtual user
/// - **Users**: the configured credentials, used in order
/// - **Dice**: one generator per consumer, the station scout first
///
/// # Example
///
/// ```ignore
/// let config = Config::load("loadgen.toml")?;
/// let mut driver = LoadDriver::new(&config, DiceSource::seeded(7))?;
///
/// let report = driver.run_consecutive(5, 3).await?;
/// println!("{report}");
/// ```
pub struct LoadDriver {
    clients: Clients,
    config: Config,
    dice: DiceSource,
}

impl LoadDriver {
    /// Builds an HTTP transport and a static directory from `config`.
    pub fn new(config: &Config, dice: DiceSource) -> Result<Self, DriverError> {
        let transport = HttpTransport::new(&config.transport())?;
        let directory = config.directory();
        Ok(Self::with_parts(Arc::new(transport), Arc::new(directory), config, dice))
    }

    /// Uses the given transport and directory instead of building them.
    pub fn with_parts(
        transport: Arc<dyn Transport>,
        directory: Arc<dyn ServiceDirectory>,
        config: &Config,
        dice: DiceSource,
    ) -> Self {
        Self {
            clients: Clients::new(transport, directory),
            config: config.clone(),
            dice,
        }
    }

    /// `users` users, one after another, each running to completion and
    /// submitting `repeat` times.
    ///
    /// A failed user is recorded and the next one starts.
    #[instrument(skip(self))]
    pub async fn run_consecutive(
        &mut self,
        users: usize,
        repeat: u32,
    ) -> Result<ScenarioReport, DriverError> {
        let credentials = self.config.users(users)?.to_vec();
        let pair = self.scout(&credentials).await?;

        let mut report = ScenarioReport::default();
        for creds in credentials {
            let mut workflow = self.workflow(creds, &pair, repeat);
            let outcome = match workflow.run_to_completion().await {
                Ok(submissions) => UserOutcome {
                    username: workflow.username().to_string(),
                    submissions,
                    error: None,
                },
                Err(e) => {
                    error!(username = workflow.username(), error = %e, "Workflow failed");
                    UserOutcome {
                        username: workflow.username().to_string(),
                        submissions: workflow.submissions(),
                        error: Some(e.to_string()),
                    }
                }
            };
            report.outcomes.push(outcome);
        }

        info!(
            submissions = report.total_submissions(),
            failures = report.failures(),
            "Consecutive run finished"
        );
        Ok(report)
    }

    /// `users` users driven in lock-step: everyone is prepared, then every
    /// user submits once per round for `rounds` rounds.
    #[instrument(skip(self))]
    pub async fn run_interleaved(
        &mut self,
        users: usize,
        rounds: u32,
    ) -> Result<ScenarioReport, DriverError> {
        let credentials = self.config.users(users)?.to_vec();
        let pair = self.scout(&credentials).await?;

        let workflows: Vec<_> = credentials
            .into_iter()
            .map(|creds| self.workflow(creds, &pair, rounds))
            .collect();

        let mut scheduler = InterleaveScheduler::new(workflows);
        scheduler.prime().await;
        scheduler.run(rounds).await;

        let report = scheduler.report();
        info!(
            submissions = report.total_submissions(),
            failures = report.failures(),
            "Interleaved run finished"
        );
        Ok(report)
    }

    /// One probe as the first configured user.
    #[instrument(skip(self))]
    pub async fn probe(&mut self, kind: ProbeKind) -> Result<Value, DriverError> {
        let creds = self.config.users(1)?[0].clone();
        let mut session = self.session(creds);
        session.login(&self.config.verification_code).await?;

        let prober = Prober::new(self.clients.clone(), self.config.travel_window_days);
        let mut dice = self.dice.next_dice();
        Ok(prober.run(kind, &session, dice.as_mut()).await?)
    }

    /// Logs in as the first user and picks the station pair every user travels.
    async fn scout(&mut self, credentials: &[Credentials]) -> Result<StationPair, DriverError> {
        let first = credentials.first().ok_or(ConfigError::NotEnoughUsers {
            requested: 1,
            available: 0,
        })?;
        let span = info_span!("scout", username = %first.username);
        async {
            let mut session = self.session(first.clone());
            session.login(&self.config.verification_code).await?;
            let mut dice = self.dice.next_dice();
            let pair = pick_stations(&session, &self.clients.routes, dice.as_mut()).await?;
            Ok::<_, DriverError>(pair)
        }
        .instrument(span)
        .await
    }

    fn session(&self, creds: Credentials) -> Session {
        Session::new(creds, self.clients.auth.clone())
    }

    fn workflow(&mut self, creds: Credentials, pair: &StationPair, repeat: u32) -> Workflow {
        Workflow::new(
            self.session(creds),
            &self.clients,
            pair.clone(),
            self.config.workflow(repeat),
            self.dice.next_dice(),
        )
    }
}
