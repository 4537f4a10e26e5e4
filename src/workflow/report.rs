use std::fmt;

/// How one virtual user's run ended.
#[derive(Debug, Clone, PartialEq)]
pub struct UserOutcome {
    pub username: String,
    pub submissions: u32,
    /// Rendered error for a run that failed.
    pub error: Option<String>,
}

impl UserOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-user outcomes of one scenario, in user order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScenarioReport {
    pub outcomes: Vec<UserOutcome>,
}

impl ScenarioReport {
    pub fn total_submissions(&self) -> u32 {
        self.outcomes.iter().map(|o| o.submissions).sum()
    }

    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_success()).count()
    }
}

impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            match &outcome.error {
                None => writeln!(f, "{}: {} submissions", outcome.username, outcome.submissions)?,
                Some(e) => writeln!(
                    f,
                    "{}: failed after {} submissions: {}",
                    outcome.username, outcome.submissions, e
                )?,
            }
        }
        write!(
            f,
            "total: {} submissions, {} failed users",
            self.total_submissions(),
            self.failures()
        )
    }
}
