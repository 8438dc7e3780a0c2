use reqwest::StatusCode;

use crate::error::SubmitError;

/// Result of the single submission attempt made for one record.
#[derive(Debug)]
pub struct SubmitOutcome {
    /// Position of the record in the submitted batch.
    pub index: usize,
    pub name: String,
    pub result: Result<StatusCode, SubmitError>,
}

impl SubmitOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Human-readable line reported for this record.
    #[must_use]
    pub fn status_line(&self) -> String {
        match &self.result {
            Ok(_) => format!("Successfully added skill: {}", self.name),
            Err(e) => format!("Error adding skill {}: {e}", self.name),
        }
    }
}

/// Per-record outcomes of one batch run, in submission order.
#[derive(Debug, Default)]
pub struct BatchReport {
    outcomes: Vec<SubmitOutcome>,
}

impl BatchReport {
    pub(crate) fn push(&mut self, outcome: SubmitOutcome) {
        self.outcomes.push(outcome);
    }

    #[must_use]
    pub fn outcomes(&self) -> &[SubmitOutcome] {
        &self.outcomes
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = &SubmitOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// True when every record was accepted. An empty batch counts as success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{}/{} skills added, {} failed",
            self.succeeded(),
            self.total(),
            self.failed()
        )
    }
}

impl From<Vec<SubmitOutcome>> for BatchReport {
    fn from(outcomes: Vec<SubmitOutcome>) -> Self {
        Self { outcomes }
    }
}
