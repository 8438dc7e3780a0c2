use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use skillseed_core::SkillRecord;
use url::Url;

use crate::error::SubmitError;
use crate::report::{BatchReport, SubmitOutcome};

/// Channel for the per-record status lines.
pub type StatusTx = tokio::sync::mpsc::UnboundedSender<String>;

const MAX_ERROR_BODY_BYTES: usize = 512;

/// Posts skill records to a single endpoint, one request at a time.
///
/// Every record gets exactly one attempt. Failures are captured per record
/// and never stop the rest of the batch.
pub struct BatchSubmitter {
    client: reqwest::Client,
    endpoint: Url,
    status_tx: Option<StatusTx>,
}

impl BatchSubmitter {
    /// # Errors
    ///
    /// Returns `SubmitError::Endpoint` unless the URL scheme is `http` or `https`.
    pub fn new(client: reqwest::Client, endpoint: Url) -> Result<Self, SubmitError> {
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(SubmitError::Endpoint {
                url: endpoint.to_string(),
                reason: "scheme must be http or https".into(),
            });
        }
        Ok(Self {
            client,
            endpoint,
            status_tx: None,
        })
    }

    #[must_use]
    pub fn with_status_tx(mut self, tx: StatusTx) -> Self {
        self.status_tx = Some(tx);
        self
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// POST one record as JSON.
    ///
    /// # Errors
    ///
    /// Returns `SubmitError::Network` when the request cannot complete and
    /// `SubmitError::Status` for any non-2xx response.
    pub async fn submit_one(&self, record: &SkillRecord) -> Result<StatusCode, SubmitError> {
        let body = serde_json::to_vec(record)?;
        tracing::debug!(
            skill = %record.name,
            endpoint = %self.endpoint,
            bytes = body.len(),
            "posting skill"
        );

        let resp = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(status);
        }

        let body = match resp.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!(skill = %record.name, %status, "failed to read error body: {e}");
                String::new()
            }
        };
        Err(SubmitError::Status {
            status,
            body: truncate_body(body.trim()),
        })
    }

    /// Submit every record in order and collect one outcome per record.
    pub async fn submit_all(&self, records: &[SkillRecord]) -> BatchReport {
        let mut report = BatchReport::default();

        for (index, record) in records.iter().enumerate() {
            let result = self.submit_one(record).await;
            match &result {
                Ok(status) => {
                    tracing::info!(skill = %record.name, %status, "skill added");
                }
                Err(e) => {
                    tracing::warn!(skill = %record.name, "failed to add skill: {e}");
                }
            }

            let outcome = SubmitOutcome {
                index,
                name: record.name.clone(),
                result,
            };
            if let Some(tx) = &self.status_tx
                && tx.send(outcome.status_line()).is_err()
            {
                tracing::debug!(skill = %record.name, "status receiver dropped");
            }
            report.push(outcome);
        }

        tracing::info!(
            total = report.total(),
            succeeded = report.succeeded(),
            failed = report.failed(),
            "batch finished"
        );
        report
    }
}

fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_BYTES {
        return body.to_owned();
    }
    let mut end = MAX_ERROR_BODY_BYTES;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
