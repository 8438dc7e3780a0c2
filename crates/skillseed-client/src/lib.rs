//! HTTP client and sequential batch submitter for skill records.

#![forbid(unsafe_code)]

pub mod error;
pub mod http;
pub mod report;
pub mod submitter;

pub use error::SubmitError;
pub use report::{BatchReport, SubmitOutcome};
pub use submitter::{BatchSubmitter, StatusTx};
