//! Skill records, catalog loading, and configuration.

pub mod catalog;
pub mod config;
pub mod error;
pub mod record;

pub use catalog::Catalog;
pub use error::{CatalogError, RecordError};
pub use record::SkillRecord;
