use serde::{Deserialize, Serialize};

use crate::error::RecordError;

pub const MAX_PROFICIENCY: u8 = 100;

/// One skill as the portfolio service expects it on `POST /api/skills`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SkillRecord {
    pub name: String,
    pub category: String,
    pub proficiency: u8,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub featured: bool,
    /// Position within the category. Only sent when ordering is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

impl SkillRecord {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        proficiency: u8,
        description: impl Into<String>,
        featured: bool,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            proficiency,
            description: description.into(),
            featured,
            order: None,
        }
    }

    /// # Errors
    ///
    /// Returns `RecordError` for a blank name or category, or a proficiency above 100.
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.name.trim().is_empty() {
            return Err(RecordError::EmptyName);
        }
        if self.category.trim().is_empty() {
            return Err(RecordError::EmptyCategory {
                name: self.name.clone(),
            });
        }
        if self.proficiency > MAX_PROFICIENCY {
            return Err(RecordError::ProficiencyOutOfRange {
                name: self.name.clone(),
                value: i64::from(self.proficiency),
            });
        }
        Ok(())
    }

    #[must_use]
    pub(crate) fn with_order(&self, order: u32) -> Self {
        Self {
            order: Some(order),
            ..self.clone()
        }
    }
}
