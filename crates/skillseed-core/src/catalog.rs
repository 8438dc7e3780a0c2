use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{CatalogError, RecordError};
use crate::record::SkillRecord;

const BUILTIN_CATALOG: &str = include_str!("../data/skills.toml");

/// Ordered, validated list of skills to seed.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<SkillRecord>,
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    skills: Vec<CatalogEntry>,
}

/// A `[[skills]]` table as written. Proficiency is read as `i64` so any
/// integer reaches record validation.
#[derive(Deserialize)]
struct CatalogEntry {
    name: String,
    category: String,
    proficiency: i64,
    #[serde(default)]
    description: String,
    #[serde(default)]
    featured: bool,
}

impl CatalogEntry {
    fn into_record(self) -> Result<SkillRecord, RecordError> {
        let proficiency =
            u8::try_from(self.proficiency).map_err(|_| RecordError::ProficiencyOutOfRange {
                name: self.name.clone(),
                value: self.proficiency,
            })?;
        Ok(SkillRecord::new(
            self.name,
            self.category,
            proficiency,
            self.description,
            self.featured,
        ))
    }
}

impl Catalog {
    /// Build a catalog from already constructed records.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Invalid` for the first record failing validation.
    pub fn new(records: Vec<SkillRecord>) -> Result<Self, CatalogError> {
        for (index, record) in records.iter().enumerate() {
            record
                .validate()
                .map_err(|source| CatalogError::Invalid { index, source })?;
        }
        Ok(Self { records })
    }

    /// The catalog shipped with the binary.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the embedded TOML is malformed.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Load a catalog from a TOML file of `[[skills]]` tables.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read, parsed, or holds an invalid record.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            records = catalog.len(),
            "loaded skill catalog"
        );
        Ok(catalog)
    }

    /// # Errors
    ///
    /// Returns `CatalogError` on malformed TOML or an invalid record.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content)?;
        let records = file
            .skills
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                entry
                    .into_record()
                    .map_err(|source| CatalogError::Invalid { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(records)
    }

    /// Assign each record its rank by descending proficiency within its category.
    ///
    /// Ties keep source order. The batch order itself is unchanged.
    #[must_use]
    pub fn with_category_order(&self) -> Self {
        let mut by_category: HashMap<&str, Vec<usize>> = HashMap::new();
        for (i, record) in self.records.iter().enumerate() {
            by_category
                .entry(record.category.as_str())
                .or_default()
                .push(i);
        }

        let mut ranks = vec![0u32; self.records.len()];
        for indices in by_category.values_mut() {
            indices.sort_by_key(|&i| std::cmp::Reverse(self.records[i].proficiency));
            for (rank, &i) in indices.iter().enumerate() {
                ranks[i] = u32::try_from(rank).unwrap_or(u32::MAX);
            }
        }

        let records = self
            .records
            .iter()
            .zip(ranks)
            .map(|(record, rank)| record.with_order(rank))
            .collect();
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[SkillRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct category labels in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.category.as_str()) {
                seen.push(record.category.as_str());
            }
        }
        seen
    }
}
