#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("skill name must not be empty")]
    EmptyName,

    #[error("skill {name}: category must not be empty")]
    EmptyCategory { name: String },

    #[error("skill {name}: proficiency {value} is outside 0..=100")]
    ProficiencyOutOfRange { name: String, value: i64 },
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid record #{index}: {source}")]
    Invalid {
        index: usize,
        #[source]
        source: RecordError,
    },
}
