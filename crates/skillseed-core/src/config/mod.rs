mod env;
mod types;

#[cfg(test)]
mod tests;

pub use types::*;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, bail};
use url::Url;

use crate::catalog::Catalog;

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str::<Self>(&content).context("failed to parse config file")?
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns an error for an empty base URL, a path without a leading `/`,
    /// or a zero timeout.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.target.base_url.trim().is_empty() {
            bail!("target.base_url must not be empty");
        }
        if !self.target.path.starts_with('/') {
            bail!(
                "target.path must start with '/', got {:?}",
                self.target.path
            );
        }
        if self.timeouts.connect_seconds == 0 || self.timeouts.request_seconds == 0 {
            bail!("timeouts must be greater than zero");
        }
        Ok(())
    }

    /// Full submission URL: `target.base_url` joined with `target.path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the result is not a valid `http`/`https` URL.
    pub fn endpoint(&self) -> anyhow::Result<Url> {
        let raw = format!(
            "{}{}",
            self.target.base_url.trim_end_matches('/'),
            self.target.path
        );
        let url = Url::parse(&raw).with_context(|| format!("invalid endpoint URL: {raw}"))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => bail!("unsupported endpoint scheme {other:?} in {raw}"),
        }
    }

    /// Resolve the configured catalog, applying category ordering when enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file cannot be loaded or holds an invalid record.
    pub fn catalog(&self) -> anyhow::Result<Catalog> {
        let catalog = match &self.catalog.path {
            Some(path) => {
                let path = PathBuf::from(path);
                Catalog::load(&path)
                    .with_context(|| format!("failed to load catalog {}", path.display()))?
            }
            None => Catalog::builtin().context("built-in catalog is invalid")?,
        };

        Ok(if self.catalog.assign_order {
            catalog.with_category_order()
        } else {
            catalog
        })
    }

    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.timeouts.connect_seconds)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeouts.request_seconds)
    }
}
