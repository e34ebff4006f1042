use anyhow::Result;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, FileFormat};
use serde::Deserialize;

use crate::constants::{DEFAULT_PREVIEW_CAP, MAX_ITERATIONS, MAX_OCCURRENCES};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub expansion: ExpansionConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExpansionConfig {
    /// How many occurrences a preview materializes.
    pub preview_cap: usize,
    /// Hard bound on expansion steps for one series.
    pub max_iterations: usize,
}

impl ExpansionConfig {
    /// ## Summary
    /// Checks that previews show something and that the iteration bound
    /// covers the largest occurrence count a pattern may request.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if `preview_cap` is zero or
    /// `max_iterations` is below [`ExpansionConfig::min_iterations`].
    pub fn validate(&self) -> CoreResult<()> {
        if self.preview_cap == 0 {
            return Err(CoreError::ConfigError(
                "expansion.preview_cap must be at least 1".to_string(),
            ));
        }
        let min_iterations = Self::min_iterations();
        if self.max_iterations < min_iterations {
            return Err(CoreError::ConfigError(format!(
                "expansion.max_iterations must be at least {min_iterations}"
            )));
        }
        Ok(())
    }

    /// Steps needed to expand the largest allowed count (the anchor takes none).
    #[must_use]
    pub fn min_iterations() -> usize {
        usize::try_from(MAX_OCCURRENCES - 1).unwrap_or(usize::MAX)
    }
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            preview_cap: DEFAULT_PREVIEW_CAP,
            max_iterations: MAX_ITERATIONS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    fn builder() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default(
                "expansion.preview_cap",
                i64::try_from(DEFAULT_PREVIEW_CAP)?,
            )?
            .set_default("expansion.max_iterations", i64::try_from(MAX_ITERATIONS)?)?
            .set_default("logging.level", "info")?)
    }

    /// ## Summary
    /// Loads configuration from defaults, an optional `cadence.toml`, and
    /// `CADENCE_`-prefixed environment variables (`__` separates sections).
    /// Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Self::builder()?
            // TOML file
            .add_source(config::File::with_name("cadence.toml").required(false))
            // Environment
            .add_source(
                config::Environment::with_prefix("CADENCE")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Builds settings from TOML text layered over the defaults.
    ///
    /// ## Errors
    /// Returns an error if the TOML is malformed or does not deserialize.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(Self::builder()?
            .add_source(config::File::from_str(contents, FileFormat::Toml))
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Loads configuration from a `.env` file, `cadence.toml` and environment variables.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    settings.expansion.validate()?;
    Ok(settings)
}
