//! Configuration for stack capture.
//!
//! Settings come from TOML through the `config` crate:
//! - Bundled defaults (include_str! from herror.toml)
//! - An optional ./herror.toml overriding any of them

use config::{Config, File, FileFormat};
use herror_error::{ConfigError, HerrorError, HerrorResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../herror.toml");

/// Stack capture settings.
///
/// # Example
///
/// ```toml
/// max_frames = 64
/// skip = 0
/// runtime_packages = ["std", "core", "alloc", "backtrace", "test", "tokio"]
/// ```
///
/// ```
/// use herror_stack::StackConfig;
///
/// let config = StackConfig::builder().max_frames(32).build();
/// assert_eq!(*config.max_frames(), 32);
/// assert_eq!(*config.skip(), 0);
/// assert!(config.runtime_packages().iter().any(|p| p == "std"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct StackConfig {
    /// Upper bound on raw frames inspected per capture.
    #[serde(default = "default_max_frames")]
    max_frames: usize,

    /// Innermost raw frames dropped before frames are built.
    #[serde(default)]
    skip: usize,

    /// Root modules removed from every capture as runtime noise.
    #[serde(default = "default_runtime_packages")]
    runtime_packages: Vec<String>,
}

fn default_max_frames() -> usize {
    100
}

fn default_runtime_packages() -> Vec<String> {
    ["std", "core", "alloc", "backtrace", "test"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            max_frames: default_max_frames(),
            skip: 0,
            runtime_packages: default_runtime_packages(),
        }
    }
}

impl StackConfig {
    /// Creates a new stack config builder.
    pub fn builder() -> StackConfigBuilder {
        StackConfigBuilder::default()
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_frames` is zero.
    pub fn validate(&self) -> HerrorResult<()> {
        if self.max_frames == 0 {
            return Err(ConfigError::invalid("max_frames", "must be greater than zero").into());
        }
        Ok(())
    }

    /// Returns true if `package` has one of the configured runtime packages
    /// as its root module.
    pub fn is_runtime_package(&self, package: &str) -> bool {
        let root = root_module(package);
        self.runtime_packages.iter().any(|runtime| runtime == root)
    }

    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> HerrorResult<Self> {
        debug!("Loading stack configuration from file");

        let config: Self = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                HerrorError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                HerrorError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with precedence: ./herror.toml > bundled default.
    ///
    /// The user file is optional and silently skipped when absent.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use herror_stack::StackConfig;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = StackConfig::load()?;
    /// assert!(*config.max_frames() > 0);
    /// # Ok(())
    /// # }
    /// ```
    #[instrument]
    pub fn load() -> HerrorResult<Self> {
        debug!("Loading stack configuration: current dir > bundled defaults");

        let config: Self = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::with_name("herror").required(false))
            .build()
            .map_err(|e| {
                HerrorError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                HerrorError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }
}

fn root_module(package: &str) -> &str {
    package.split(['/', ':']).next().unwrap_or(package)
}

/// Builder for `StackConfig`.
#[derive(Debug, Default)]
pub struct StackConfigBuilder {
    max_frames: Option<usize>,
    skip: Option<usize>,
    runtime_packages: Option<Vec<String>>,
}

impl StackConfigBuilder {
    /// Sets the raw frame limit.
    pub fn max_frames(mut self, value: usize) -> Self {
        self.max_frames = Some(value);
        self
    }

    /// Sets the number of innermost raw frames to skip.
    pub fn skip(mut self, value: usize) -> Self {
        self.skip = Some(value);
        self
    }

    /// Replaces the runtime package list.
    pub fn runtime_packages<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.runtime_packages = Some(packages.into_iter().map(Into::into).collect());
        self
    }

    /// Builds the `StackConfig`.
    pub fn build(self) -> StackConfig {
        StackConfig {
            max_frames: self.max_frames.unwrap_or_else(default_max_frames),
            skip: self.skip.unwrap_or(0),
            runtime_packages: self
                .runtime_packages
                .unwrap_or_else(default_runtime_packages),
        }
    }
}
