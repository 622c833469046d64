use crate::constants::{defaults, ENV_PREFIX};
use crate::error::{ConsolidatorError, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsolidatorConfig {
    /// Size of the fixed parse worker pool
    pub worker_count: usize,
    /// Newline-delimited record file
    pub input_path: PathBuf,
    /// Optional `EnvFilter` directive overriding the environment default
    pub log_filter: Option<String>,
}

impl Default for ConsolidatorConfig {
    fn default() -> Self {
        Self {
            worker_count: defaults::WORKER_COUNT,
            input_path: PathBuf::from(defaults::INPUT_PATH),
            log_filter: None,
        }
    }
}

impl ConsolidatorConfig {
    /// Layer defaults, an optional config file, then `DEBT_CONSOLIDATOR_*` variables
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let config = Self::load_unvalidated(config_file)?;
        config.validate()?;
        Ok(config)
    }

    /// Same layering as [`load`](Self::load), leaving validation to the caller
    ///
    /// Lets later overrides (command line flags) fix values a file got wrong.
    pub fn load_unvalidated(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        Ok(builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?)
    }

    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    pub fn with_input_path(mut self, input_path: impl Into<PathBuf>) -> Self {
        self.input_path = input_path.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.worker_count == 0 {
            return Err(ConsolidatorError::Configuration(
                "worker_count must be greater than 0".to_string(),
            ));
        }

        if self.input_path.as_os_str().is_empty() {
            return Err(ConsolidatorError::Configuration(
                "input_path cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
