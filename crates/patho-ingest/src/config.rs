//! TOML configuration for the classifier and QC policy.
//!
//! ```toml
//! [classifier]
//! child_age_cutoff = 18
//! fallback_bucket = "male"
//!
//! [qc]
//! acceptance_limit_percent = 2.0
//! warning_limit_percent = 5.0
//! ```
//!
//! Every key is optional.

use std::fs;
use std::path::{Path, PathBuf};

use patho_model::{ClassifierOptions, QcPolicy};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{IngestError, Result};

/// Environment variable naming the config file when `--config` is absent.
pub const CONFIG_ENV_VAR: &str = "PATHO_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathoConfig {
    pub classifier: ClassifierOptions,
    pub qc: QcPolicy,
}

impl PathoConfig {
    fn validate(&self, path: &Path) -> Result<()> {
        let invalid = |field, reason: &str| IngestError::InvalidConfig {
            path: path.to_path_buf(),
            field,
            reason: reason.to_string(),
        };
        let cutoff = self.classifier.child_age_cutoff;
        if !cutoff.is_finite() || cutoff <= 0.0 {
            return Err(invalid(
                "classifier.child_age_cutoff",
                "must be a positive number",
            ));
        }
        let acceptance = self.qc.acceptance_limit_percent;
        let warning = self.qc.warning_limit_percent;
        if !acceptance.is_finite() || acceptance < 0.0 {
            return Err(invalid(
                "qc.acceptance_limit_percent",
                "must be a non-negative number",
            ));
        }
        if !warning.is_finite() || warning < 0.0 {
            return Err(invalid(
                "qc.warning_limit_percent",
                "must be a non-negative number",
            ));
        }
        if acceptance > warning {
            return Err(invalid(
                "qc.acceptance_limit_percent",
                "must not exceed qc.warning_limit_percent",
            ));
        }
        Ok(())
    }
}

/// Reads and validates a config file.
pub fn load_config(path: &Path) -> Result<PathoConfig> {
    let contents = fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: PathoConfig = toml::from_str(&contents).map_err(|source| IngestError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate(path)?;
    info!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Loads the explicit path if given, else the file named by
/// `PATHO_CONFIG`, else the defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<PathoConfig> {
    let path = explicit.map(Path::to_path_buf).or_else(config_path_from_env);
    match path {
        Some(path) => load_config(&path),
        None => {
            debug!("no config file given, using defaults");
            Ok(PathoConfig::default())
        }
    }
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var_os(CONFIG_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
