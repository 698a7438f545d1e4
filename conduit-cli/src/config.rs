//! Host configuration loading.
//!
//! Looked up at `--config`, then `CONDUIT_CONFIG`. With neither set the
//! built-in defaults are used. Every section is optional.

use crate::error::{CliError, CliResult};
use conduit_core::{ConfigError, OrchestratorConfig};
use conduit_plans::EstimatorPolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV_VAR: &str = "CONDUIT_CONFIG";

/// Filter used when `RUST_LOG` is unset and the config names none.
pub const DEFAULT_LOG_FILTER: &str = "conduit=info,conduit_cli=info,conduit_agents=info";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    pub orchestrator: OrchestratorConfig,
    pub estimator: EstimatorPolicy,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, overridden by `RUST_LOG`
    pub filter: Option<String>,
    /// Emit JSON log lines
    pub json: bool,
}

impl LoggingConfig {
    pub fn filter_or_default(&self) -> &str {
        self.filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}

impl HostConfig {
    /// Resolve the config path and load it, or fall back to defaults.
    pub fn load(cli_path: Option<&Path>) -> CliResult<Self> {
        let path = cli_path.map(Path::to_path_buf).or_else(config_path_from_env);
        let config = match path {
            Some(path) => Self::from_path(&path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> CliResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| CliError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> CliResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.orchestrator.validate()?;
        self.estimator.validate()?;
        if let Some(filter) = self.logging.filter.as_deref() {
            if filter.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "logging.filter".to_string(),
                    value: filter.to_string(),
                    reason: "must not be empty when set".to_string(),
                });
            }
        }
        Ok(())
    }
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var_os(CONFIG_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use conduit_core::{AssignmentPolicy, Tier};

    #[test]
    fn test_empty_toml_is_default() -> CliResult<()> {
        let config = HostConfig::from_toml("")?;
        assert_eq!(config, HostConfig::default());
        assert!(config.validate().is_ok());
        assert_eq!(config.logging.filter_or_default(), DEFAULT_LOG_FILTER);
        Ok(())
    }

    #[test]
    fn test_full_toml() -> CliResult<()> {
        let config = HostConfig::from_toml(
            r#"
            [orchestrator]
            assignment_policy = "category_match"
            value_unit = "M"

            [[orchestrator.benchmarks]]
            name = "pilot"
            value = 3.0

            [estimator.impact]
            layer_weight = 5
            high_threshold = 40
            medium_threshold = 20

            [estimator.timing]
            fallback = { tier = "Low", rationale = "unscheduled" }

            [[estimator.timing.rules]]
            keyword = "sprint"
            tier = "High"
            rationale = "two weeks"

            [logging]
            filter = "debug"
            json = true
            "#,
        )?;
        assert_eq!(config.orchestrator.assignment_policy, AssignmentPolicy::CategoryMatch);
        assert!((config.orchestrator.total_value() - 3.0).abs() < f64::EPSILON);
        assert_eq!(config.estimator.impact.layer_weight, 5);
        assert_eq!(config.estimator.timing.rules[0].tier, Tier::High);
        assert_eq!(config.logging.filter_or_default(), "debug");
        assert!(config.logging.json);
        assert!(config.validate().is_ok());
        Ok(())
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let err = HostConfig::from_toml("verbose = true").err();
        assert!(matches!(err, Some(CliError::ConfigParse(_))));

        let err = HostConfig::from_toml("[orchestrator]\nworkers = 4").err();
        assert!(matches!(err, Some(CliError::ConfigParse(_))));
    }

    #[test]
    fn test_validate_rejects_blank_filter() {
        let config = HostConfig {
            logging: LoggingConfig {
                filter: Some("  ".to_string()),
                json: false,
            },
            ..HostConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_load_from_explicit_path() -> CliResult<()> {
        let path = std::env::temp_dir().join(format!("conduit-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[orchestrator]\nassignment_policy = \"any_available\"\n")
            .map_err(|source| CliError::ConfigIo {
                path: path.clone(),
                source,
            })?;
        let loaded = HostConfig::load(Some(&path));
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded?.orchestrator.assignment_policy, AssignmentPolicy::AnyAvailable);
        Ok(())
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = HostConfig::from_path(Path::new("/definitely/not/here/conduit.toml")).err();
        assert!(matches!(err, Some(CliError::ConfigIo { .. })));
    }
}
