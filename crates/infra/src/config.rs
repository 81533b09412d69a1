//! Process configuration, read from environment variables.
//!
//! | variable | values | default |
//! |---|---|---|
//! | `CENSUS_SEED_ON_STARTUP` | `true` / `false` | `true` |
//! | `CENSUS_LOG_FORMAT` | `json` / `compact` | `json` |

use census_observability::LogFormat;

pub const SEED_ON_STARTUP_VAR: &str = "CENSUS_SEED_ON_STARTUP";
pub const LOG_FORMAT_VAR: &str = "CENSUS_LOG_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CensusConfig {
    /// Save the sample records when the store starts empty.
    pub seed_on_startup: bool,
    pub log_format: LogFormat,
    /// Values that could not be parsed and were replaced by defaults.
    ///
    /// Collected rather than logged because config is read before logging is up.
    pub warnings: Vec<String>,
}

impl Default for CensusConfig {
    fn default() -> Self {
        Self {
            seed_on_startup: true,
            log_format: LogFormat::Json,
            warnings: Vec::new(),
        }
    }
}

impl CensusConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment, test map, ...).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(SEED_ON_STARTUP_VAR) {
            match raw.trim().parse::<bool>() {
                Ok(v) => config.seed_on_startup = v,
                Err(_) => config
                    .warnings
                    .push(format!("{SEED_ON_STARTUP_VAR}={raw:?} is not a bool; using default")),
            }
        }

        if let Some(raw) = lookup(LOG_FORMAT_VAR) {
            match raw.trim().to_lowercase().as_str() {
                "json" => config.log_format = LogFormat::Json,
                "compact" => config.log_format = LogFormat::Compact,
                _ => config.warnings.push(format!(
                    "{LOG_FORMAT_VAR}={raw:?} must be one of: json, compact; using default"
                )),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> CensusConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CensusConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_set() {
        assert_eq!(from_pairs(&[]), CensusConfig::default());
    }

    #[test]
    fn reads_known_values() {
        let config = from_pairs(&[(SEED_ON_STARTUP_VAR, "false"), (LOG_FORMAT_VAR, "Compact")]);
        assert!(!config.seed_on_startup);
        assert_eq!(config.log_format, LogFormat::Compact);
        assert!(config.warnings.is_empty());
    }

    #[test]
    fn bad_values_fall_back_with_warnings() {
        let config = from_pairs(&[(SEED_ON_STARTUP_VAR, "nope"), (LOG_FORMAT_VAR, "xml")]);
        assert!(config.seed_on_startup);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.warnings.len(), 2);
    }
}
