//! Prover configuration types.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for the search controller.
///
/// Every limit is a hard bound; reaching one ends the search with
/// [`crate::ProofResult::ResourceLimit`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProverConfig {
    /// Maximum number of clause pairs handed to the resolver
    pub max_pair_evaluations: usize,
    /// Maximum number of clauses in the repository
    pub max_clauses: usize,
    /// Wall-clock limit for one proof attempt
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Reject unifiers that bind a variable to a term containing it
    pub occurs_check: bool,
    /// Schedule pairs involving a unit clause before all other pairs
    pub unit_preference: bool,
    /// Worker threads for pair evaluation (1 = evaluate on the calling thread)
    pub workers: usize,
    /// Pairs evaluated per parallel batch
    pub chunk_size: usize,
}

impl Default for ProverConfig {
    fn default() -> Self {
        ProverConfig {
            max_pair_evaluations: 100_000,
            max_clauses: 10_000,
            timeout: Duration::from_secs(60),
            occurs_check: false,
            unit_preference: true,
            workers: 1,
            chunk_size: 64,
        }
    }
}

impl ProverConfig {
    /// Read a configuration from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: ProverConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_pair_evaluations == 0 {
            return Err(Error::Config("max_pair_evaluations must be positive".into()));
        }
        if self.max_clauses == 0 {
            return Err(Error::Config("max_clauses must be positive".into()));
        }
        if self.workers == 0 {
            return Err(Error::Config("workers must be at least 1".into()));
        }
        if self.chunk_size == 0 {
            return Err(Error::Config("chunk_size must be positive".into()));
        }
        Ok(())
    }
}

/// Convert a timeout given in seconds; negative, NaN and out-of-range values are rejected
pub fn timeout_from_secs(secs: f64) -> std::result::Result<Duration, String> {
    Duration::try_from_secs_f64(secs)
        .map_err(|e| format!("invalid timeout {}: {}", secs, e))
}

/// Timeouts are written as (fractional) seconds in configuration files
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(d)?;
        super::timeout_from_secs(secs).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ProverConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: ProverConfig =
            serde_json::from_str(r#"{"max_clauses": 50, "timeout": 1.5}"#).unwrap();
        assert_eq!(config.max_clauses, 50);
        assert_eq!(config.timeout, Duration::from_millis(1500));
        assert_eq!(config.max_pair_evaluations, 100_000);
        assert!(!config.occurs_check);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let config = ProverConfig {
            workers: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
        assert!(serde_json::from_str::<ProverConfig>(r#"{"timeout": -1}"#).is_err());
    }

    #[test]
    fn test_oversized_timeout_rejected() {
        assert!(serde_json::from_str::<ProverConfig>(r#"{"timeout": 1e30}"#).is_err());
        assert!(timeout_from_secs(1e30).is_err());
        assert!(timeout_from_secs(f64::INFINITY).is_err());
        assert_eq!(timeout_from_secs(2.5), Ok(Duration::from_millis(2500)));
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prover.json");
        std::fs::write(&path, r#"{"occurs_check": true, "workers": 4}"#).unwrap();
        let config = ProverConfig::from_json_file(&path).unwrap();
        assert!(config.occurs_check);
        assert_eq!(config.workers, 4);
    }
}
