//! Configuration
//!
//! Runtime settings read from `FUNCFINDER_*` environment variables, which a
//! `.env` file may supply. Unparseable values are logged and ignored.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::warn;

use crate::bench::BenchConfig;

pub const TIME_ANSWERS: &str = "FUNCFINDER_TIME_ANSWERS";
pub const BENCH_TARGET_MS: &str = "FUNCFINDER_BENCH_TARGET_MS";
pub const BENCH_BATCHES: &str = "FUNCFINDER_BENCH_BATCHES";
pub const FAULT_TRACES: &str = "FUNCFINDER_FAULT_TRACES";

/// Settings shared by every report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Benchmark answers when more than one passes
    pub time_answers: bool,
    /// Minimum duration of one calibrated benchmark batch, in milliseconds
    pub bench_target_ms: u64,
    /// Batches measured per answer
    pub bench_batches: usize,
    /// Show fault details for failing declared answers
    pub fault_traces: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_answers: true,
            bench_target_ms: 1000,
            bench_batches: 5,
            fault_traces: true,
        }
    }
}

impl Config {
    /// Read the current process environment
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Read key/value pairs from a `.env` file without touching the process environment
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        // the non-iterator loaders write into the process environment
        #[allow(deprecated)]
        let entries = dotenv::from_path_iter(path)
            .with_context(|| format!("Failed to open {}", path.display()))?
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Self::from_vars(entries))
    }

    /// Defaults, overridden by every recognized variable in `vars`
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (key, value) in vars {
            let (key, value) = (key.as_ref(), value.as_ref().trim());
            match key {
                TIME_ANSWERS => assign(&mut config.time_answers, key, parse_flag(value)),
                FAULT_TRACES => assign(&mut config.fault_traces, key, parse_flag(value)),
                BENCH_TARGET_MS => assign(&mut config.bench_target_ms, key, value.parse().ok()),
                BENCH_BATCHES => assign(
                    &mut config.bench_batches,
                    key,
                    value.parse().ok().filter(|&n: &usize| n > 0),
                ),
                _ => {}
            }
        }
        config
    }

    pub fn bench(&self) -> BenchConfig {
        BenchConfig {
            target: Duration::from_millis(self.bench_target_ms),
            batches: self.bench_batches,
        }
    }
}

fn assign<T>(slot: &mut T, key: &str, parsed: Option<T>) {
    match parsed {
        Some(value) => *slot = value,
        None => warn!("Ignoring invalid value for {}", key),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(Vec::<(String, String)>::new());
        assert_eq!(config, Config::default());
        assert_eq!(config.bench().target, Duration::from_secs(1));
        assert_eq!(config.bench().batches, 5);
    }

    #[test]
    fn test_overrides_and_invalid_values() {
        let config = Config::from_vars([
            (TIME_ANSWERS, "no"),
            (BENCH_TARGET_MS, "250"),
            (BENCH_BATCHES, "0"),
            (FAULT_TRACES, "maybe"),
            ("UNRELATED", "x"),
        ]);
        assert!(!config.time_answers);
        assert_eq!(config.bench_target_ms, 250);
        assert_eq!(config.bench_batches, 5);
        assert!(config.fault_traces);
    }

    #[test]
    fn test_from_dotenv_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# benchmark settings").unwrap();
        writeln!(file, "FUNCFINDER_BENCH_BATCHES=3").unwrap();
        writeln!(file, "FUNCFINDER_FAULT_TRACES=false").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.bench_batches, 3);
        assert!(!config.fault_traces);
        assert!(config.time_answers);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::from_file(dir.path().join("absent.env")).is_err());
    }

    #[test]
    fn test_serializes() {
        let json = serde_json::to_value(Config::default()).unwrap();
        assert_eq!(json["bench_target_ms"], 1000);
    }
}
