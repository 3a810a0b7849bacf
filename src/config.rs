// Faultgen - Synthetic 5G telemetry fault dataset generator
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Generator configuration.

use crate::error::{FaultgenError, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Spacing between consecutive records.
pub const SAMPLE_INTERVAL_MINUTES: i64 = 1;

/// Generator configuration.
///
/// Every field has a reference default, so partial JSON files are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of records (rows) to generate.
    pub record_count: usize,
    /// Prior probability of drawing the faulty regime.
    pub fault_prior: f64,
    /// Fraction of faulty-regime records pushed into the extreme tail.
    pub extreme_tail_fraction: f64,
    /// Master random seed.
    pub seed: u64,
    /// Timestamp of the first record.
    pub epoch: NaiveDateTime,
    /// Number of base stations in the identifier pool.
    pub base_station_pool: u32,
    /// Number of cells in the identifier pool.
    pub cell_pool: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            record_count: 10_000,
            fault_prior: 0.30,
            extreme_tail_fraction: 0.20,
            seed: 42,
            epoch: default_epoch(),
            base_station_pool: 50,
            cell_pool: 200,
        }
    }
}

/// 2025-01-01 00:00:00
fn default_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

impl GeneratorConfig {
    /// Create a config with reference defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set record count.
    pub fn with_record_count(mut self, n: usize) -> Self {
        self.record_count = n;
        self
    }

    /// Set faulty-regime prior.
    pub fn with_fault_prior(mut self, p: f64) -> Self {
        self.fault_prior = p;
        self
    }

    /// Set extreme-tail fraction.
    pub fn with_extreme_tail_fraction(mut self, f: f64) -> Self {
        self.extreme_tail_fraction = f;
        self
    }

    /// Set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set start timestamp.
    pub fn with_epoch(mut self, epoch: NaiveDateTime) -> Self {
        self.epoch = epoch;
        self
    }

    /// Set identifier pool sizes.
    pub fn with_pools(mut self, base_stations: u32, cells: u32) -> Self {
        self.base_station_pool = base_stations;
        self.cell_pool = cells;
        self
    }

    /// Reject invalid parameters before any sampling happens.
    pub fn validate(&self) -> Result<()> {
        if self.record_count == 0 {
            return Err(FaultgenError::config(
                "record_count",
                "must be greater than zero",
            ));
        }
        check_probability("fault_prior", self.fault_prior)?;
        check_probability("extreme_tail_fraction", self.extreme_tail_fraction)?;
        if self.base_station_pool == 0 {
            return Err(FaultgenError::config(
                "base_station_pool",
                "must be greater than zero",
            ));
        }
        if self.cell_pool == 0 {
            return Err(FaultgenError::config(
                "cell_pool",
                "must be greater than zero",
            ));
        }
        if self.end_time().is_none() {
            return Err(FaultgenError::config(
                "record_count",
                "time window overflows the timestamp range",
            ));
        }
        Ok(())
    }

    /// Timestamp of record `index`.
    pub fn timestamp_at(&self, index: usize) -> Option<NaiveDateTime> {
        let minutes = i64::try_from(index).ok()?.checked_mul(SAMPLE_INTERVAL_MINUTES)?;
        self.epoch.checked_add_signed(Duration::try_minutes(minutes)?)
    }

    /// Timestamp of the last record.
    pub fn end_time(&self) -> Option<NaiveDateTime> {
        self.timestamp_at(self.record_count.checked_sub(1)?)
    }

    /// Load from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Save to a JSON file.
    pub fn to_json_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

fn check_probability(parameter: &'static str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(FaultgenError::config(
            parameter,
            format!("must be within [0, 1], got {}", value),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_is_reference_run() {
        let config = GeneratorConfig::default();
        assert_eq!(config.record_count, 10_000);
        assert_eq!(config.fault_prior, 0.30);
        assert_eq!(config.extreme_tail_fraction, 0.20);
        assert_eq!(config.base_station_pool, 50);
        assert_eq!(config.cell_pool, 200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_window_is_derived_from_count() {
        let config = GeneratorConfig::default();
        let end = config.end_time().unwrap();
        assert_eq!((end - config.epoch).num_minutes(), 9_999);
        // 10k minutes covers just under seven days.
        assert_eq!((end - config.epoch).num_days(), 6);
    }

    #[test]
    fn test_rejects_zero_records() {
        let err = GeneratorConfig::new()
            .with_record_count(0)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            FaultgenError::Configuration {
                parameter: "record_count",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_bad_probabilities() {
        for p in [-0.1, 1.5, f64::NAN] {
            let err = GeneratorConfig::new()
                .with_fault_prior(p)
                .validate()
                .unwrap_err();
            assert!(err.to_string().contains("fault_prior"));
        }
        let err = GeneratorConfig::new()
            .with_extreme_tail_fraction(2.0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("extreme_tail_fraction"));
    }

    #[test]
    fn test_rejects_empty_pools() {
        let err = GeneratorConfig::new().with_pools(0, 10).validate().unwrap_err();
        assert!(err.to_string().contains("base_station_pool"));
        let err = GeneratorConfig::new().with_pools(10, 0).validate().unwrap_err();
        assert!(err.to_string().contains("cell_pool"));
    }

    #[test]
    fn test_rejects_overflowing_window() {
        let epoch = NaiveDateTime::MAX - Duration::try_minutes(10).unwrap();
        let config = GeneratorConfig::new().with_epoch(epoch).with_record_count(5);
        assert!(config.validate().is_ok());

        let config = config.with_record_count(100);
        assert!(config.end_time().is_none());
        assert!(matches!(
            config.validate(),
            Err(FaultgenError::Configuration {
                parameter: "record_count",
                ..
            })
        ));
    }

    #[test]
    fn test_probability_bounds_inclusive() {
        let config = GeneratorConfig::new()
            .with_fault_prior(1.0)
            .with_extreme_tail_fraction(0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{"record_count": 500, "seed": 7}"#).unwrap();
        assert_eq!(config.record_count, 500);
        assert_eq!(config.seed, 7);
        assert_eq!(config.cell_pool, 200);
    }

    #[test]
    fn test_json_file_roundtrip() {
        let config = GeneratorConfig::new().with_seed(99).with_record_count(12);
        let file = NamedTempFile::new().unwrap();
        config.to_json_file(file.path()).unwrap();
        let loaded = GeneratorConfig::from_json_file(file.path()).unwrap();
        assert_eq!(loaded, config);
    }
}
