// Faultgen - Synthetic 5G telemetry fault dataset generator
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Dataset manifest written next to a generated CSV.
//!
//! Manifests record how a dataset was produced (configuration, label
//! rule, column domains) and a CRC-32 of the CSV bytes so consumers can
//! check they are reading the artifact the manifest describes.

use crate::config::{GeneratorConfig, SAMPLE_INTERVAL_MINUTES};
use crate::dataset::Dataset;
use crate::domain::Metric;
use crate::error::{FaultgenError, Result};
use crate::label::{Threshold, FAULT_THRESHOLDS};
use chrono::{DateTime, NaiveDateTime, Utc};
use crc::{Crc, CRC_32_ISO_HDLC};
use serde::{Deserialize, Serialize};
use std::path::Path;

const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// CRC-32 of an artifact.
pub fn checksum(bytes: &[u8]) -> u32 {
    CRC32.checksum(bytes)
}

/// Dataset manifest describing a generated artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetManifest {
    /// Dataset name (matches the CSV filename without extension).
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Number of rows.
    pub record_count: usize,
    /// Spacing between rows.
    pub sample_interval_minutes: i64,
    /// First timestamp.
    pub start: NaiveDateTime,
    /// Last timestamp.
    pub end: NaiveDateTime,
    /// Configuration the dataset was generated with.
    pub config: GeneratorConfig,
    /// Raw metric columns.
    pub columns: Vec<ColumnManifest>,
    /// Labeling thresholds (any one firing means `Faulty`).
    pub thresholds: Vec<Threshold>,
    /// Label prevalence.
    pub labels: LabelCounts,
    /// CRC-32 of the CSV bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csv_crc32: Option<u32>,
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
}

/// Raw metric column information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnManifest {
    pub name: String,
    pub unit: String,
    pub domain_min: f64,
    pub domain_max: f64,
    pub observed_min: f64,
    pub observed_max: f64,
}

/// Label counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelCounts {
    pub normal: usize,
    pub faulty: usize,
    pub fault_rate: f64,
}

impl DatasetManifest {
    /// Describe `dataset` under its own metadata name, `"dataset"` if unset.
    pub fn describe(dataset: &Dataset, config: &GeneratorConfig) -> Result<Self> {
        let name = dataset.metadata.name.as_deref().unwrap_or("dataset");
        Self::from_dataset(name, dataset, config)
    }

    /// Describe `dataset`, generated with `config`.
    ///
    /// Fails when the dataset records a seed other than `config.seed`.
    pub fn from_dataset(name: &str, dataset: &Dataset, config: &GeneratorConfig) -> Result<Self> {
        if let Some(seed) = dataset.metadata.seed.filter(|s| *s != config.seed) {
            return Err(FaultgenError::config(
                "seed",
                format!("dataset was generated with seed {}, not {}", seed, config.seed),
            ));
        }
        let (start, end) = dataset.time_window().ok_or(FaultgenError::Empty)?;
        let summary = dataset.summary();

        let columns = Metric::ALL
            .iter()
            .filter_map(|m| {
                let stats = summary.columns.iter().find(|c| c.column == m.column())?;
                let domain = m.domain();
                Some(ColumnManifest {
                    name: m.column().to_string(),
                    unit: m.unit().to_string(),
                    domain_min: domain.min,
                    domain_max: domain.max,
                    observed_min: stats.min,
                    observed_max: stats.max,
                })
            })
            .collect();

        Ok(Self {
            name: name.to_string(),
            description: dataset.metadata.description.clone().unwrap_or_default(),
            record_count: dataset.len(),
            sample_interval_minutes: SAMPLE_INTERVAL_MINUTES,
            start,
            end,
            config: config.clone(),
            columns,
            thresholds: FAULT_THRESHOLDS.to_vec(),
            labels: LabelCounts {
                normal: summary.normal_count,
                faulty: summary.faulty_count,
                fault_rate: summary.fault_rate,
            },
            csv_crc32: None,
            generated_at: Utc::now(),
        })
    }

    /// Set description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    /// Record the checksum of the CSV bytes.
    pub fn with_csv_bytes(mut self, bytes: &[u8]) -> Self {
        self.csv_crc32 = Some(checksum(bytes));
        self
    }

    /// Check CSV bytes against the recorded checksum.
    ///
    /// Returns `false` when no checksum was recorded.
    pub fn matches_csv(&self, bytes: &[u8]) -> bool {
        self.csv_crc32 == Some(checksum(bytes))
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save to JSON file.
    pub fn to_json_file(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load from JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate_dataset;
    use tempfile::NamedTempFile;

    fn small() -> (GeneratorConfig, Dataset) {
        let config = GeneratorConfig::new().with_record_count(200).with_seed(5);
        let dataset = generate_dataset(&config).unwrap();
        (config, dataset)
    }

    #[test]
    fn test_manifest_creation() {
        let (config, dataset) = small();
        let manifest = DatasetManifest::from_dataset("small", &dataset, &config)
            .unwrap()
            .with_description("Test dataset");

        assert_eq!(manifest.name, "small");
        assert_eq!(manifest.record_count, 200);
        assert_eq!(manifest.columns.len(), 10);
        assert_eq!(manifest.thresholds.len(), 6);
        assert_eq!(manifest.labels.normal + manifest.labels.faulty, 200);
        assert_eq!((manifest.end - manifest.start).num_minutes(), 199);

        for column in &manifest.columns {
            assert!(column.observed_min >= column.domain_min);
            assert!(column.observed_max <= column.domain_max);
        }
    }

    #[test]
    fn test_manifest_named_from_metadata() {
        let (config, dataset) = small();
        let manifest = DatasetManifest::describe(&dataset, &config).unwrap();
        assert_eq!(manifest.name, "dataset");

        let dataset = dataset.with_name("cell_faults").with_description("Two hundred rows");
        let manifest = DatasetManifest::describe(&dataset, &config).unwrap();
        assert_eq!(manifest.name, "cell_faults");
        assert_eq!(manifest.description, "Two hundred rows");
    }

    #[test]
    fn test_manifest_rejects_foreign_config() {
        let (config, dataset) = small();
        assert_eq!(dataset.metadata.seed, Some(config.seed));
        let other = config.clone().with_seed(6);
        assert!(matches!(
            DatasetManifest::from_dataset("small", &dataset, &other),
            Err(FaultgenError::Configuration {
                parameter: "seed",
                ..
            })
        ));
    }

    #[test]
    fn test_manifest_requires_rows() {
        let config = GeneratorConfig::new();
        assert!(matches!(
            DatasetManifest::from_dataset("empty", &Dataset::new(), &config),
            Err(FaultgenError::Empty)
        ));
    }

    #[test]
    fn test_checksum_matches_csv() {
        let (config, dataset) = small();
        let bytes = dataset.to_csv_bytes().unwrap();
        let manifest = DatasetManifest::from_dataset("small", &dataset, &config)
            .unwrap()
            .with_csv_bytes(&bytes);

        assert!(manifest.matches_csv(&bytes));
        let mut tampered = bytes.clone();
        tampered[bytes.len() / 2] ^= 0x01;
        assert!(!manifest.matches_csv(&tampered));
    }

    #[test]
    fn test_manifest_json_roundtrip() {
        let (config, dataset) = small();
        let manifest = DatasetManifest::from_dataset("small", &dataset, &config).unwrap();

        let json = manifest.to_json().unwrap();
        assert!(json.contains("\"name\": \"small\""));
        assert!(json.contains("\"rssi_dbm\""));

        let file = NamedTempFile::new().unwrap();
        manifest.to_json_file(file.path()).unwrap();
        let loaded = DatasetManifest::from_json_file(file.path()).unwrap();
        assert_eq!(loaded.config, config);
        assert_eq!(loaded.labels, manifest.labels);
        assert_eq!(loaded.thresholds, manifest.thresholds);
    }

    #[test]
    fn test_known_checksum() {
        // CRC-32/ISO-HDLC check value.
        assert_eq!(checksum(b"123456789"), 0xCBF4_3926);
    }
}
