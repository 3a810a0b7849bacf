// Faultgen - Synthetic 5G telemetry fault dataset generator
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Dataset structures and I/O operations.
//!
//! Provides the flat [`TelemetryRecord`] row and the [`Dataset`] table that
//! is written to (and read back from) the CSV artifact.

use crate::domain::{Metric, RawMetrics};
use crate::error::{FaultgenError, Result};
use crate::features::{DerivedFeatures, TemporalFeatures};
use crate::label::{FaultStatus, FAULT_THRESHOLDS};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Column order of the artifact.
pub const COLUMNS: [&str; 19] = [
    "timestamp",
    "base_station_id",
    "cell_id",
    "rssi_dbm",
    "sinr_db",
    "throughput_mbps",
    "latency_ms",
    "jitter_ms",
    "packet_loss_percent",
    "cpu_usage_percent",
    "memory_usage_percent",
    "active_users",
    "temperature_celsius",
    "fault_status",
    "hour",
    "day_of_week",
    "is_peak_hour",
    "network_quality_score",
    "resource_stress",
];

/// One row of the dataset.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    pub base_station_id: String,
    pub cell_id: String,
    pub rssi_dbm: f64,
    pub sinr_db: f64,
    pub throughput_mbps: f64,
    pub latency_ms: f64,
    pub jitter_ms: f64,
    pub packet_loss_percent: f64,
    pub cpu_usage_percent: f64,
    pub memory_usage_percent: f64,
    pub active_users: u32,
    pub temperature_celsius: f64,
    pub fault_status: FaultStatus,
    pub hour: u32,
    pub day_of_week: u32,
    #[serde(with = "flag")]
    pub is_peak_hour: bool,
    pub network_quality_score: f64,
    pub resource_stress: f64,
}

impl TelemetryRecord {
    /// Merge identifiers, metrics, label and features into one row.
    pub fn assemble(
        timestamp: NaiveDateTime,
        base_station_id: String,
        cell_id: String,
        metrics: RawMetrics,
        fault_status: FaultStatus,
        temporal: TemporalFeatures,
        derived: DerivedFeatures,
    ) -> Self {
        Self {
            timestamp,
            base_station_id,
            cell_id,
            rssi_dbm: metrics.rssi_dbm,
            sinr_db: metrics.sinr_db,
            throughput_mbps: metrics.throughput_mbps,
            latency_ms: metrics.latency_ms,
            jitter_ms: metrics.jitter_ms,
            packet_loss_percent: metrics.packet_loss_percent,
            cpu_usage_percent: metrics.cpu_usage_percent,
            memory_usage_percent: metrics.memory_usage_percent,
            active_users: metrics.active_users,
            temperature_celsius: metrics.temperature_celsius,
            fault_status,
            hour: temporal.hour,
            day_of_week: temporal.day_of_week,
            is_peak_hour: temporal.is_peak_hour,
            network_quality_score: derived.network_quality_score,
            resource_stress: derived.resource_stress,
        }
    }

    /// The raw metric group of this row.
    pub fn metrics(&self) -> RawMetrics {
        RawMetrics {
            rssi_dbm: self.rssi_dbm,
            sinr_db: self.sinr_db,
            throughput_mbps: self.throughput_mbps,
            latency_ms: self.latency_ms,
            jitter_ms: self.jitter_ms,
            packet_loss_percent: self.packet_loss_percent,
            cpu_usage_percent: self.cpu_usage_percent,
            memory_usage_percent: self.memory_usage_percent,
            active_users: self.active_users,
            temperature_celsius: self.temperature_celsius,
        }
    }

    /// Stored temporal features.
    pub fn temporal(&self) -> TemporalFeatures {
        TemporalFeatures {
            hour: self.hour,
            day_of_week: self.day_of_week,
            is_peak_hour: self.is_peak_hour,
        }
    }

    /// Stored derived features.
    pub fn derived(&self) -> DerivedFeatures {
        DerivedFeatures {
            network_quality_score: self.network_quality_score,
            resource_stress: self.resource_stress,
        }
    }
}

/// Dataset metadata. Not part of the CSV; carried into the manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetMetadata {
    /// Dataset name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Generation seed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// A generated telemetry table.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<TelemetryRecord>,
    pub metadata: DatasetMetadata,
}

impl Dataset {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dataset from rows.
    pub fn from_records(records: Vec<TelemetryRecord>) -> Self {
        Self {
            records,
            metadata: DatasetMetadata::default(),
        }
    }

    /// Append a row.
    pub fn push(&mut self, record: TelemetryRecord) {
        self.records.push(record);
    }

    /// Get all rows.
    pub fn records(&self) -> &[TelemetryRecord] {
        &self.records
    }

    /// Mutable access to rows.
    pub fn records_mut(&mut self) -> &mut [TelemetryRecord] {
        &mut self.records
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Set name.
    pub fn with_name(mut self, name: &str) -> Self {
        self.metadata.name = Some(name.to_string());
        self
    }

    /// Set description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.metadata.description = Some(description.to_string());
        self
    }

    /// First and last timestamp.
    pub fn time_window(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((self.records.first()?.timestamp, self.records.last()?.timestamp))
    }

    /// Values of one raw metric column.
    pub fn column(&self, metric: Metric) -> Vec<f64> {
        self.records.iter().map(|r| r.metrics().get(metric)).collect()
    }

    /// Number of rows labeled `Faulty`.
    pub fn faulty_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.fault_status.is_faulty())
            .count()
    }

    /// Share of rows labeled `Faulty`.
    pub fn fault_rate(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        self.faulty_count() as f64 / self.records.len() as f64
    }

    /// Write as CSV to any writer.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        if self.records.is_empty() {
            csv_writer.write_record(COLUMNS)?;
        }
        for record in &self.records {
            csv_writer.serialize(record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Render the CSV artifact in memory.
    pub fn to_csv_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(buf)
    }

    /// Export to CSV file.
    pub fn to_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        self.write_csv(BufWriter::new(file))
    }

    /// Read CSV rows from any reader.
    pub fn read_csv<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        if let Some(missing) = COLUMNS.iter().find(|c| !headers.iter().any(|h| h == **c)) {
            return Err(FaultgenError::MissingColumn(missing.to_string()));
        }

        let records = csv_reader
            .deserialize()
            .collect::<std::result::Result<Vec<TelemetryRecord>, _>>()?;
        if records.is_empty() {
            return Err(FaultgenError::Empty);
        }
        Ok(Self::from_records(records))
    }

    /// Import from CSV file.
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::read_csv(BufReader::new(file))
    }

    /// Label prevalence and per-column statistics.
    pub fn summary(&self) -> DatasetSummary {
        let faulty_count = self.faulty_count();

        let threshold_triggers = FAULT_THRESHOLDS
            .iter()
            .map(|t| {
                let count = self
                    .records
                    .iter()
                    .filter(|r| t.fires(r.metrics().get(t.metric)))
                    .count();
                ThresholdCount {
                    column: t.metric.column().to_string(),
                    count,
                }
            })
            .collect();

        let mut columns: Vec<ColumnStats> = Metric::ALL
            .iter()
            .filter_map(|m| ColumnStats::compute(m.column(), &self.column(*m)))
            .collect();
        let quality: Vec<f64> = self.records.iter().map(|r| r.network_quality_score).collect();
        let stress: Vec<f64> = self.records.iter().map(|r| r.resource_stress).collect();
        columns.extend(ColumnStats::compute("network_quality_score", &quality));
        columns.extend(ColumnStats::compute("resource_stress", &stress));

        DatasetSummary {
            record_count: self.records.len(),
            normal_count: self.records.len() - faulty_count,
            faulty_count,
            fault_rate: self.fault_rate(),
            threshold_triggers,
            columns,
        }
    }
}

/// How many rows crossed a given threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdCount {
    pub column: String,
    pub count: usize,
}

/// Basic statistics for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl ColumnStats {
    /// Returns `None` for an empty column.
    pub fn compute(column: &str, values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            column: column.to_string(),
            count,
            mean,
            std_dev: variance.sqrt(),
            min,
            max,
        })
    }
}

/// Summary of a generated (or loaded) dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub record_count: usize,
    pub normal_count: usize,
    pub faulty_count: usize,
    pub fault_rate: f64,
    pub threshold_triggers: Vec<ThresholdCount>,
    pub columns: Vec<ColumnStats>,
}

/// `YYYY-MM-DD HH:MM:SS`, the format downstream readers parse.
mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(
        ts: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&ts.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Booleans written as `1` / `0`.
mod flag {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match u8::deserialize(deserializer)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(de::Error::custom(format!("expected 0 or 1, got {}", other))),
        }
    }
}
