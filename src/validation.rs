// Faultgen - Synthetic 5G telemetry fault dataset generator
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Consistency checks for a generated or loaded table.
//!
//! Re-derives everything that is a function of other columns (label,
//! derived scores, calendar features) and compares it with what is
//! stored, checks value domains and checks the fixed timestamp spacing.

use crate::config::SAMPLE_INTERVAL_MINUTES;
use crate::dataset::{Dataset, TelemetryRecord};
use crate::features::{DerivedFeatures, TemporalFeatures};
use crate::label::{assign_label, FaultStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Absolute tolerance for recomputed floating-point features.
pub const FEATURE_TOLERANCE: f64 = 1e-9;

/// Kind of inconsistency found in a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    /// Numeric value outside its domain.
    OutOfDomain { column: String, value: f64 },
    /// Stored label differs from the threshold rule.
    LabelMismatch {
        stored: FaultStatus,
        expected: FaultStatus,
    },
    /// Stored derived score differs from its recomputation.
    DerivedMismatch {
        column: String,
        stored: f64,
        expected: f64,
    },
    /// Stored calendar feature differs from the timestamp.
    TemporalMismatch { column: String },
    /// Gap to the previous row is not one interval.
    TimestampSpacing { gap_seconds: i64 },
}

/// One inconsistency, with its 0-based row index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub row: usize,
    #[serde(flatten)]
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: ", self.row)?;
        match &self.kind {
            ViolationKind::OutOfDomain { column, value } => {
                write!(f, "{} = {} is outside its domain", column, value)
            }
            ViolationKind::LabelMismatch { stored, expected } => {
                write!(f, "fault_status is {} but thresholds give {}", stored, expected)
            }
            ViolationKind::DerivedMismatch {
                column,
                stored,
                expected,
            } => write!(f, "{} is {} but recomputes to {}", column, stored, expected),
            ViolationKind::TemporalMismatch { column } => {
                write!(f, "{} does not match the timestamp", column)
            }
            ViolationKind::TimestampSpacing { gap_seconds } => {
                write!(f, "timestamp gap of {}s to previous row", gap_seconds)
            }
        }
    }
}

/// Result of validating a dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub records_checked: usize,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Check every row of `dataset`.
pub fn validate_dataset(dataset: &Dataset) -> ValidationReport {
    let mut report = ValidationReport {
        records_checked: dataset.len(),
        violations: Vec::new(),
    };

    let mut previous: Option<&TelemetryRecord> = None;
    for (row, record) in dataset.records().iter().enumerate() {
        for kind in check_record(record) {
            report.violations.push(Violation { row, kind });
        }

        if let Some(prev) = previous {
            let gap = (record.timestamp - prev.timestamp).num_seconds();
            if gap != SAMPLE_INTERVAL_MINUTES * 60 {
                report.violations.push(Violation {
                    row,
                    kind: ViolationKind::TimestampSpacing { gap_seconds: gap },
                });
            }
        }
        previous = Some(record);
    }

    report
}

/// Row-local checks.
pub fn check_record(record: &TelemetryRecord) -> Vec<ViolationKind> {
    let mut found = Vec::new();
    let metrics = record.metrics();

    for (metric, value) in metrics.iter() {
        if !metric.domain().contains(value) {
            found.push(ViolationKind::OutOfDomain {
                column: metric.column().to_string(),
                value,
            });
        }
    }

    let expected = assign_label(&metrics);
    if expected != record.fault_status {
        found.push(ViolationKind::LabelMismatch {
            stored: record.fault_status,
            expected,
        });
    }

    let stored = record.derived();
    let derived = DerivedFeatures::compute(&metrics);
    for (column, stored, expected) in [
        (
            "network_quality_score",
            stored.network_quality_score,
            derived.network_quality_score,
        ),
        (
            "resource_stress",
            stored.resource_stress,
            derived.resource_stress,
        ),
    ] {
        if (stored - expected).abs() > FEATURE_TOLERANCE {
            found.push(ViolationKind::DerivedMismatch {
                column: column.to_string(),
                stored,
                expected,
            });
        }
    }

    let stored = record.temporal();
    let temporal = TemporalFeatures::from_timestamp(&record.timestamp);
    if stored.hour != temporal.hour {
        found.push(ViolationKind::TemporalMismatch {
            column: "hour".to_string(),
        });
    }
    if stored.day_of_week != temporal.day_of_week {
        found.push(ViolationKind::TemporalMismatch {
            column: "day_of_week".to_string(),
        });
    }
    if stored.is_peak_hour != temporal.is_peak_hour {
        found.push(ViolationKind::TemporalMismatch {
            column: "is_peak_hour".to_string(),
        });
    }

    found
}
