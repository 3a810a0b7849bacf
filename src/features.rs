// Faultgen - Synthetic 5G telemetry fault dataset generator
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Derived and temporal features.
//!
//! All functions here are pure and total over their input domains.

use crate::domain::{Metric, RawMetrics};
use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Weight of each of the five quality sub-scores.
pub const QUALITY_WEIGHT: f64 = 0.2;

/// First and last hour (inclusive) counted as peak.
pub const PEAK_HOURS: (u32, u32) = (9, 17);

/// Composite scores computed from the raw metric group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedFeatures {
    pub network_quality_score: f64,
    pub resource_stress: f64,
}

impl DerivedFeatures {
    pub fn compute(metrics: &RawMetrics) -> Self {
        Self {
            network_quality_score: network_quality_score(metrics),
            resource_stress: resource_stress(metrics),
        }
    }
}

/// Calendar features of a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalFeatures {
    pub hour: u32,
    /// Monday = 0 .. Sunday = 6.
    pub day_of_week: u32,
    pub is_peak_hour: bool,
}

impl TemporalFeatures {
    pub fn from_timestamp(ts: &NaiveDateTime) -> Self {
        let hour = ts.hour();
        Self {
            hour,
            day_of_week: ts.weekday().num_days_from_monday(),
            is_peak_hour: is_peak_hour(hour),
        }
    }
}

pub fn is_peak_hour(hour: u32) -> bool {
    (PEAK_HOURS.0..=PEAK_HOURS.1).contains(&hour)
}

/// Weighted average of five normalized sub-scores, in [0, 1].
///
/// RSSI, SINR and throughput score higher when larger; latency and
/// packet loss score higher when smaller. Each metric is min-max
/// normalized over its global domain (see [`Metric::domain`]).
pub fn network_quality_score(m: &RawMetrics) -> f64 {
    let norm = |metric: Metric| metric.domain().normalize(m.get(metric));

    let score = QUALITY_WEIGHT * norm(Metric::RssiDbm)
        + QUALITY_WEIGHT * norm(Metric::SinrDb)
        + QUALITY_WEIGHT * norm(Metric::ThroughputMbps)
        + QUALITY_WEIGHT * (1.0 - norm(Metric::LatencyMs))
        + QUALITY_WEIGHT * (1.0 - norm(Metric::PacketLossPercent));

    score.clamp(0.0, 1.0)
}

/// Mean of CPU and memory utilization.
pub fn resource_stress(m: &RawMetrics) -> f64 {
    (m.cpu_usage_percent + m.memory_usage_percent) / 2.0
}
