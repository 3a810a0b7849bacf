// Faultgen - Synthetic 5G telemetry fault dataset generator
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Rule-based fault labeling.
//!
//! A record is `Faulty` when any one of six threshold predicates fires.
//! The rule only looks at the observed metrics, never at the regime the
//! sampler used, so faulty-regime records can still come out `Normal`.
//! Comparisons are strict: a value sitting exactly on a threshold does
//! not trigger it.

use crate::domain::{Metric, RawMetrics};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Observable ground-truth label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaultStatus {
    Normal,
    Faulty,
}

impl FaultStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FaultStatus::Normal => "Normal",
            FaultStatus::Faulty => "Faulty",
        }
    }

    pub fn is_faulty(&self) -> bool {
        matches!(self, FaultStatus::Faulty)
    }
}

impl fmt::Display for FaultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FaultStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Normal" => Ok(FaultStatus::Normal),
            "Faulty" => Ok(FaultStatus::Faulty),
            other => Err(format!("unknown fault status: {}", other)),
        }
    }
}

/// Direction of a threshold comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    /// Fires when `value < limit`.
    Below,
    /// Fires when `value > limit`.
    Above,
}

/// One labeling predicate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub metric: Metric,
    pub comparison: Comparison,
    pub limit: f64,
}

impl Threshold {
    const fn below(metric: Metric, limit: f64) -> Self {
        Self {
            metric,
            comparison: Comparison::Below,
            limit,
        }
    }

    const fn above(metric: Metric, limit: f64) -> Self {
        Self {
            metric,
            comparison: Comparison::Above,
            limit,
        }
    }

    /// Whether this predicate fires for `value`.
    pub fn fires(&self, value: f64) -> bool {
        match self.comparison {
            Comparison::Below => value < self.limit,
            Comparison::Above => value > self.limit,
        }
    }
}

/// The six fault thresholds.
pub static FAULT_THRESHOLDS: [Threshold; 6] = [
    Threshold::below(Metric::RssiDbm, -85.0),
    Threshold::below(Metric::SinrDb, 10.0),
    Threshold::below(Metric::ThroughputMbps, 50.0),
    Threshold::above(Metric::LatencyMs, 50.0),
    Threshold::above(Metric::JitterMs, 15.0),
    Threshold::above(Metric::PacketLossPercent, 3.0),
];

/// Label a record from its raw metrics.
pub fn assign_label(metrics: &RawMetrics) -> FaultStatus {
    if FAULT_THRESHOLDS
        .iter()
        .any(|t| t.fires(metrics.get(t.metric)))
    {
        FaultStatus::Faulty
    } else {
        FaultStatus::Normal
    }
}

/// Thresholds that fire for a record, in table order.
pub fn triggered_thresholds(metrics: &RawMetrics) -> impl Iterator<Item = &'static Threshold> + '_ {
    FAULT_THRESHOLDS
        .iter()
        .filter(move |t| t.fires(metrics.get(t.metric)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nominal() -> RawMetrics {
        RawMetrics {
            rssi_dbm: -60.0,
            sinr_db: 22.0,
            throughput_mbps: 110.0,
            latency_ms: 12.0,
            jitter_ms: 3.0,
            packet_loss_percent: 0.4,
            cpu_usage_percent: 45.0,
            memory_usage_percent: 50.0,
            active_users: 200,
            temperature_celsius: 35.0,
        }
    }

    #[test]
    fn test_nominal_is_normal() {
        assert_eq!(assign_label(&nominal()), FaultStatus::Normal);
        assert_eq!(triggered_thresholds(&nominal()).count(), 0);
    }

    #[test]
    fn test_rssi_boundary_is_strict() {
        let mut m = nominal();
        m.rssi_dbm = -85.0;
        assert_eq!(assign_label(&m), FaultStatus::Normal);
        m.rssi_dbm = -85.01;
        assert_eq!(assign_label(&m), FaultStatus::Faulty);
    }

    #[test]
    fn test_upper_boundaries_are_strict() {
        let mut m = nominal();
        m.latency_ms = 50.0;
        m.jitter_ms = 15.0;
        m.packet_loss_percent = 3.0;
        m.sinr_db = 10.0;
        m.throughput_mbps = 50.0;
        assert_eq!(assign_label(&m), FaultStatus::Normal);
    }

    #[test]
    fn test_each_threshold_alone_is_sufficient() {
        let cases: [fn(&mut RawMetrics); 6] = [
            |m: &mut RawMetrics| m.rssi_dbm = -95.0,
            |m: &mut RawMetrics| m.sinr_db = 2.0,
            |m: &mut RawMetrics| m.throughput_mbps = 20.0,
            |m: &mut RawMetrics| m.latency_ms = 120.0,
            |m: &mut RawMetrics| m.jitter_ms = 30.0,
            |m: &mut RawMetrics| m.packet_loss_percent = 8.0,
        ];
        for (i, apply) in cases.iter().enumerate() {
            let mut m = nominal();
            apply(&mut m);
            assert_eq!(assign_label(&m), FaultStatus::Faulty, "case {}", i);
            let fired: Vec<_> = triggered_thresholds(&m).collect();
            assert_eq!(fired.len(), 1);
            assert_eq!(fired[0].metric, FAULT_THRESHOLDS[i].metric);
        }
    }

    #[test]
    fn test_infrastructure_metrics_do_not_label() {
        let mut m = nominal();
        m.cpu_usage_percent = 99.0;
        m.memory_usage_percent = 99.0;
        m.active_users = 1000;
        m.temperature_celsius = 85.0;
        assert_eq!(assign_label(&m), FaultStatus::Normal);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("Faulty".parse::<FaultStatus>(), Ok(FaultStatus::Faulty));
        assert_eq!(FaultStatus::Normal.to_string(), "Normal");
        assert!("faulty".parse::<FaultStatus>().is_err());
    }
}
