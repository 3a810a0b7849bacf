// Faultgen - Synthetic 5G telemetry fault dataset generator
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Raw metric definitions and their global value domains.
//!
//! The domains double as clamp bounds for sampling and as min-max
//! anchors for the derived quality score.

use serde::{Deserialize, Serialize};

/// Closed value range `[min, max]` of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricDomain {
    pub min: f64,
    pub max: f64,
}

impl MetricDomain {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp a value into the domain.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Check whether a value lies inside the domain.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Min-max normalize into [0, 1], clamped.
    pub fn normalize(&self, value: f64) -> f64 {
        ((value - self.min) / self.span()).clamp(0.0, 1.0)
    }

    /// Width of the domain.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// The ten raw metrics carried by every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    RssiDbm,
    SinrDb,
    ThroughputMbps,
    LatencyMs,
    JitterMs,
    PacketLossPercent,
    CpuUsagePercent,
    MemoryUsagePercent,
    ActiveUsers,
    TemperatureCelsius,
}

impl Metric {
    /// All metrics, in artifact column order.
    pub const ALL: [Metric; 10] = [
        Metric::RssiDbm,
        Metric::SinrDb,
        Metric::ThroughputMbps,
        Metric::LatencyMs,
        Metric::JitterMs,
        Metric::PacketLossPercent,
        Metric::CpuUsagePercent,
        Metric::MemoryUsagePercent,
        Metric::ActiveUsers,
        Metric::TemperatureCelsius,
    ];

    /// Column name in the output table.
    pub fn column(&self) -> &'static str {
        match self {
            Metric::RssiDbm => "rssi_dbm",
            Metric::SinrDb => "sinr_db",
            Metric::ThroughputMbps => "throughput_mbps",
            Metric::LatencyMs => "latency_ms",
            Metric::JitterMs => "jitter_ms",
            Metric::PacketLossPercent => "packet_loss_percent",
            Metric::CpuUsagePercent => "cpu_usage_percent",
            Metric::MemoryUsagePercent => "memory_usage_percent",
            Metric::ActiveUsers => "active_users",
            Metric::TemperatureCelsius => "temperature_celsius",
        }
    }

    /// Unit of measurement.
    pub fn unit(&self) -> &'static str {
        match self {
            Metric::RssiDbm => "dBm",
            Metric::SinrDb => "dB",
            Metric::ThroughputMbps => "Mbps",
            Metric::LatencyMs | Metric::JitterMs => "ms",
            Metric::PacketLossPercent | Metric::CpuUsagePercent | Metric::MemoryUsagePercent => {
                "%"
            }
            Metric::ActiveUsers => "users",
            Metric::TemperatureCelsius => "°C",
        }
    }

    /// Global domain of the metric.
    pub fn domain(&self) -> MetricDomain {
        match self {
            Metric::RssiDbm => MetricDomain::new(-120.0, -30.0),
            Metric::SinrDb => MetricDomain::new(-10.0, 40.0),
            Metric::ThroughputMbps => MetricDomain::new(0.0, 200.0),
            Metric::LatencyMs => MetricDomain::new(0.0, 500.0),
            Metric::JitterMs => MetricDomain::new(0.0, 100.0),
            Metric::PacketLossPercent => MetricDomain::new(0.0, 100.0),
            Metric::CpuUsagePercent => MetricDomain::new(0.0, 100.0),
            Metric::MemoryUsagePercent => MetricDomain::new(0.0, 100.0),
            Metric::ActiveUsers => MetricDomain::new(0.0, 1000.0),
            Metric::TemperatureCelsius => MetricDomain::new(0.0, 100.0),
        }
    }
}

/// One record's raw metric group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawMetrics {
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
}

impl RawMetrics {
    /// Get a metric value as `f64`.
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::RssiDbm => self.rssi_dbm,
            Metric::SinrDb => self.sinr_db,
            Metric::ThroughputMbps => self.throughput_mbps,
            Metric::LatencyMs => self.latency_ms,
            Metric::JitterMs => self.jitter_ms,
            Metric::PacketLossPercent => self.packet_loss_percent,
            Metric::CpuUsagePercent => self.cpu_usage_percent,
            Metric::MemoryUsagePercent => self.memory_usage_percent,
            Metric::ActiveUsers => f64::from(self.active_users),
            Metric::TemperatureCelsius => self.temperature_celsius,
        }
    }

    /// Iterate over `(metric, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        Metric::ALL.iter().map(move |m| (*m, self.get(*m)))
    }

    /// Metrics that fall outside their global domain.
    pub fn out_of_domain(&self) -> Vec<Metric> {
        self.iter()
            .filter(|(m, v)| !m.domain().contains(*v))
            .map(|(m, _)| m)
            .collect()
    }
}
