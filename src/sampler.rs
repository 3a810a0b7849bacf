// Faultgen - Synthetic 5G telemetry fault dataset generator
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Regime-conditional telemetry sampling.
//!
//! Each record first draws a hidden [`Regime`], then samples its ten raw
//! metrics from that regime's [`RegimeProfile`]. Metrics are not drawn
//! fully independently: within a regime,
//!
//! - throughput follows the RSSI/SINR position in their ranges,
//! - jitter and packet loss follow latency,
//! - CPU follows the active user count,
//! - temperature follows CPU.
//!
//! A fraction of faulty-regime records is pushed further into the tail
//! with a [`TailShift`]. Everything is clamped to the global metric
//! domains and rounded to two decimals.

use crate::config::GeneratorConfig;
use crate::domain::{Metric, RawMetrics};
use crate::error::{FaultgenError, Result};
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

/// Weight of the driving metric when blending a correlated position.
const RADIO_COUPLING: f64 = 0.6;
const LATENCY_COUPLING: f64 = 0.5;
const LOAD_COUPLING: f64 = 0.5;
const THERMAL_COUPLING: f64 = 0.5;

/// Hidden sampling mode of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Regime {
    Normal,
    Faulty,
}

impl Regime {
    /// Bernoulli draw with `P(Faulty) = fault_prior`.
    pub fn draw<R: Rng + ?Sized>(fault_prior: f64, rng: &mut R) -> Self {
        if rng.gen::<f64>() < fault_prior {
            Regime::Faulty
        } else {
            Regime::Normal
        }
    }
}

/// Closed sampling range `[low, high]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub low: f64,
    pub high: f64,
}

impl ValueRange {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Value at relative position `pos` in [0, 1].
    pub fn at(&self, pos: f64) -> f64 {
        self.low + (self.high - self.low) * pos
    }

    /// Uniform draw.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.at(rng.gen::<f64>())
    }

    /// Finite bounds with `low <= high`.
    pub fn is_ordered(&self) -> bool {
        self.low.is_finite() && self.high.is_finite() && self.low <= self.high
    }
}

fn check_range(parameter: &'static str, range: &ValueRange) -> Result<()> {
    if range.is_ordered() {
        Ok(())
    } else {
        Err(FaultgenError::config(
            parameter,
            format!("range [{}, {}] is not ordered", range.low, range.high),
        ))
    }
}

/// Gaussian jitter added on top of the radio metrics.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RadioNoise {
    pub rssi_std: f64,
    pub sinr_std: f64,
    pub throughput_std: f64,
}

/// Sampling parameters of one regime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeProfile {
    pub rssi_dbm: ValueRange,
    pub sinr_db: ValueRange,
    pub throughput_mbps: ValueRange,
    pub latency_ms: ValueRange,
    pub jitter_ms: ValueRange,
    pub packet_loss_percent: ValueRange,
    pub cpu_usage_percent: ValueRange,
    pub memory_usage_percent: ValueRange,
    pub active_users: (u32, u32),
    pub temperature_celsius: ValueRange,
    pub noise: RadioNoise,
    /// Exponent applied to uniform CPU/memory positions; below 1 skews high.
    pub load_skew: f64,
}

impl RegimeProfile {
    /// Healthy cell.
    pub fn normal() -> Self {
        Self {
            rssi_dbm: ValueRange::new(-70.0, -50.0),
            sinr_db: ValueRange::new(15.0, 30.0),
            throughput_mbps: ValueRange::new(80.0, 150.0),
            latency_ms: ValueRange::new(5.0, 20.0),
            jitter_ms: ValueRange::new(1.0, 5.0),
            packet_loss_percent: ValueRange::new(0.0, 1.0),
            cpu_usage_percent: ValueRange::new(20.0, 70.0),
            memory_usage_percent: ValueRange::new(30.0, 75.0),
            active_users: (50, 500),
            temperature_celsius: ValueRange::new(25.0, 50.0),
            noise: RadioNoise {
                rssi_std: 2.0,
                sinr_std: 1.0,
                throughput_std: 5.0,
            },
            load_skew: 1.0,
        }
    }

    /// Degraded cell.
    pub fn faulty() -> Self {
        Self {
            rssi_dbm: ValueRange::new(-110.0, -90.0),
            sinr_db: ValueRange::new(-5.0, 5.0),
            throughput_mbps: ValueRange::new(10.0, 40.0),
            latency_ms: ValueRange::new(80.0, 200.0),
            jitter_ms: ValueRange::new(20.0, 50.0),
            packet_loss_percent: ValueRange::new(5.0, 20.0),
            cpu_usage_percent: ValueRange::new(20.0, 95.0),
            memory_usage_percent: ValueRange::new(40.0, 95.0),
            active_users: (500, 1000),
            temperature_celsius: ValueRange::new(45.0, 85.0),
            noise: RadioNoise::default(),
            load_skew: 0.5,
        }
    }

    /// Reject inverted ranges, negative noise and a non-positive skew.
    pub fn validate(&self) -> Result<()> {
        check_range("rssi_dbm", &self.rssi_dbm)?;
        check_range("sinr_db", &self.sinr_db)?;
        check_range("throughput_mbps", &self.throughput_mbps)?;
        check_range("latency_ms", &self.latency_ms)?;
        check_range("jitter_ms", &self.jitter_ms)?;
        check_range("packet_loss_percent", &self.packet_loss_percent)?;
        check_range("cpu_usage_percent", &self.cpu_usage_percent)?;
        check_range("memory_usage_percent", &self.memory_usage_percent)?;
        check_range("temperature_celsius", &self.temperature_celsius)?;

        let (users_low, users_high) = self.active_users;
        if users_low > users_high {
            return Err(FaultgenError::config(
                "active_users",
                format!("range [{}, {}] is not ordered", users_low, users_high),
            ));
        }

        let noise = [
            self.noise.rssi_std,
            self.noise.sinr_std,
            self.noise.throughput_std,
        ];
        if noise.iter().any(|std| !(std.is_finite() && *std >= 0.0)) {
            return Err(FaultgenError::config(
                "noise",
                "standard deviations must be finite and non-negative",
            ));
        }

        if !(self.load_skew.is_finite() && self.load_skew > 0.0) {
            return Err(FaultgenError::config(
                "load_skew",
                format!("must be positive, got {}", self.load_skew),
            ));
        }
        Ok(())
    }
}

/// Extra degradation applied to extreme-tail records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TailShift {
    pub rssi_drop_db: ValueRange,
    pub latency_rise_ms: ValueRange,
    pub packet_loss_rise_percent: ValueRange,
}

impl Default for TailShift {
    fn default() -> Self {
        Self {
            rssi_drop_db: ValueRange::new(5.0, 15.0),
            latency_rise_ms: ValueRange::new(50.0, 100.0),
            packet_loss_rise_percent: ValueRange::new(5.0, 10.0),
        }
    }
}

impl TailShift {
    pub fn validate(&self) -> Result<()> {
        check_range("rssi_drop_db", &self.rssi_drop_db)?;
        check_range("latency_rise_ms", &self.latency_rise_ms)?;
        check_range("packet_loss_rise_percent", &self.packet_loss_rise_percent)
    }
}

/// One sampler draw: the hidden latents plus the observed metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetrySample {
    pub regime: Regime,
    pub extreme_tail: bool,
    pub metrics: RawMetrics,
}

/// Draws raw metric groups.
#[derive(Debug, Clone)]
pub struct TelemetrySampler {
    normal: RegimeProfile,
    faulty: RegimeProfile,
    tail: TailShift,
    fault_prior: f64,
    extreme_tail_fraction: f64,
}

impl TelemetrySampler {
    /// Sampler with the reference profiles.
    pub fn new(fault_prior: f64, extreme_tail_fraction: f64) -> Self {
        Self {
            normal: RegimeProfile::normal(),
            faulty: RegimeProfile::faulty(),
            tail: TailShift::default(),
            fault_prior,
            extreme_tail_fraction,
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(config.fault_prior, config.extreme_tail_fraction)
    }

    /// Replace the profile used for a regime.
    pub fn with_profile(mut self, regime: Regime, profile: RegimeProfile) -> Self {
        match regime {
            Regime::Normal => self.normal = profile,
            Regime::Faulty => self.faulty = profile,
        }
        self
    }

    pub fn with_tail_shift(mut self, tail: TailShift) -> Self {
        self.tail = tail;
        self
    }

    /// Check both profiles and the tail shift.
    pub fn validate(&self) -> Result<()> {
        self.normal.validate()?;
        self.faulty.validate()?;
        self.tail.validate()
    }

    pub fn profile(&self, regime: Regime) -> &RegimeProfile {
        match regime {
            Regime::Normal => &self.normal,
            Regime::Faulty => &self.faulty,
        }
    }

    /// Draw the regime, the tail flag and the metrics for one record.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> TelemetrySample {
        let regime = Regime::draw(self.fault_prior, rng);
        let extreme_tail =
            regime == Regime::Faulty && rng.gen::<f64>() < self.extreme_tail_fraction;
        let tail = extreme_tail.then_some(&self.tail);
        let metrics = sample_metrics(self.profile(regime), tail, rng);

        TelemetrySample {
            regime,
            extreme_tail,
            metrics,
        }
    }
}

/// Sample one metric group from a profile.
pub fn sample_metrics<R: Rng + ?Sized>(
    profile: &RegimeProfile,
    tail: Option<&TailShift>,
    rng: &mut R,
) -> RawMetrics {
    // Radio
    let rssi_pos = rng.gen::<f64>();
    let sinr_pos = rng.gen::<f64>();
    let radio_pos = (rssi_pos + sinr_pos) / 2.0;
    let mut rssi = profile.rssi_dbm.at(rssi_pos);
    let mut sinr = profile.sinr_db.at(sinr_pos);
    let mut throughput = profile
        .throughput_mbps
        .at(blend(radio_pos, rng.gen(), RADIO_COUPLING));

    // Transport
    let latency_pos = rng.gen::<f64>();
    let mut latency = profile.latency_ms.at(latency_pos);
    let jitter = profile
        .jitter_ms
        .at(blend(latency_pos, rng.gen(), LATENCY_COUPLING));
    let mut packet_loss = profile
        .packet_loss_percent
        .at(blend(latency_pos, rng.gen(), LATENCY_COUPLING));

    rssi += gaussian(profile.noise.rssi_std, rng);
    sinr += gaussian(profile.noise.sinr_std, rng);
    throughput += gaussian(profile.noise.throughput_std, rng);

    // Infrastructure
    let (a, b) = profile.active_users;
    let (users_low, users_high) = (a.min(b), a.max(b));
    let users_pos = rng.gen::<f64>();
    let active_users = users_low + ((users_high - users_low) as f64 * users_pos).round() as u32;
    let cpu_pos = blend(
        users_pos,
        rng.gen::<f64>().powf(profile.load_skew),
        LOAD_COUPLING,
    );
    let cpu = profile.cpu_usage_percent.at(cpu_pos);
    let memory = profile
        .memory_usage_percent
        .at(rng.gen::<f64>().powf(profile.load_skew));
    let temperature = profile
        .temperature_celsius
        .at(blend(cpu_pos, rng.gen(), THERMAL_COUPLING));

    if let Some(shift) = tail {
        rssi -= shift.rssi_drop_db.sample(rng);
        latency += shift.latency_rise_ms.sample(rng);
        packet_loss += shift.packet_loss_rise_percent.sample(rng);
    }

    let fit = |metric: Metric, value: f64| round2(metric.domain().clamp(value));

    RawMetrics {
        rssi_dbm: fit(Metric::RssiDbm, rssi),
        sinr_db: fit(Metric::SinrDb, sinr),
        throughput_mbps: fit(Metric::ThroughputMbps, throughput),
        latency_ms: fit(Metric::LatencyMs, latency),
        jitter_ms: fit(Metric::JitterMs, jitter),
        packet_loss_percent: fit(Metric::PacketLossPercent, packet_loss),
        cpu_usage_percent: fit(Metric::CpuUsagePercent, cpu),
        memory_usage_percent: fit(Metric::MemoryUsagePercent, memory),
        active_users: Metric::ActiveUsers.domain().clamp(f64::from(active_users)) as u32,
        temperature_celsius: fit(Metric::TemperatureCelsius, temperature),
    }
}

/// Mix a driving position with an independent one.
fn blend(driver: f64, independent: f64, coupling: f64) -> f64 {
    coupling * driver + (1.0 - coupling) * independent
}

fn gaussian<R: Rng + ?Sized>(std: f64, rng: &mut R) -> f64 {
    if std > 0.0 {
        std * rng.sample::<f64, _>(StandardNormal)
    } else {
        0.0
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
