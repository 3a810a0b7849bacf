// Faultgen - Synthetic 5G telemetry fault dataset generator
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # Faultgen
//!
//! Synthetic 5G network telemetry with rule-based fault labels.
//!
//! Each record is produced in four stages:
//!
//! - **Sampling**: a hidden Normal/Faulty regime is drawn, then ten raw
//!   radio, transport and infrastructure metrics are sampled from that
//!   regime's ranges with cross-metric correlation
//! - **Labeling**: `fault_status` is computed from six thresholds on the
//!   observed metrics, independently of the regime
//! - **Derived features**: `network_quality_score`, `resource_stress` and
//!   calendar features
//! - **Assembly**: identifiers and a timestamp are attached and the row is
//!   appended to the table
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use faultgen::{generate_dataset, GeneratorConfig};
//!
//! let config = GeneratorConfig::new()
//!     .with_record_count(10_000)
//!     .with_fault_prior(0.3)
//!     .with_seed(42);
//!
//! let dataset = generate_dataset(&config).unwrap();
//! dataset.to_csv("synthetic_5g_fault_dataset.csv").unwrap();
//! ```
//!
//! ## Determinism
//!
//! Each record draws from its own RNG seeded from the master seed and the
//! record index, so the same configuration always yields byte-identical
//! CSV output.

pub mod config;
pub mod dataset;
pub mod domain;
pub mod error;
pub mod features;
pub mod generator;
pub mod label;
pub mod manifest;
pub mod sampler;
pub mod validation;

// Re-exports for convenience
pub use config::GeneratorConfig;
pub use dataset::{Dataset, DatasetSummary, TelemetryRecord};
pub use domain::{Metric, MetricDomain, RawMetrics};
pub use error::{FaultgenError, Result};
pub use features::{DerivedFeatures, TemporalFeatures};
pub use generator::{generate_dataset, DatasetGenerator, GeneratedRecord};
pub use label::{assign_label, FaultStatus};
pub use manifest::DatasetManifest;
pub use sampler::{Regime, RegimeProfile, TelemetrySampler};
pub use validation::{validate_dataset, ValidationReport};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
