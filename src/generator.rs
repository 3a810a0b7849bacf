// Faultgen - Synthetic 5G telemetry fault dataset generator
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Core dataset generation logic.
//!
//! Every record gets its own RNG seeded from the master seed and the
//! record index, so a record's content depends only on `(seed, index)`
//! and not on the order records are produced in.

use crate::config::GeneratorConfig;
use crate::dataset::{Dataset, DatasetMetadata, TelemetryRecord};
use crate::error::{FaultgenError, Result};
use crate::features::{DerivedFeatures, TemporalFeatures};
use crate::label::assign_label;
use crate::sampler::{Regime, TelemetrySampler};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use xxhash_rust::xxh64::xxh64;

/// Sub-seed of record `index` under `master_seed`.
pub fn record_seed(master_seed: u64, index: usize) -> u64 {
    xxh64(&(index as u64).to_le_bytes(), master_seed)
}

/// Independent RNG for record `index`.
pub fn record_rng(master_seed: u64, index: usize) -> StdRng {
    StdRng::seed_from_u64(record_seed(master_seed, index))
}

/// Base station identifier for a 1-based pool index.
pub fn base_station_id(n: u32) -> String {
    format!("BS_{:03}", n)
}

/// Cell identifier for a 1-based pool index.
pub fn cell_id(n: u32) -> String {
    format!("CELL_{:04}", n)
}

/// A record together with the hidden latents that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedRecord {
    pub record: TelemetryRecord,
    pub regime: Regime,
    pub extreme_tail: bool,
}

/// Validated generator.
#[derive(Debug, Clone)]
pub struct DatasetGenerator {
    config: GeneratorConfig,
    sampler: TelemetrySampler,
}

impl DatasetGenerator {
    /// Validate the configuration and build a generator.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        let sampler = TelemetrySampler::from_config(&config);
        Ok(Self { config, sampler })
    }

    /// Use a custom sampler (e.g. with modified regime profiles).
    pub fn with_sampler(mut self, sampler: TelemetrySampler) -> Result<Self> {
        sampler.validate()?;
        self.sampler = sampler;
        Ok(self)
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Produce record `index`.
    pub fn generate_record(&self, index: usize) -> Result<GeneratedRecord> {
        let timestamp = self.config.timestamp_at(index).ok_or_else(|| {
            FaultgenError::InvalidTimestamp(format!("record {} is outside the time range", index))
        })?;

        let mut rng = record_rng(self.config.seed, index);
        let base_station = rng.gen_range(1..=self.config.base_station_pool);
        let cell = rng.gen_range(1..=self.config.cell_pool);
        let sample = self.sampler.sample(&mut rng);

        let metrics = sample.metrics;
        let record = TelemetryRecord::assemble(
            timestamp,
            base_station_id(base_station),
            cell_id(cell),
            metrics,
            assign_label(&metrics),
            TemporalFeatures::from_timestamp(&timestamp),
            DerivedFeatures::compute(&metrics),
        );

        Ok(GeneratedRecord {
            record,
            regime: sample.regime,
            extreme_tail: sample.extreme_tail,
        })
    }

    /// Produce the full table.
    pub fn generate(&self) -> Result<Dataset> {
        info!(
            "Generating {} records (seed={}, fault_prior={}, tail={})",
            self.config.record_count,
            self.config.seed,
            self.config.fault_prior,
            self.config.extreme_tail_fraction
        );

        let mut dataset = Dataset::new();
        dataset.metadata = DatasetMetadata {
            name: None,
            description: None,
            seed: Some(self.config.seed),
        };

        let mut faulty_regime = 0usize;
        let mut tail = 0usize;
        let mut divergent = 0usize;

        for i in 0..self.config.record_count {
            let generated = self.generate_record(i)?;
            if generated.regime == Regime::Faulty {
                faulty_regime += 1;
            }
            if generated.extreme_tail {
                tail += 1;
            }
            if (generated.regime == Regime::Faulty) != generated.record.fault_status.is_faulty() {
                divergent += 1;
            }
            dataset.push(generated.record);
        }

        debug!(
            "Regime draws: {} faulty, {} extreme tail, {} label/regime mismatches",
            faulty_regime, tail, divergent
        );
        info!(
            "Generated {} records, {} labeled Faulty ({:.2}%)",
            dataset.len(),
            dataset.faulty_count(),
            dataset.fault_rate() * 100.0
        );

        Ok(dataset)
    }
}

/// Validate `config` and generate the full table.
pub fn generate_dataset(config: &GeneratorConfig) -> Result<Dataset> {
    DatasetGenerator::new(config.clone())?.generate()
}
