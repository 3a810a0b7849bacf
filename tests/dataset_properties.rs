// Faultgen - Integration Tests
//
// End-to-end properties of generated datasets, organized as:
// 1. Domains and re-derivation
// 2. Determinism
// 3. Label behaviour
// 4. Artifact round-trips

use approx::assert_abs_diff_eq;
use faultgen::label::FAULT_THRESHOLDS;
use faultgen::sampler::ValueRange;
use faultgen::{
    assign_label, generate_dataset, validate_dataset, Dataset, DatasetGenerator,
    DatasetManifest, DerivedFeatures, FaultStatus, FaultgenError, GeneratorConfig, Metric,
    RawMetrics, Regime, RegimeProfile, TelemetrySampler, TemporalFeatures,
};
use std::collections::HashSet;
use tempfile::tempdir;

fn reference() -> Dataset {
    generate_dataset(&GeneratorConfig::default()).unwrap()
}

// ============================================================================
// Domains and re-derivation
// ============================================================================

#[test]
fn test_reference_run_shape() {
    let dataset = reference();
    assert_eq!(dataset.len(), 10_000);

    let (start, end) = dataset.time_window().unwrap();
    assert_eq!((end - start).num_minutes(), 9_999);
}

#[test]
fn test_every_metric_within_domain() {
    let config = GeneratorConfig::new()
        .with_record_count(5_000)
        .with_fault_prior(0.5)
        .with_extreme_tail_fraction(0.5)
        .with_seed(3);
    for record in generate_dataset(&config).unwrap().records() {
        for (metric, value) in record.metrics().iter() {
            assert!(
                metric.domain().contains(value),
                "{} = {} out of domain",
                metric.column(),
                value
            );
        }
        assert!((0.0..=1.0).contains(&record.network_quality_score));
        assert!((0.0..=100.0).contains(&record.resource_stress));
    }
}

#[test]
fn test_stored_values_rederive() {
    for record in reference().records() {
        let metrics = record.metrics();
        assert_eq!(assign_label(&metrics), record.fault_status);

        let derived = DerivedFeatures::compute(&metrics);
        assert_abs_diff_eq!(
            derived.network_quality_score,
            record.network_quality_score,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            derived.resource_stress,
            record.resource_stress,
            epsilon = 1e-9
        );

        assert_eq!(
            TemporalFeatures::from_timestamp(&record.timestamp),
            record.temporal()
        );
    }
}

#[test]
fn test_reference_run_validates() {
    let report = validate_dataset(&reference());
    assert!(report.is_valid(), "{:?}", report.violations.first());
}

#[test]
fn test_identifiers_cover_pools() {
    let dataset = reference();
    let stations: HashSet<_> = dataset.records().iter().map(|r| &r.base_station_id).collect();
    let cells: HashSet<_> = dataset.records().iter().map(|r| &r.cell_id).collect();
    assert_eq!(stations.len(), 50);
    assert_eq!(cells.len(), 200);
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_same_seed_byte_identical() {
    let config = GeneratorConfig::new().with_record_count(2_000).with_seed(1234);
    let a = generate_dataset(&config).unwrap().to_csv_bytes().unwrap();
    let b = generate_dataset(&config).unwrap().to_csv_bytes().unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_different_seed_differs_but_validates() {
    let a = generate_dataset(&GeneratorConfig::new().with_record_count(500).with_seed(1)).unwrap();
    let b = generate_dataset(&GeneratorConfig::new().with_record_count(500).with_seed(2)).unwrap();
    assert_ne!(a.to_csv_bytes().unwrap(), b.to_csv_bytes().unwrap());
    assert!(validate_dataset(&a).is_valid());
    assert!(validate_dataset(&b).is_valid());
}

#[test]
fn test_prefix_stable_across_record_counts() {
    let short = generate_dataset(&GeneratorConfig::new().with_record_count(100)).unwrap();
    let long = generate_dataset(&GeneratorConfig::new().with_record_count(1_000)).unwrap();
    assert_eq!(short.records(), &long.records()[..100]);
}

// ============================================================================
// Label behaviour
// ============================================================================

#[test]
fn test_prevalence_tracks_prior() {
    let rate = reference().fault_rate();
    assert!((0.27..=0.33).contains(&rate), "fault rate {}", rate);
}

#[test]
fn test_forced_faulty_extreme_record() {
    let config = GeneratorConfig::new()
        .with_seed(42)
        .with_record_count(1)
        .with_fault_prior(1.0)
        .with_extreme_tail_fraction(1.0);
    let dataset = generate_dataset(&config).unwrap();
    let record = &dataset.records()[0];

    assert!(record.rssi_dbm <= -90.0);
    assert_eq!(record.fault_status, FaultStatus::Faulty);
    assert_eq!(assign_label(&record.metrics()), FaultStatus::Faulty);
}

#[test]
fn test_threshold_boundary_is_normal() {
    let metrics = RawMetrics {
        rssi_dbm: -85.0,
        sinr_db: 20.0,
        throughput_mbps: 100.0,
        latency_ms: 15.0,
        jitter_ms: 3.0,
        packet_loss_percent: 0.5,
        cpu_usage_percent: 50.0,
        memory_usage_percent: 50.0,
        active_users: 300,
        temperature_celsius: 40.0,
    };
    assert_eq!(assign_label(&metrics), FaultStatus::Normal);
}

#[test]
fn test_faulty_regime_can_be_labeled_normal() {
    // A mild faulty profile that never crosses a threshold.
    let mild = RegimeProfile {
        rssi_dbm: ValueRange::new(-84.0, -80.0),
        sinr_db: ValueRange::new(11.0, 14.0),
        throughput_mbps: ValueRange::new(55.0, 70.0),
        latency_ms: ValueRange::new(30.0, 45.0),
        jitter_ms: ValueRange::new(8.0, 12.0),
        packet_loss_percent: ValueRange::new(1.0, 2.5),
        ..RegimeProfile::faulty()
    };
    let config = GeneratorConfig::new()
        .with_record_count(200)
        .with_fault_prior(1.0)
        .with_extreme_tail_fraction(0.0);
    let sampler = TelemetrySampler::from_config(&config).with_profile(Regime::Faulty, mild);
    let generator = DatasetGenerator::new(config.clone())
        .unwrap()
        .with_sampler(sampler)
        .unwrap();

    for i in 0..200 {
        let generated = generator.generate_record(i).unwrap();
        assert_eq!(generated.regime, Regime::Faulty);
        assert_eq!(generated.record.fault_status, FaultStatus::Normal);
    }
}

#[test]
fn test_thresholds_reported_in_summary() {
    let summary = reference().summary();
    assert_eq!(summary.threshold_triggers.len(), FAULT_THRESHOLDS.len());
    let rssi = &summary.threshold_triggers[0];
    assert_eq!(rssi.column, Metric::RssiDbm.column());
    // Every faulty-regime record has RSSI at or below -90 dBm.
    assert!(rssi.count > 2_500);
    assert!(rssi.count <= summary.faulty_count);
}

#[test]
fn test_invalid_configs_rejected() {
    let cases = [
        GeneratorConfig::new().with_record_count(0),
        GeneratorConfig::new().with_fault_prior(-0.01),
        GeneratorConfig::new().with_extreme_tail_fraction(1.01),
        GeneratorConfig::new().with_pools(0, 200),
        GeneratorConfig::new().with_pools(50, 0),
    ];
    for config in cases {
        assert!(matches!(
            generate_dataset(&config),
            Err(FaultgenError::Configuration { .. })
        ));
    }
}

// ============================================================================
// Artifact round-trips
// ============================================================================

#[test]
fn test_csv_file_roundtrip_validates() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("synthetic_5g_fault_dataset.csv");
    let dataset = generate_dataset(&GeneratorConfig::new().with_record_count(1_000)).unwrap();
    dataset.to_csv(&path).unwrap();

    let loaded = Dataset::from_csv(&path).unwrap();
    assert_eq!(loaded.records(), dataset.records());
    assert!(validate_dataset(&loaded).is_valid());
}

#[test]
fn test_manifest_describes_artifact() {
    let dir = tempdir().unwrap();
    let config = GeneratorConfig::new().with_record_count(300);
    let dataset = generate_dataset(&config).unwrap();
    let bytes = dataset.to_csv_bytes().unwrap();

    let manifest = DatasetManifest::from_dataset("run", &dataset, &config)
        .unwrap()
        .with_csv_bytes(&bytes);
    let path = dir.path().join("run.manifest.json");
    manifest.to_json_file(&path).unwrap();

    let loaded = DatasetManifest::from_json_file(&path).unwrap();
    assert!(loaded.matches_csv(&bytes));
    assert_eq!(loaded.labels.faulty, dataset.faulty_count());
    assert_eq!(loaded.record_count, 300);
}
