//! Example: Generate the reference 5G fault dataset.
//!
//! Run with: cargo run --example reference_dataset

use faultgen::{generate_dataset, validate_dataset, DatasetManifest, GeneratorConfig};

fn main() {
    println!("5G Testbed Synthetic Dataset Generator");
    println!("======================================\n");

    let config = GeneratorConfig::default();
    println!("Generating {} samples...", config.record_count);

    let dataset = match generate_dataset(&config) {
        Ok(d) => d
            .with_name("synthetic_5g_fault_dataset")
            .with_description("Reference run"),
        Err(e) => {
            eprintln!("  Error: {}", e);
            return;
        }
    };

    let summary = dataset.summary();
    println!("\nFault distribution:");
    println!("  Normal  {}", summary.normal_count);
    println!("  Faulty  {}", summary.faulty_count);
    println!("  Fault percentage: {:.2}%", summary.fault_rate * 100.0);

    let report = validate_dataset(&dataset);
    println!(
        "\nValidation: {} records, {} violations",
        report.records_checked,
        report.violations.len()
    );

    if let Err(e) = std::fs::create_dir_all("data") {
        eprintln!("  Warning: Could not create data/: {}", e);
        return;
    }

    let csv_path = "data/synthetic_5g_fault_dataset.csv";
    let bytes = match dataset.to_csv_bytes() {
        Ok(b) => b,
        Err(e) => {
            eprintln!("  Error: {}", e);
            return;
        }
    };
    if let Err(e) = std::fs::write(csv_path, &bytes) {
        eprintln!("  Warning: Could not save {}: {}", csv_path, e);
    } else {
        println!("\nCreated {}", csv_path);
    }

    match DatasetManifest::describe(&dataset, &config) {
        Ok(manifest) => {
            let manifest = manifest.with_csv_bytes(&bytes);
            let manifest_path = "data/synthetic_5g_fault_dataset.manifest.json";
            if let Err(e) = manifest.to_json_file(manifest_path) {
                eprintln!("  Warning: Could not save manifest: {}", e);
            } else {
                println!("Created {}", manifest_path);
            }
        }
        Err(e) => eprintln!("  Warning: Could not build manifest: {}", e),
    }

    println!("\nColumn statistics:");
    for c in &summary.columns {
        println!(
            "  {:<24} mean {:>9.2}  std {:>8.2}  min {:>9.2}  max {:>9.2}",
            c.column, c.mean, c.std_dev, c.min, c.max
        );
    }
}
