//! `run` command implementation.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use crate::pipeline::{Pipeline, PipelineConfig, PipelineStats};

/// Per-run result for JSON output
#[derive(Serialize)]
struct RunOutput {
    run_index: u64,
    samples: usize,
    eta: f64,
    xi: f64,
    denominator: f64,
    network_rms: f64,
    et_rms: f64,
    injected_rms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    network_suppression: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    et_suppression: Option<f64>,
}

impl From<&observability::NullRunRecord> for RunOutput {
    fn from(record: &observability::NullRunRecord) -> Self {
        Self {
            run_index: record.run_index,
            samples: record.samples,
            eta: record.eta,
            xi: record.xi,
            denominator: record.denominator,
            network_rms: record.network_rms,
            et_rms: record.et_rms,
            injected_rms: record.injected_rms,
            network_suppression: record.network_suppression(),
            et_suppression: record.et_suppression(),
        }
    }
}

/// Execute the `run` command
pub fn run_pipeline(args: &RunArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading scenario");

    // Validate config path
    if !args.config.exists() {
        return Err(CliError::config_not_found(args.config.display().to_string()));
    }

    // Load and parse the scenario
    let mut blueprint = config_loader::ConfigLoader::load_from_path(&args.config)?;

    // Apply CLI overrides
    if let Some(duration) = args.duration {
        info!(duration_s = duration, "Overriding segment duration from CLI");
        blueprint.sampling.duration_s = duration;
    }
    if let Some(rate) = args.sample_rate {
        info!(rate_hz = rate, "Overriding sample rate from CLI");
        blueprint.sampling.rate_hz = rate;
    }
    if let Some(seed) = args.seed {
        info!(seed = seed, "Overriding noise seed from CLI");
        blueprint.injection.seed = Some(seed);
    }

    // Re-validate after overrides
    config_loader::validate(&blueprint)?;

    info!(
        name = %blueprint.scenario.name,
        preset = ?blueprint.network.preset,
        samples = blueprint.segment_samples(),
        runs = args.runs,
        "Scenario loaded"
    );

    // Dry run - just validate and exit
    if args.dry_run {
        info!("Dry run mode - scenario is valid, exiting");
        print_scenario_summary(&blueprint);
        return Ok(());
    }

    // Build pipeline configuration
    let base_seed = blueprint.injection.seed;
    let pipeline_config = PipelineConfig {
        blueprint,
        runs: args.runs.max(1),
        base_seed,
        metrics_port: if args.metrics_port == 0 {
            None
        } else {
            Some(args.metrics_port)
        },
    };

    // Create and run pipeline
    let pipeline = Pipeline::new(pipeline_config);

    info!("Starting pipeline...");
    let stats = pipeline.run()?;

    info!(
        runs = stats.completed_runs,
        duration_secs = stats.duration.as_secs_f64(),
        "Pipeline completed successfully"
    );

    // Print detailed statistics
    stats.print_summary();

    // Write per-run records if requested
    if let Some(ref path) = args.output {
        write_run_records(path, &stats)?;
        info!(path = %path.display(), "Run records written");
    }

    info!("Null stream pipeline finished");
    Ok(())
}

/// Write per-run records as pretty JSON
fn write_run_records(path: &Path, stats: &PipelineStats) -> Result<()> {
    let outputs: Vec<RunOutput> = stats.records.iter().map(RunOutput::from).collect();
    let json = serde_json::to_string_pretty(&outputs)
        .map_err(|e| anyhow::anyhow!("Failed to serialize run records: {e}"))?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Print scenario summary for dry-run mode
fn print_scenario_summary(blueprint: &contracts::ScenarioBlueprint) {
    println!("\n=== Scenario Summary ===\n");
    println!("Scenario:");
    println!("  Name: {}", blueprint.scenario.name);
    if !blueprint.scenario.description.is_empty() {
        println!("  Description: {}", blueprint.scenario.description);
    }

    println!("\nNetwork ({:?}):", blueprint.network.preset);
    if let Ok(sites) = blueprint.site_specs() {
        for site in &sites {
            println!(
                "  - {} (lat {:.4}°, lon {:.4}°, x-az {:.1}°)",
                site.name, site.latitude_deg, site.longitude_deg, site.x_azimuth_deg
            );
        }
    }

    println!("\nSky:");
    println!(
        "  RA {:.4} rad, Dec {:.4} rad, Psi {:.4} rad @ GPS {:.1}",
        blueprint.sky.ra_rad, blueprint.sky.dec_rad, blueprint.sky.psi_rad, blueprint.sky.gps_time
    );

    println!("\nInjection ({:?}):", blueprint.injection.kind);
    println!(
        "  amplitude {:e}, {} Hz, Q {}, center {} s, noise sigma {:e}",
        blueprint.injection.amplitude,
        blueprint.injection.frequency_hz,
        blueprint.injection.q,
        blueprint.injection.center_s,
        blueprint.injection.noise_sigma
    );

    println!("\nSampling:");
    println!(
        "  {} samples @ {} Hz over {} s",
        blueprint.segment_samples(),
        blueprint.sampling.rate_hz,
        blueprint.sampling.duration_s
    );

    println!();
}
