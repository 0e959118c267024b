//! Pipeline orchestrator - coordinates network, injection, and engine.
//!
//! One run builds the three detector channels from the scenario, feeds
//! them through the null stream engine, and produces a result record.
//! Multiple runs reuse the same network and advance the noise seed.

use std::time::Instant;

use contracts::{DetectorChannel, NullStreamError, ScenarioBlueprint};
use detector_network::{ChannelSource, SyntheticSource};
use null_engine::NullStreamEngine;
use observability::{
    record_channel_built, record_failure, record_run_duration_ms, record_run_metrics,
    NullRunRecord,
};
use tracing::{info, warn};

use super::PipelineStats;
use crate::error::Result;

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// The scenario blueprint
    pub blueprint: ScenarioBlueprint,

    /// Number of runs to perform
    pub runs: u64,

    /// Base noise seed (None = fresh randomness per run)
    pub base_seed: Option<u64>,

    /// Metrics server port (None = disabled)
    pub metrics_port: Option<u16>,
}

/// Main pipeline orchestrator
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline with the given configuration
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline to completion
    pub fn run(self) -> Result<PipelineStats> {
        let start_time = Instant::now();
        let blueprint = &self.config.blueprint;

        // Initialize Metrics (optional)
        if let Some(port) = self.config.metrics_port {
            observability::init_metrics_only(port)?;
            info!("Metrics endpoint available on port {}", port);
        }

        // Build the detector network and channel source
        info!(preset = ?blueprint.network.preset, "Building detector network...");
        let mut source = SyntheticSource::from_blueprint(blueprint)?;
        info!(source = %source.describe(), "Channel source ready");

        let mut stats = PipelineStats {
            samples_per_run: blueprint.segment_samples(),
            active_sites: source.network().sites().len(),
            ..Default::default()
        };

        for run_index in 0..self.config.runs {
            if let Some(base) = self.config.base_seed {
                source.set_seed(base.wrapping_add(run_index));
            }

            let run_start = Instant::now();
            match run_once(&mut source, blueprint, run_index) {
                Ok(record) => {
                    record_run_metrics(&record);
                    record_run_duration_ms(run_start.elapsed().as_secs_f64() * 1000.0);
                    stats.metrics.update(&record);
                    stats.completed_runs += 1;

                    info!(
                        run = run_index,
                        eta = format!("{:.6}", record.eta),
                        xi = format!("{:.6}", record.xi),
                        network_rms = format!("{:.3e}", record.network_rms),
                        et_rms = format!("{:.3e}", record.et_rms),
                        "Null stream formed"
                    );

                    stats.records.push(record);
                }
                Err(e) => {
                    record_failure(&e);
                    stats.metrics.record_failure(&e);
                    warn!(run = run_index, error = %e, "Run failed");
                    return Err(e.into());
                }
            }
        }

        stats.duration = start_time.elapsed();

        info!(
            runs = stats.completed_runs,
            duration_secs = stats.duration.as_secs_f64(),
            "Pipeline complete"
        );

        Ok(stats)
    }
}

/// Build channels for one run and form both null streams
fn run_once(
    source: &mut SyntheticSource,
    blueprint: &ScenarioBlueprint,
    run_index: u64,
) -> std::result::Result<NullRunRecord, NullStreamError> {
    let channels = source.channels()?;

    let injected_rms = combined_rms(&channels);
    for (site, channel) in source.network().sites().iter().zip(channels.iter()) {
        record_channel_built(&site.name, channel.samples());
    }

    let samples = channels[0].samples();
    let mut engine = NullStreamEngine::new(channels, blueprint.to_engine_config())?;

    let coefficients = engine.coefficients()?;
    let network_rms = rms(engine.network_null_stream()?);
    let et_rms = rms(engine.et_null_stream()?);

    Ok(NullRunRecord {
        run_index,
        samples,
        eta: coefficients.eta,
        xi: coefficients.xi,
        denominator: coefficients.denominator,
        network_rms,
        et_rms,
        injected_rms,
    })
}

/// RMS over the concatenated strain of all three channels
fn combined_rms(channels: &[DetectorChannel; 3]) -> f64 {
    let total: usize = channels.iter().map(|c| c.samples()).sum();
    if total == 0 {
        return 0.0;
    }
    let sum_squares: f64 = channels
        .iter()
        .flat_map(|c| c.strain.iter())
        .map(|s| s * s)
        .sum();
    (sum_squares / total as f64).sqrt()
}

fn rms(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_squares: f64 = samples.iter().map(|s| s * s).sum();
    (sum_squares / samples.len() as f64).sqrt()
}
