//! Pipeline statistics and result records.

use std::time::Duration;

use observability::{NullMetricsAggregator, NullRunRecord};

/// Statistics from a pipeline run
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    /// Runs that produced a null stream
    pub completed_runs: u64,

    /// Samples per channel in each run
    pub samples_per_run: usize,

    /// Detector sites in the network
    pub active_sites: usize,

    /// Total duration of the pipeline run
    pub duration: Duration,

    /// Aggregated run metrics
    pub metrics: NullMetricsAggregator,

    /// Per-run result records, in run order
    pub records: Vec<NullRunRecord>,
}

impl PipelineStats {
    /// Calculate runs per second throughput
    pub fn runs_per_second(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.completed_runs as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                    Null Stream Statistics                    ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");

        println!("📊 Overview");
        println!("   ├─ Duration: {:.2}s", self.duration.as_secs_f64());
        println!("   ├─ Runs completed: {}", self.completed_runs);
        println!("   ├─ Runs/s: {:.2}", self.runs_per_second());
        println!("   ├─ Samples per run: {}", self.samples_per_run);
        println!("   └─ Detector sites: {}", self.active_sites);

        let summary = self.metrics.summary();

        println!("\n📈 Null Stream Metrics");
        println!("   ├─ Network null RMS: {}", summary.network_rms);
        println!("   ├─ ET null RMS: {}", summary.et_rms);
        println!("   ├─ Network suppression: {}", summary.network_suppression);
        println!("   ├─ ET suppression: {}", summary.et_suppression);
        println!("   └─ Denominator: {}", summary.denominator);

        if !summary.failure_counts.is_empty() {
            println!("\n⚠️  Failure Counts");
            for (kind, count) in &summary.failure_counts {
                println!("   ├─ {}: {}", kind, count);
            }
        }

        println!();
    }
}
