//! `validate` command implementation.

use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;
use crate::error::{CliError, Result};

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ScenarioSummary>,
}

#[derive(Serialize)]
struct ScenarioSummary {
    version: String,
    name: String,
    preset: String,
    sites: usize,
    samples: usize,
    rate_hz: f64,
    duration_s: f64,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating scenario");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| anyhow::anyhow!("Failed to serialize validation result: {e}"))?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        Err(CliError::validation_failed(result.config_path))
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    // Check file exists
    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    // Try to load and validate
    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(blueprint) => {
            let warnings = collect_warnings(&blueprint);
            let sites = blueprint.site_specs().map(|s| s.len()).unwrap_or(0);

            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ScenarioSummary {
                    version: format!("{:?}", blueprint.version),
                    name: blueprint.scenario.name.clone(),
                    preset: format!("{:?}", blueprint.network.preset),
                    sites,
                    samples: blueprint.segment_samples(),
                    rate_hz: blueprint.sampling.rate_hz,
                    duration_s: blueprint.sampling.duration_s,
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect scenario warnings (non-fatal issues)
fn collect_warnings(blueprint: &contracts::ScenarioBlueprint) -> Vec<String> {
    use contracts::WaveformKind;

    let mut warnings = Vec::new();

    // Unseeded noise is not reproducible
    if blueprint.injection.noise_sigma > 0.0 && blueprint.injection.seed.is_none() {
        warnings
            .push("injection.seed not set - noise realizations will differ between runs".to_string());
    }

    // Undersampled sine-Gaussian aliases
    if blueprint.injection.kind == WaveformKind::SineGaussian
        && blueprint.sampling.rate_hz < 2.0 * blueprint.injection.frequency_hz
    {
        warnings.push(format!(
            "sampling rate {} Hz is below the Nyquist rate for a {} Hz injection",
            blueprint.sampling.rate_hz, blueprint.injection.frequency_hz
        ));
    }

    // Injection outside the segment produces empty channels
    if blueprint.injection.center_s >= blueprint.sampling.duration_s {
        warnings.push(format!(
            "injection center {}s lies outside the {}s segment",
            blueprint.injection.center_s, blueprint.sampling.duration_s
        ));
    }

    if blueprint.injection.amplitude == 0.0 {
        warnings.push("injection amplitude is zero - channels carry noise only".to_string());
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Scenario is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Name: {}", summary.name);
            println!("  Network: {} ({} sites)", summary.preset, summary.sites);
            println!(
                "  Segment: {} samples @ {} Hz ({} s)",
                summary.samples, summary.rate_hz, summary.duration_s
            );
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Scenario is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
