//! `info` command implementation.

use detector_network::DetectorNetwork;
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;
use crate::error::{CliError, Result};

/// Scenario info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    version: String,
    name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    description: String,
    network: NetworkInfo,
    sky: SkyInfo,
    injection: InjectionInfo,
    sampling: SamplingInfo,
}

#[derive(Serialize)]
struct NetworkInfo {
    preset: String,
    arm_length_m: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sites: Vec<SiteInfo>,
}

#[derive(Serialize)]
struct SiteInfo {
    name: String,
    latitude_deg: f64,
    longitude_deg: f64,
    elevation_m: f64,
    x_azimuth_deg: f64,
    y_azimuth_deg: f64,
}

#[derive(Serialize)]
struct SkyInfo {
    ra_rad: f64,
    dec_rad: f64,
    psi_rad: f64,
    gps_time: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    responses: Vec<ResponseInfo>,
}

#[derive(Serialize)]
struct ResponseInfo {
    name: String,
    f_plus: f64,
    f_cross: f64,
    delay_s: f64,
}

#[derive(Serialize)]
struct InjectionInfo {
    kind: String,
    amplitude: f64,
    frequency_hz: f64,
    q: f64,
    center_s: f64,
    noise_sigma: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
}

#[derive(Serialize)]
struct SamplingInfo {
    rate_hz: f64,
    duration_s: f64,
    samples: usize,
    start_gps: f64,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading scenario info");

    if !args.config.exists() {
        return Err(CliError::config_not_found(args.config.display().to_string()));
    }

    let blueprint = config_loader::ConfigLoader::load_from_path(&args.config)?;
    let info = build_config_info(&blueprint, args)?;

    if args.json {
        let json = serde_json::to_string_pretty(&info)
            .map_err(|e| anyhow::anyhow!("Failed to serialize scenario info: {e}"))?;
        println!("{}", json);
    } else {
        print_config_info(&info, args);
    }

    Ok(())
}

fn build_config_info(
    blueprint: &contracts::ScenarioBlueprint,
    args: &InfoArgs,
) -> Result<ConfigInfo> {
    let sites = if args.sites {
        blueprint
            .site_specs()?
            .iter()
            .map(|s| SiteInfo {
                name: s.name.clone(),
                latitude_deg: s.latitude_deg,
                longitude_deg: s.longitude_deg,
                elevation_m: s.elevation_m,
                x_azimuth_deg: s.x_azimuth_deg,
                y_azimuth_deg: s.y_azimuth_deg,
            })
            .collect()
    } else {
        Vec::new()
    };

    let responses = if args.sky {
        let network = DetectorNetwork::from_blueprint(blueprint)?;
        let patterns = network.antenna_responses(&blueprint.sky);
        let delays = network.time_delays(&blueprint.sky);

        network
            .sites()
            .iter()
            .zip(patterns.iter().zip(delays.iter()))
            .map(|(site, (&(f_plus, f_cross), &delay_s))| ResponseInfo {
                name: site.name.clone(),
                f_plus,
                f_cross,
                delay_s,
            })
            .collect()
    } else {
        Vec::new()
    };

    Ok(ConfigInfo {
        version: format!("{:?}", blueprint.version),
        name: blueprint.scenario.name.clone(),
        description: blueprint.scenario.description.clone(),
        network: NetworkInfo {
            preset: format!("{:?}", blueprint.network.preset),
            arm_length_m: blueprint.network.arm_length_m,
            sites,
        },
        sky: SkyInfo {
            ra_rad: blueprint.sky.ra_rad,
            dec_rad: blueprint.sky.dec_rad,
            psi_rad: blueprint.sky.psi_rad,
            gps_time: blueprint.sky.gps_time,
            responses,
        },
        injection: InjectionInfo {
            kind: format!("{:?}", blueprint.injection.kind),
            amplitude: blueprint.injection.amplitude,
            frequency_hz: blueprint.injection.frequency_hz,
            q: blueprint.injection.q,
            center_s: blueprint.injection.center_s,
            noise_sigma: blueprint.injection.noise_sigma,
            seed: blueprint.injection.seed,
        },
        sampling: SamplingInfo {
            rate_hz: blueprint.sampling.rate_hz,
            duration_s: blueprint.sampling.duration_s,
            samples: blueprint.segment_samples(),
            start_gps: blueprint.sampling.start_gps,
        },
    })
}

fn print_config_info(info: &ConfigInfo, args: &InfoArgs) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                     Null Stream Scenario                     ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    // Scenario
    println!("📍 Scenario");
    println!("   ├─ Version: {}", info.version);
    if info.description.is_empty() {
        println!("   └─ Name: {}", info.name);
    } else {
        println!("   ├─ Name: {}", info.name);
        println!("   └─ Description: {}", info.description);
    }

    // Network
    println!("\n🔭 Network ({})", info.network.preset);
    println!("   ├─ Arm length: {} m", info.network.arm_length_m);
    if args.sites && !info.network.sites.is_empty() {
        println!("   └─ Sites ({}):", info.network.sites.len());
        for (i, site) in info.network.sites.iter().enumerate() {
            let prefix = if i == info.network.sites.len() - 1 {
                "└─"
            } else {
                "├─"
            };
            println!(
                "      {} {} (lat {:.4}°, lon {:.4}°, x-az {:.1}°, y-az {:.1}°)",
                prefix, site.name, site.latitude_deg, site.longitude_deg, site.x_azimuth_deg,
                site.y_azimuth_deg
            );
        }
    } else {
        println!("   └─ 3 sites");
    }

    // Sky position
    println!("\n📡 Sky");
    println!("   ├─ RA: {:.4} rad", info.sky.ra_rad);
    println!("   ├─ Dec: {:.4} rad", info.sky.dec_rad);
    println!("   ├─ Psi: {:.4} rad", info.sky.psi_rad);
    if info.sky.responses.is_empty() {
        println!("   └─ GPS time: {:.1}", info.sky.gps_time);
    } else {
        println!("   ├─ GPS time: {:.1}", info.sky.gps_time);
        println!("   └─ Responses:");
        for (i, response) in info.sky.responses.iter().enumerate() {
            let prefix = if i == info.sky.responses.len() - 1 {
                "└─"
            } else {
                "├─"
            };
            println!(
                "      {} {}: F+ = {:+.6}, Fx = {:+.6}, delay = {:+.3e} s",
                prefix, response.name, response.f_plus, response.f_cross, response.delay_s
            );
        }
    }

    // Injection
    println!("\n📈 Injection ({})", info.injection.kind);
    println!("   ├─ Amplitude: {:e}", info.injection.amplitude);
    println!("   ├─ Frequency: {} Hz", info.injection.frequency_hz);
    println!("   ├─ Q: {}", info.injection.q);
    println!("   ├─ Center: {} s", info.injection.center_s);
    match info.injection.seed {
        Some(seed) => {
            println!("   ├─ Noise sigma: {:e}", info.injection.noise_sigma);
            println!("   └─ Seed: {}", seed);
        }
        None => {
            println!("   └─ Noise sigma: {:e}", info.injection.noise_sigma);
        }
    }

    // Sampling
    println!("\n⚙️  Sampling");
    println!("   ├─ Rate: {} Hz", info.sampling.rate_hz);
    println!("   ├─ Duration: {} s", info.sampling.duration_s);
    println!("   ├─ Samples: {}", info.sampling.samples);
    println!("   └─ Start GPS: {:.1}", info.sampling.start_gps);

    println!();
}
