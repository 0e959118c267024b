//! Waveform injection for synthetic detector channels.

use contracts::{InjectionConfig, NullStreamError, WaveformKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;
use tracing::info;

/// Sine-Gaussian burst: Gaussian envelope around `center` with a
/// cosine-phase plus polarization and a sine-phase cross polarization.
/// The envelope width follows `tau = q / (√2 π f)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SineGaussian {
    pub amplitude: f64,
    pub center: f64,
    pub frequency: f64,
    pub q: f64,
}

impl SineGaussian {
    fn tau(&self) -> f64 {
        self.q / (std::f64::consts::SQRT_2 * std::f64::consts::PI * self.frequency)
    }

    pub fn h_plus(&self, t: f64) -> f64 {
        let dt = t - self.center;
        let tau = self.tau();
        self.amplitude
            * (-dt * dt / (tau * tau)).exp()
            * (2.0 * std::f64::consts::PI * self.frequency * dt).cos()
    }

    pub fn h_cross(&self, t: f64) -> f64 {
        let dt = t - self.center;
        let tau = self.tau();
        self.amplitude
            * (-dt * dt / (tau * tau)).exp()
            * (2.0 * std::f64::consts::PI * self.frequency * dt).sin()
    }
}

/// Plus-polarized spike deposited on the sample nearest its center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impulse {
    pub amplitude: f64,
    pub center: f64,
}

/// Source waveform selected by a blueprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Waveform {
    SineGaussian(SineGaussian),
    Impulse(Impulse),
}

/// Projects a waveform onto detector channels, optionally adding seeded
/// white Gaussian noise.
pub struct Injector {
    waveform: Waveform,
    noise: Option<NoiseSource>,
}

struct NoiseSource {
    rng: StdRng,
    dist: Normal<f64>,
}

impl Injector {
    /// Builds an injector from the blueprint injection section. Waveform
    /// centers in the config are relative to the segment start. When no
    /// seed is given one is drawn and logged so a run can be replayed.
    pub fn from_config(config: &InjectionConfig, start_gps: f64) -> Result<Self, NullStreamError> {
        let center = start_gps + config.center_s;
        let waveform = match config.kind {
            WaveformKind::SineGaussian => Waveform::SineGaussian(SineGaussian {
                amplitude: config.amplitude,
                center,
                frequency: config.frequency_hz,
                q: config.q,
            }),
            WaveformKind::Impulse => Waveform::Impulse(Impulse {
                amplitude: config.amplitude,
                center,
            }),
        };
        let noise = if config.noise_sigma > 0.0 {
            let seed = config.seed.unwrap_or_else(|| {
                let drawn = rand::random::<u64>();
                info!(seed = drawn, "drew injection noise seed");
                drawn
            });
            let dist = Normal::new(0.0, config.noise_sigma).map_err(|e| {
                NullStreamError::invalid_input(format!("bad noise parameters: {e}"))
            })?;
            Some(NoiseSource {
                rng: StdRng::seed_from_u64(seed),
                dist,
            })
        } else {
            None
        };
        Ok(Self { waveform, noise })
    }

    /// Noiseless injector around a bare waveform.
    pub fn noiseless(waveform: Waveform) -> Self {
        Self {
            waveform,
            noise: None,
        }
    }

    pub fn waveform(&self) -> &Waveform {
        &self.waveform
    }

    /// Strain seen by one detector: the waveform shifted by the arrival
    /// delay, weighted by the antenna responses, plus any noise.
    pub fn project(&mut self, time: &[f64], f_plus: f64, f_cross: f64, delay: f64) -> Vec<f64> {
        let mut strain: Vec<f64> = match &self.waveform {
            Waveform::SineGaussian(w) => time
                .iter()
                .map(|&t| f_plus * w.h_plus(t - delay) + f_cross * w.h_cross(t - delay))
                .collect(),
            Waveform::Impulse(w) => {
                let mut spike = vec![0.0; time.len()];
                if let Some(index) = nearest_index(time, w.center + delay) {
                    spike[index] = f_plus * w.amplitude;
                }
                spike
            }
        };
        if let Some(noise) = &mut self.noise {
            for value in strain.iter_mut() {
                *value += noise.rng.sample(noise.dist);
            }
        }
        strain
    }
}

/// Index of the grid sample nearest to `target`, None when the target
/// falls outside the grid.
fn nearest_index(time: &[f64], target: f64) -> Option<usize> {
    let last = *time.last()?;
    if target < time[0] || target > last {
        return None;
    }
    let idx = time.partition_point(|&t| t <= target);
    if idx >= time.len() {
        return Some(time.len() - 1);
    }
    if target - time[idx - 1] <= time[idx] - target {
        Some(idx - 1)
    } else {
        Some(idx)
    }
}
