//! Lazy, compute-once null-stream engine over three detector channels.

use contracts::{DetectorChannel, NullStreamConfig, NullStreamError};
use tracing::{debug, instrument};

use crate::coeffs::{self, GurselTintoCoefficients};
use crate::interp::LinearInterpolant;

/// Monotonic counters exposed through [`NullStreamEngine::stats`].
///
/// Builds count expensive derivations; cache hits count repeat accesses
/// that returned an already-derived product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    pub interpolant_builds: u64,
    pub network_builds: u64,
    pub network_cache_hits: u64,
    pub et_builds: u64,
    pub et_cache_hits: u64,
}

/// Null-stream engine for one three-detector event.
///
/// Construction validates every channel and fails fast; all derived
/// products (coefficients, corrected strains, the two null streams) are
/// computed on first access and cached for the lifetime of the engine.
/// Detector 0 is the reference: its time axis is the output grid and its
/// delay must be zero.
pub struct NullStreamEngine {
    channels: [DetectorChannel; 3],
    config: NullStreamConfig,
    coefficients: Option<GurselTintoCoefficients>,
    corrected: Option<[Vec<f64>; 3]>,
    network: Option<Vec<f64>>,
    et: Option<Vec<f64>>,
    stats: EngineStats,
}

impl NullStreamEngine {
    /// Validates the channel triple and stores it without computing
    /// anything.
    pub fn new(
        channels: [DetectorChannel; 3],
        config: NullStreamConfig,
    ) -> Result<Self, NullStreamError> {
        for (index, channel) in channels.iter().enumerate() {
            channel.validate(index)?;
        }
        if channels[0].delay != 0.0 {
            return Err(NullStreamError::invalid_input(format!(
                "reference detector must have zero delay, got {}",
                channels[0].delay
            )));
        }
        if !(config.singular_epsilon > 0.0) {
            return Err(NullStreamError::invalid_input(
                "singular_epsilon must be positive",
            ));
        }
        Ok(Self {
            channels,
            config,
            coefficients: None,
            corrected: None,
            network: None,
            et: None,
            stats: EngineStats::default(),
        })
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    /// Time axis of the reference detector, which every derived stream
    /// lives on.
    pub fn reference_time(&self) -> &[f64] {
        &self.channels[0].time
    }

    /// Combination coefficients, solved on first call.
    pub fn coefficients(&mut self) -> Result<GurselTintoCoefficients, NullStreamError> {
        if let Some(cached) = self.coefficients {
            return Ok(cached);
        }
        let f_plus = [
            self.channels[0].f_plus,
            self.channels[1].f_plus,
            self.channels[2].f_plus,
        ];
        let f_cross = [
            self.channels[0].f_cross,
            self.channels[1].f_cross,
            self.channels[2].f_cross,
        ];
        let solved = match coeffs::solve(f_plus, f_cross, &self.config) {
            Ok(solved) => solved,
            Err(err) => {
                metrics::counter!("nullstream_engine_failures_total", "kind" => err.kind())
                    .increment(1);
                return Err(err);
            }
        };
        debug!(
            eta = solved.eta,
            xi = solved.xi,
            denominator = solved.denominator,
            "combination coefficients solved"
        );
        self.coefficients = Some(solved);
        Ok(solved)
    }

    /// Every channel delay-shifted onto the reference grid with its
    /// combination weight applied. Samples outside a channel's shifted
    /// coverage are zero.
    pub fn corrected_strain(&mut self) -> Result<&[Vec<f64>; 3], NullStreamError> {
        if self.corrected.is_none() {
            let built = self.build_corrected()?;
            self.corrected = Some(built);
        }
        Ok(self.corrected.get_or_insert_with(Default::default))
    }

    /// Sky-dependent null stream: the sum of the corrected channels.
    #[instrument(name = "network_null_stream", level = "debug", skip(self))]
    pub fn network_null_stream(&mut self) -> Result<&[f64], NullStreamError> {
        if self.network.is_some() {
            self.stats.network_cache_hits += 1;
        } else {
            if self.corrected.is_none() {
                let built = self.build_corrected()?;
                self.corrected = Some(built);
            }
            let mut stream = vec![0.0; self.channels[0].time.len()];
            if let Some(corrected) = self.corrected.as_ref() {
                for channel in corrected.iter() {
                    for (acc, value) in stream.iter_mut().zip(channel.iter()) {
                        *acc += value;
                    }
                }
            }
            let stream_rms = rms(&stream);
            metrics::counter!("nullstream_network_builds_total").increment(1);
            metrics::gauge!("nullstream_network_rms").set(stream_rms);
            debug!(
                samples = stream.len(),
                rms = stream_rms,
                "network null stream built"
            );
            self.network = Some(stream);
            self.stats.network_builds += 1;
        }
        Ok(self.network.get_or_insert_with(Default::default))
    }

    /// Sky-independent null stream: the raw sum of the three strains.
    ///
    /// Only meaningful for closed-geometry networks whose detector tensors
    /// sum to zero. Channels must share a sample count; the check runs on
    /// every call until it passes, so a mismatch keeps failing instead of
    /// being cached away.
    #[instrument(name = "et_null_stream", level = "debug", skip(self))]
    pub fn et_null_stream(&mut self) -> Result<&[f64], NullStreamError> {
        if self.et.is_some() {
            self.stats.et_cache_hits += 1;
        } else {
            let expected = self.channels[0].strain.len();
            for (index, channel) in self.channels.iter().enumerate().skip(1) {
                if channel.strain.len() != expected {
                    metrics::counter!("nullstream_engine_failures_total", "kind" => "shape_mismatch")
                        .increment(1);
                    return Err(NullStreamError::shape_mismatch(
                        index,
                        expected,
                        channel.strain.len(),
                    ));
                }
            }
            let mut stream = vec![0.0; expected];
            for channel in self.channels.iter() {
                for (acc, value) in stream.iter_mut().zip(channel.strain.iter()) {
                    *acc += value;
                }
            }
            let stream_rms = rms(&stream);
            metrics::counter!("nullstream_et_builds_total").increment(1);
            metrics::gauge!("nullstream_et_rms").set(stream_rms);
            debug!(
                samples = stream.len(),
                rms = stream_rms,
                "sky-independent null stream built"
            );
            self.et = Some(stream);
            self.stats.et_builds += 1;
        }
        Ok(self.et.get_or_insert_with(Default::default))
    }

    fn build_corrected(&mut self) -> Result<[Vec<f64>; 3], NullStreamError> {
        let weights = self.coefficients()?.weights();
        let mut built: [Vec<f64>; 3] = Default::default();
        let reference = &self.channels[0].time;
        for (index, channel) in self.channels.iter().enumerate() {
            let shifted: Vec<f64> = channel.time.iter().map(|t| t - channel.delay).collect();
            let scaled: Vec<f64> = channel
                .strain
                .iter()
                .map(|s| s * weights[index])
                .collect();
            let interpolant = LinearInterpolant::new(shifted, scaled, 0.0)?;
            built[index] = interpolant.sample(reference);
        }
        self.stats.interpolant_builds += 3;
        metrics::counter!("nullstream_interpolant_builds_total").increment(3);
        Ok(built)
    }
}

fn rms(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    (values.iter().map(|v| v * v).sum::<f64>() / values.len() as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_channel(strain: Vec<f64>, delay: f64, f_plus: f64, f_cross: f64) -> DetectorChannel {
        let time = (0..strain.len()).map(|i| i as f64).collect();
        DetectorChannel::new(strain, time, delay, f_plus, f_cross)
    }

    fn make_engine(channels: [DetectorChannel; 3]) -> NullStreamEngine {
        NullStreamEngine::new(channels, NullStreamConfig::default()).unwrap()
    }

    fn impulse(len: usize, at: usize) -> Vec<f64> {
        let mut strain = vec![0.0; len];
        strain[at] = 1.0;
        strain
    }

    #[test]
    fn test_impulse_event_is_cancelled() {
        let mut engine = make_engine([
            make_channel(impulse(100, 50), 0.0, 1.0, 0.0),
            make_channel(impulse(100, 50), 0.0, 1.0, 0.5),
            make_channel(impulse(100, 50), 0.0, 1.0, -0.5),
        ]);
        let coeffs = engine.coefficients().unwrap();
        assert!((coeffs.eta - 0.5).abs() < 1e-15);
        assert!((coeffs.xi - 0.5).abs() < 1e-15);

        let null = engine.network_null_stream().unwrap();
        assert_eq!(null.len(), 100);
        let residual = 1.0 - coeffs.eta - coeffs.xi;
        assert!((null[50] - residual).abs() < 1e-15);
        for (i, value) in null.iter().enumerate() {
            assert!(value.abs() < 1e-15, "sample {i} = {value}");
        }
    }

    #[test]
    fn test_zero_delay_identity() {
        let strains = [
            vec![0.1, -0.4, 0.9, 0.3],
            vec![1.5, 0.2, -0.7, 0.8],
            vec![-0.3, 0.6, 0.1, -1.2],
        ];
        let mut engine = make_engine([
            make_channel(strains[0].clone(), 0.0, 0.31, 0.58),
            make_channel(strains[1].clone(), 0.0, -0.72, 0.21),
            make_channel(strains[2].clone(), 0.0, 0.44, -0.63),
        ]);
        let weights = engine.coefficients().unwrap().weights();
        let corrected = engine.corrected_strain().unwrap().clone();
        for k in 0..3 {
            for (i, value) in corrected[k].iter().enumerate() {
                assert_eq!(
                    *value,
                    strains[k][i] * weights[k],
                    "detector {k} sample {i}"
                );
            }
        }
    }

    #[test]
    fn test_delay_correction_realigns_channels() {
        // Pure-plus 5 Hz tone sampled at 1 kHz, arriving at detectors 1
        // and 2 with fractional-sample delays.
        let rate = 1000.0;
        let n = 1000;
        let delays = [0.0, 0.0103, -0.0071];
        let f_plus = [0.31, -0.72, 0.44];
        let f_cross = [0.58, 0.21, -0.63];
        let h = |t: f64| (2.0 * std::f64::consts::PI * 5.0 * t).sin();

        let channels: Vec<DetectorChannel> = (0..3)
            .map(|k| {
                let time: Vec<f64> = (0..n).map(|i| i as f64 / rate).collect();
                let strain: Vec<f64> =
                    time.iter().map(|t| f_plus[k] * h(t - delays[k])).collect();
                DetectorChannel::new(strain, time, delays[k], f_plus[k], f_cross[k])
            })
            .collect();
        let mut engine = make_engine([
            channels[0].clone(),
            channels[1].clone(),
            channels[2].clone(),
        ]);

        let null = engine.network_null_stream().unwrap();
        // Skip the zero-filled edges introduced by the delay shifts.
        let interior = &null[20..n - 20];
        let peak = interior.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        assert!(peak < 2e-3, "residual peak {peak}");
    }

    #[test]
    fn test_et_null_stream_sums_raw_strains() {
        let mut engine = make_engine([
            make_channel(vec![1.0, 2.0], 0.0, 1.0, 0.0),
            make_channel(vec![10.0, 20.0], 0.0, 1.0, 0.5),
            make_channel(vec![100.0, 200.0], 0.0, 1.0, -0.5),
        ]);
        let et = engine.et_null_stream().unwrap();
        assert_eq!(et, &[111.0, 222.0]);
    }

    #[test]
    fn test_zero_strain_yields_zero_null_streams() {
        let mut engine = make_engine([
            make_channel(vec![0.0; 16], 0.0, 1.0, 0.0),
            make_channel(vec![0.0; 16], 0.0, 1.0, 0.5),
            make_channel(vec![0.0; 16], 0.0, 1.0, -0.5),
        ]);
        assert!(engine.network_null_stream().unwrap().iter().all(|v| *v == 0.0));
        assert!(engine.et_null_stream().unwrap().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_et_shape_mismatch_is_lazy_and_persistent() {
        let mut engine = make_engine([
            make_channel(vec![1.0, 2.0, 3.0], 0.0, 1.0, 0.0),
            make_channel(vec![1.0, 2.0, 3.0], 0.0, 1.0, 0.5),
            make_channel(vec![1.0, 2.0], 0.0, 1.0, -0.5),
        ]);
        // Construction succeeded; the mismatch only matters for the raw
        // sum.
        for _ in 0..2 {
            match engine.et_null_stream() {
                Err(NullStreamError::ShapeMismatch {
                    detector,
                    expected,
                    actual,
                }) => {
                    assert_eq!(detector, 2);
                    assert_eq!(expected, 3);
                    assert_eq!(actual, 2);
                }
                other => panic!("expected shape mismatch, got {other:?}"),
            }
        }
        // The sky-dependent stream resamples onto the reference grid and
        // is unaffected.
        assert!(engine.network_null_stream().is_ok());
        assert_eq!(engine.stats().et_builds, 0);
    }

    #[test]
    fn test_derivations_are_cached() {
        let mut engine = make_engine([
            make_channel(impulse(64, 10), 0.0, 0.31, 0.58),
            make_channel(impulse(64, 10), 0.0, -0.72, 0.21),
            make_channel(impulse(64, 10), 0.0, 0.44, -0.63),
        ]);
        let first = engine.network_null_stream().unwrap().to_vec();
        let second = engine.network_null_stream().unwrap().to_vec();
        assert_eq!(first, second);
        engine.et_null_stream().unwrap();
        engine.et_null_stream().unwrap();
        engine.corrected_strain().unwrap();

        let stats = engine.stats();
        assert_eq!(stats.interpolant_builds, 3);
        assert_eq!(stats.network_builds, 1);
        assert_eq!(stats.network_cache_hits, 1);
        assert_eq!(stats.et_builds, 1);
        assert_eq!(stats.et_cache_hits, 1);
    }

    #[test]
    fn test_singular_geometry_fails() {
        // Detector 2's responses are twice detector 1's.
        let mut engine = make_engine([
            make_channel(vec![0.0; 8], 0.0, 0.4, 0.2),
            make_channel(vec![0.0; 8], 0.0, 0.5, 0.3),
            make_channel(vec![0.0; 8], 0.0, 1.0, 0.6),
        ]);
        assert!(matches!(
            engine.coefficients(),
            Err(NullStreamError::SingularAntennaPattern { .. })
        ));
        assert!(matches!(
            engine.network_null_stream(),
            Err(NullStreamError::SingularAntennaPattern { .. })
        ));
        assert_eq!(engine.stats().interpolant_builds, 0);
    }

    #[test]
    fn test_reference_delay_must_be_zero() {
        let result = NullStreamEngine::new(
            [
                make_channel(vec![0.0; 4], 0.5, 1.0, 0.0),
                make_channel(vec![0.0; 4], 0.0, 1.0, 0.5),
                make_channel(vec![0.0; 4], 0.0, 1.0, -0.5),
            ],
            NullStreamConfig::default(),
        );
        match result {
            Err(NullStreamError::InvalidInput { reason }) => {
                assert!(reason.contains("reference"), "got: {reason}");
            }
            other => panic!("expected invalid input, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_construction_fails_fast_on_bad_channel() {
        let mut bad = make_channel(vec![1.0, 2.0, 3.0], 0.0, 1.0, -0.5);
        bad.time[2] = 0.5;
        let result = NullStreamEngine::new(
            [
                make_channel(vec![0.0; 3], 0.0, 1.0, 0.0),
                make_channel(vec![0.0; 3], 0.0, 1.0, 0.5),
                bad,
            ],
            NullStreamConfig::default(),
        );
        assert!(matches!(
            result,
            Err(NullStreamError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_uneven_grids_resample_onto_reference() {
        // Detector 1 samples twice as fast as the reference; a linear
        // ramp survives resampling exactly.
        let reference_time: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let fast_time: Vec<f64> = (0..19).map(|i| i as f64 * 0.5).collect();
        let ramp = |t: &f64| 2.0 * t + 1.0;
        let mut engine = make_engine([
            DetectorChannel::new(
                reference_time.iter().map(ramp).collect(),
                reference_time.clone(),
                0.0,
                1.0,
                0.0,
            ),
            DetectorChannel::new(fast_time.iter().map(ramp).collect(), fast_time, 0.0, 1.0, 0.5),
            DetectorChannel::new(
                reference_time.iter().map(ramp).collect(),
                reference_time,
                0.0,
                1.0,
                -0.5,
            ),
        ]);
        let null = engine.network_null_stream().unwrap();
        assert_eq!(null.len(), 10);
        for (i, value) in null.iter().enumerate() {
            assert!(value.abs() < 1e-12, "sample {i} = {value}");
        }
    }
}
