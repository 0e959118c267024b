//! Three-detector networks and channel assembly.

use contracts::{DetectorChannel, NullStreamError, ScenarioBlueprint, SiteSpec, SkyConfig};
use tracing::{debug, instrument};

use crate::antenna;
use crate::geometry::DetectorGeometry;
use crate::injection::Injector;

/// A named interferometer site.
#[derive(Debug, Clone)]
pub struct DetectorSite {
    pub name: String,
    pub geometry: DetectorGeometry,
}

impl DetectorSite {
    pub fn from_spec(spec: &SiteSpec) -> Self {
        Self {
            name: spec.name.clone(),
            geometry: DetectorGeometry::from_geodetic(
                spec.latitude_deg,
                spec.longitude_deg,
                spec.elevation_m,
                spec.x_azimuth_deg,
                spec.y_azimuth_deg,
                spec.x_tilt_deg,
                spec.y_tilt_deg,
            ),
        }
    }
}

/// Ordered three-detector network. Index 0 is the reference detector all
/// arrival delays are measured against.
#[derive(Debug, Clone)]
pub struct DetectorNetwork {
    sites: [DetectorSite; 3],
}

impl DetectorNetwork {
    pub fn new(sites: [DetectorSite; 3]) -> Self {
        Self { sites }
    }

    /// Resolves a blueprint's network section into concrete geometry.
    pub fn from_blueprint(blueprint: &ScenarioBlueprint) -> Result<Self, NullStreamError> {
        let specs: [SiteSpec; 3] = blueprint.site_specs()?.try_into().map_err(|_| {
            NullStreamError::invalid_input("network must resolve to exactly 3 sites")
        })?;
        Ok(Self::new(specs.map(|spec| DetectorSite::from_spec(&spec))))
    }

    /// Idealized triangle observatory: three co-located detectors whose
    /// 60°-opening arm pairs are rotated by 120° against each other, so
    /// the detector tensors sum to zero.
    pub fn equilateral_triangle(
        latitude_deg: f64,
        longitude_deg: f64,
        elevation_m: f64,
        orientation_deg: f64,
    ) -> Self {
        let site = |k: usize| {
            let x_azimuth = orientation_deg + 120.0 * k as f64;
            DetectorSite {
                name: format!("E{}", k + 1),
                geometry: DetectorGeometry::from_geodetic(
                    latitude_deg,
                    longitude_deg,
                    elevation_m,
                    x_azimuth,
                    x_azimuth + 60.0,
                    0.0,
                    0.0,
                ),
            }
        };
        Self::new([site(0), site(1), site(2)])
    }

    pub fn sites(&self) -> &[DetectorSite; 3] {
        &self.sites
    }

    /// Plus/cross responses of all three detectors toward a sky position.
    pub fn antenna_responses(&self, sky: &SkyConfig) -> [(f64, f64); 3] {
        [0, 1, 2].map(|k| {
            antenna::antenna_response(
                &self.sites[k].geometry,
                sky.ra_rad,
                sky.dec_rad,
                sky.psi_rad,
                sky.gps_time,
            )
        })
    }

    /// Arrival delays of all three detectors relative to the reference.
    pub fn time_delays(&self, sky: &SkyConfig) -> [f64; 3] {
        [0, 1, 2].map(|k| {
            antenna::time_delay_from_reference(
                &self.sites[k].geometry,
                &self.sites[0].geometry,
                sky.ra_rad,
                sky.dec_rad,
                sky.gps_time,
            )
        })
    }

    /// Assembles the channel triple for one injected event on a shared
    /// sampling grid.
    #[instrument(name = "assemble_channels", level = "debug", skip(self, injector))]
    pub fn channels(
        &self,
        sky: &SkyConfig,
        injector: &mut Injector,
        start_gps: f64,
        rate_hz: f64,
        samples: usize,
    ) -> Result<[DetectorChannel; 3], NullStreamError> {
        if samples == 0 {
            return Err(NullStreamError::invalid_input("sampling segment is empty"));
        }
        if !(rate_hz > 0.0) {
            return Err(NullStreamError::invalid_input(
                "sample rate must be positive",
            ));
        }
        let responses = self.antenna_responses(sky);
        let delays = self.time_delays(sky);
        let time: Vec<f64> = (0..samples)
            .map(|i| start_gps + i as f64 / rate_hz)
            .collect();
        debug!(
            reference = %self.sites[0].name,
            delays = ?delays,
            "assembling detector channels"
        );
        Ok([0, 1, 2].map(|k| {
            let (f_plus, f_cross) = responses[k];
            let strain = injector.project(&time, f_plus, f_cross, delays[k]);
            DetectorChannel::new(strain, time.clone(), delays[k], f_plus, f_cross)
        }))
    }
}
