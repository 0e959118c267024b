//! Antenna response and geometric arrival delays.
//!
//! Sky positions are equatorial (right ascension, declination) with a
//! polarization angle, all in radians. The Earth-fixed source direction
//! is obtained through the Greenwich hour angle `gha = gmst − ra`.

use nalgebra::{Matrix3, Vector3};

use crate::geometry::{DetectorGeometry, SPEED_OF_LIGHT};
use crate::sidereal::gmst_rad;

/// Plus and cross responses of one detector toward a sky position at a
/// GPS epoch.
pub fn antenna_response(
    geometry: &DetectorGeometry,
    ra: f64,
    dec: f64,
    psi: f64,
    gps_time: f64,
) -> (f64, f64) {
    let gha = gmst_rad(gps_time) - ra;
    polarization_response(&geometry.tensor, gha, dec, psi)
}

/// Contracts the detector tensor against the polarization basis vectors.
fn polarization_response(tensor: &Matrix3<f64>, gha: f64, dec: f64, psi: f64) -> (f64, f64) {
    let x = Vector3::new(
        -psi.cos() * gha.sin() - psi.sin() * gha.cos() * dec.sin(),
        -psi.cos() * gha.cos() + psi.sin() * gha.sin() * dec.sin(),
        psi.sin() * dec.cos(),
    );
    let y = Vector3::new(
        psi.sin() * gha.sin() - psi.cos() * gha.cos() * dec.sin(),
        psi.sin() * gha.cos() + psi.cos() * gha.sin() * dec.sin(),
        psi.cos() * dec.cos(),
    );
    let dx = tensor * x;
    let dy = tensor * y;
    (x.dot(&dx) - y.dot(&dy), x.dot(&dy) + y.dot(&dx))
}

/// Unit vector from the geocentre toward the source, in Earth-fixed
/// coordinates at the given epoch.
pub fn line_of_sight(ra: f64, dec: f64, gps_time: f64) -> Vector3<f64> {
    let gha = gmst_rad(gps_time) - ra;
    Vector3::new(dec.cos() * gha.cos(), -dec.cos() * gha.sin(), dec.sin())
}

/// Arrival-time difference `t_det − t_ref` in seconds for a plane wave
/// from the given sky position.
pub fn time_delay_from_reference(
    detector: &DetectorGeometry,
    reference: &DetectorGeometry,
    ra: f64,
    dec: f64,
    gps_time: f64,
) -> f64 {
    let sight = line_of_sight(ra, dec, gps_time);
    (reference.vertex - detector.vertex).dot(&sight) / SPEED_OF_LIGHT
}
