//! Interferometer geometry on the WGS-84 ellipsoid.

use nalgebra::{Matrix3, Vector3};

/// WGS-84 semi-major axis, metres.
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS-84 semi-minor axis, metres.
pub const WGS84_B: f64 = 6_356_752.314;
/// Speed of light in vacuum, m/s.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Fixed geometry of one interferometer: geocentric vertex, arm
/// directions and the long-wavelength detector tensor
/// `d = (x̂⊗x̂ − ŷ⊗ŷ) / 2`.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorGeometry {
    pub vertex: Vector3<f64>,
    pub x_arm: Vector3<f64>,
    pub y_arm: Vector3<f64>,
    pub tensor: Matrix3<f64>,
}

impl DetectorGeometry {
    /// Builds the geometry from geodetic coordinates and arm azimuths.
    ///
    /// Latitude, longitude, azimuths and tilts are in degrees; azimuths
    /// are measured clockwise from local North, tilts upward from the
    /// local tangent plane.
    pub fn from_geodetic(
        latitude_deg: f64,
        longitude_deg: f64,
        elevation_m: f64,
        x_azimuth_deg: f64,
        y_azimuth_deg: f64,
        x_tilt_deg: f64,
        y_tilt_deg: f64,
    ) -> Self {
        let lat = latitude_deg.to_radians();
        let lon = longitude_deg.to_radians();
        let vertex = vertex_from_geodetic(lat, lon, elevation_m);
        let x_arm = arm_direction(lat, lon, x_azimuth_deg.to_radians(), x_tilt_deg.to_radians());
        let y_arm = arm_direction(lat, lon, y_azimuth_deg.to_radians(), y_tilt_deg.to_radians());
        Self::from_arms(vertex, x_arm, y_arm)
    }

    /// Builds the geometry directly from a vertex and two unit arm
    /// directions.
    pub fn from_arms(vertex: Vector3<f64>, x_arm: Vector3<f64>, y_arm: Vector3<f64>) -> Self {
        let tensor = (x_arm * x_arm.transpose() - y_arm * y_arm.transpose()) * 0.5;
        Self {
            vertex,
            x_arm,
            y_arm,
            tensor,
        }
    }
}

/// Geocentric position for geodetic coordinates in radians.
///
/// Uses the ellipsoidal radius `a² / √(a²cos²φ + b²sin²φ)`, with the
/// elevation added along the local radial direction.
fn vertex_from_geodetic(lat: f64, lon: f64, elevation_m: f64) -> Vector3<f64> {
    let radius = WGS84_A * WGS84_A
        / (WGS84_A * WGS84_A * lat.cos() * lat.cos() + WGS84_B * WGS84_B * lat.sin() * lat.sin())
            .sqrt();
    Vector3::new(
        (radius + elevation_m) * lat.cos() * lon.cos(),
        (radius + elevation_m) * lat.cos() * lon.sin(),
        ((WGS84_B / WGS84_A).powi(2) * radius + elevation_m) * lat.sin(),
    )
}

/// Unit vector along an arm given site coordinates, azimuth clockwise
/// from North and upward tilt, all in radians.
fn arm_direction(lat: f64, lon: f64, azimuth: f64, tilt: f64) -> Vector3<f64> {
    let east = Vector3::new(-lon.sin(), lon.cos(), 0.0);
    let north = Vector3::new(
        -lat.sin() * lon.cos(),
        -lat.sin() * lon.sin(),
        lat.cos(),
    );
    let up = Vector3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin());
    (east * azimuth.sin() + north * azimuth.cos()) * tilt.cos() + up * tilt.sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equator_vertex_lies_on_semi_major_axis() {
        let geo = DetectorGeometry::from_geodetic(0.0, 0.0, 0.0, 0.0, 90.0, 0.0, 0.0);
        assert!((geo.vertex.x - WGS84_A).abs() < 1e-6);
        assert!(geo.vertex.y.abs() < 1e-6);
        assert!(geo.vertex.z.abs() < 1e-6);
    }

    #[test]
    fn test_polar_vertex_lies_on_semi_minor_axis() {
        let geo = DetectorGeometry::from_geodetic(90.0, 0.0, 0.0, 0.0, 90.0, 0.0, 0.0);
        assert!(geo.vertex.x.abs() < 1e-3);
        assert!((geo.vertex.z - WGS84_B).abs() < 1e-3);
    }

    #[test]
    fn test_elevation_extends_along_radial() {
        let sea = DetectorGeometry::from_geodetic(0.0, 0.0, 0.0, 0.0, 90.0, 0.0, 0.0);
        let high = DetectorGeometry::from_geodetic(0.0, 0.0, 250.0, 0.0, 90.0, 0.0, 0.0);
        assert!(((high.vertex - sea.vertex).norm() - 250.0).abs() < 1e-6);
    }

    #[test]
    fn test_arm_directions_are_unit_vectors() {
        let geo = DetectorGeometry::from_geodetic(40.0, 9.0, 120.0, 30.0, 90.0, 0.3, 0.0);
        assert!((geo.x_arm.norm() - 1.0).abs() < 1e-12);
        assert!((geo.y_arm.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_equator_arms_point_north_and_east() {
        // At (0°, 0°): North is +z, East is +y.
        let geo = DetectorGeometry::from_geodetic(0.0, 0.0, 0.0, 0.0, 90.0, 0.0, 0.0);
        assert!((geo.x_arm - Vector3::z()).norm() < 1e-12);
        assert!((geo.y_arm - Vector3::y()).norm() < 1e-12);
    }

    #[test]
    fn test_detector_tensor_is_symmetric_and_traceless() {
        let geo = DetectorGeometry::from_geodetic(40.0, 9.0, 0.0, 20.0, 80.0, 0.0, 0.0);
        let t = &geo.tensor;
        assert!((t.trace()).abs() < 1e-15);
        assert!((t - t.transpose()).norm() < 1e-15);
    }

    #[test]
    fn test_perpendicular_equator_arms_tensor() {
        // Arms along global z (North) and y (East) give a diagonal
        // tensor with entries 0, -1/2, 1/2.
        let geo = DetectorGeometry::from_geodetic(0.0, 0.0, 0.0, 0.0, 90.0, 0.0, 0.0);
        assert!((geo.tensor[(2, 2)] - 0.5).abs() < 1e-12);
        assert!((geo.tensor[(1, 1)] + 0.5).abs() < 1e-12);
        assert!(geo.tensor[(0, 0)].abs() < 1e-12);
    }

    #[test]
    fn test_tilt_lifts_arm_out_of_tangent_plane() {
        let geo = DetectorGeometry::from_geodetic(0.0, 0.0, 0.0, 0.0, 90.0, 30.0, 0.0);
        // Up at (0°, 0°) is +x.
        assert!((geo.x_arm.x - 30.0_f64.to_radians().sin()).abs() < 1e-12);
    }
}
