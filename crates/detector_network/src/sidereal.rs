//! GPS time to Greenwich mean sidereal time.

use std::f64::consts::PI;

/// GPS epoch 1980-01-06T00:00:00Z as a Unix timestamp.
const GPS_EPOCH_UNIX: f64 = 315_964_800.0;
/// GPS − UTC offset in seconds; constant since the 2017 leap second, so
/// timestamps before that are off by the missed leap steps.
const GPS_UTC_OFFSET: f64 = 18.0;
/// Unix epoch as a Julian date.
const UNIX_EPOCH_JD: f64 = 2_440_587.5;
/// J2000.0 epoch as a Julian date.
const J2000_JD: f64 = 2_451_545.0;

/// Greenwich mean sidereal time in radians for a GPS timestamp.
///
/// IAU 1982 polynomial evaluated in Julian centuries of UT from J2000,
/// folded into `[0, 2π)`. UT1 is approximated by UTC, which is well
/// inside the accuracy needed for antenna patterns.
pub fn gmst_rad(gps_seconds: f64) -> f64 {
    let unix = gps_seconds + GPS_EPOCH_UNIX - GPS_UTC_OFFSET;
    let jd = unix / 86_400.0 + UNIX_EPOCH_JD;
    let centuries = (jd - J2000_JD) / 36_525.0;
    let gmst_seconds = 67_310.548_41
        + 3_164_400_184.812_866 * centuries
        + 0.093_104 * centuries * centuries
        - 6.2e-6 * centuries * centuries * centuries;
    (gmst_seconds * PI / 43_200.0).rem_euclid(2.0 * PI)
}
