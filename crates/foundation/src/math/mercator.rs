/// WGS84 semi-major axis (meters), used as the Mercator sphere radius.
pub const WGS84_A: f64 = 6_378_137.0;

/// Latitude at which Web-Mercator becomes square.
pub const MERCATOR_MAX_LAT_DEG: f64 = 85.051_128_78;

/// Circumference of the Mercator world in meters.
pub const MERCATOR_WORLD_WIDTH_M: f64 = 2.0 * std::f64::consts::PI * WGS84_A;

pub fn mercator_x_m(lon_deg: f64) -> f64 {
    WGS84_A * lon_deg.to_radians()
}

pub fn mercator_y_m(lat_deg: f64) -> f64 {
    let lat = lat_deg
        .clamp(-MERCATOR_MAX_LAT_DEG, MERCATOR_MAX_LAT_DEG)
        .to_radians();
    WGS84_A * (0.5 * (std::f64::consts::FRAC_PI_2 + lat)).tan().ln()
}
