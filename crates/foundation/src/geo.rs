/// Geographic coordinate in degrees, `[longitude, latitude]` order as in GeoJSON.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct LonLat {
    pub lon_deg: f64,
    pub lat_deg: f64,
}

impl LonLat {
    pub const fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self { lon_deg, lat_deg }
    }

    pub fn to_array(self) -> [f64; 2] {
        [self.lon_deg, self.lat_deg]
    }

    pub fn is_finite(self) -> bool {
        self.lon_deg.is_finite() && self.lat_deg.is_finite()
    }
}

impl From<[f64; 2]> for LonLat {
    fn from(v: [f64; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

impl From<LonLat> for [f64; 2] {
    fn from(p: LonLat) -> Self {
        p.to_array()
    }
}

/// Arithmetic mean of the given vertices.
///
/// Every vertex counts once, including a closing vertex that repeats the
/// first one. This is not an area-weighted polygon centroid.
pub fn vertex_mean(vertices: &[LonLat]) -> Option<LonLat> {
    if vertices.is_empty() {
        return None;
    }
    let (sum_lon, sum_lat) = vertices
        .iter()
        .fold((0.0, 0.0), |(x, y), p| (x + p.lon_deg, y + p.lat_deg));
    let n = vertices.len() as f64;
    Some(LonLat::new(sum_lon / n, sum_lat / n))
}

#[cfg(test)]
mod tests {
    use super::{LonLat, vertex_mean};

    #[test]
    fn mean_of_empty_ring_is_none() {
        assert_eq!(vertex_mean(&[]), None);
    }

    #[test]
    fn mean_counts_closing_vertex() {
        let ring = [
            LonLat::new(0.0, 0.0),
            LonLat::new(4.0, 0.0),
            LonLat::new(4.0, 4.0),
            LonLat::new(0.0, 0.0),
        ];
        assert_eq!(vertex_mean(&ring), Some(LonLat::new(2.0, 1.0)));
    }

    #[test]
    fn mean_is_order_independent() {
        let a = [
            LonLat::new(1.0, 2.0),
            LonLat::new(5.0, -1.0),
            LonLat::new(3.0, 8.0),
        ];
        let b = [a[2], a[0], a[1]];
        assert_eq!(vertex_mean(&a), vertex_mean(&b));
    }

    #[test]
    fn array_conversions() {
        let p = LonLat::from([69.52, 40.898]);
        assert_eq!(p.lon_deg, 69.52);
        assert_eq!(<[f64; 2]>::from(p), [69.52, 40.898]);
    }
}
