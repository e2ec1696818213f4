//! Geographic -> screen projection.
//!
//! The map owns the camera, so a projected point is only valid for the frame
//! it was computed in. Off-screen coordinates project outside the viewport
//! (negative or larger than the size); nothing here clamps.

use foundation::{
    LonLat, MERCATOR_WORLD_WIDTH_M, ScreenPoint, mercator_x_m, mercator_y_m,
};

/// Projects a geographic coordinate with the camera state current at call time.
pub trait Projector {
    fn project(&self, coord: LonLat) -> ScreenPoint;
}

impl<P: Projector + ?Sized> Projector for &P {
    fn project(&self, coord: LonLat) -> ScreenPoint {
        (**self).project(coord)
    }
}

/// Pixel size of a drawing surface or viewport.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Flat Web-Mercator camera using the tile-pyramid zoom convention
/// (the world is `512 * 2^zoom` pixels wide).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera2D {
    pub center: LonLat,
    pub zoom: f64,
}

/// World width in pixels at zoom 0.
const WORLD_PX_AT_ZOOM_0: f64 = 512.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MercatorProjector {
    center_x_m: f64,
    center_y_m: f64,
    scale_px_per_m: f64,
    viewport: SurfaceSize,
}

impl MercatorProjector {
    pub fn new(camera: Camera2D, viewport: SurfaceSize) -> Self {
        let world_px = WORLD_PX_AT_ZOOM_0 * camera.zoom.exp2();
        Self {
            center_x_m: mercator_x_m(camera.center.lon_deg),
            center_y_m: mercator_y_m(camera.center.lat_deg),
            scale_px_per_m: (world_px / MERCATOR_WORLD_WIDTH_M).max(1e-12),
            viewport,
        }
    }

    pub fn viewport(&self) -> SurfaceSize {
        self.viewport
    }
}

impl Projector for MercatorProjector {
    fn project(&self, coord: LonLat) -> ScreenPoint {
        let ww = MERCATOR_WORLD_WIDTH_M;
        // Shortest way round the antimeridian.
        let dx = (mercator_x_m(coord.lon_deg) - self.center_x_m + 0.5 * ww).rem_euclid(ww)
            - 0.5 * ww;
        let dy = mercator_y_m(coord.lat_deg) - self.center_y_m;
        ScreenPoint::new(
            self.viewport.width as f64 * 0.5 + dx * self.scale_px_per_m,
            self.viewport.height as f64 * 0.5 - dy * self.scale_px_per_m,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Camera2D, MercatorProjector, Projector, SurfaceSize};
    use foundation::{LonLat, ScreenPoint};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn projector(center: LonLat, zoom: f64) -> MercatorProjector {
        MercatorProjector::new(Camera2D { center, zoom }, SurfaceSize::new(800, 600))
    }

    #[test]
    fn camera_center_projects_to_viewport_center() {
        let center = LonLat::new(69.52, 40.898);
        let p = projector(center, 13.0).project(center);
        assert_close(p.x, 400.0, 1e-6);
        assert_close(p.y, 300.0, 1e-6);
    }

    #[test]
    fn same_coordinate_moves_when_camera_moves() {
        let coord = LonLat::new(69.53, 40.90);
        let a = projector(LonLat::new(69.52, 40.898), 13.0).project(coord);
        let b = projector(LonLat::new(69.52, 40.898), 14.0).project(coord);
        let c = projector(LonLat::new(69.53, 40.90), 13.0).project(coord);
        assert_ne!(a, b);
        assert_close(c.x, 400.0, 1e-6);
        // East is right, north is up.
        assert!(a.x > 400.0);
        assert!(a.y < 300.0);
    }

    #[test]
    fn off_screen_points_are_not_clamped() {
        let p = projector(LonLat::new(0.0, 0.0), 10.0).project(LonLat::new(-10.0, -10.0));
        assert!(p.x < 0.0);
        assert!(p.y > 600.0);
    }

    #[test]
    fn zoom_doubles_pixel_distance() {
        let origin = LonLat::new(0.0, 0.0);
        let east = LonLat::new(0.01, 0.0);
        let d = |zoom: f64| {
            let pr = projector(origin, zoom);
            pr.project(east).x - pr.project(origin).x
        };
        assert_close(d(11.0), 2.0 * d(10.0), 1e-9);
        assert_eq!(
            projector(origin, 0.0).project(origin),
            ScreenPoint::new(400.0, 300.0)
        );
    }
}
