/// A 2D vector in screen space (pixels, y pointing down).
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

/// Screen-space point in pixels. Never cached across frames.
pub type ScreenPoint = Vec2;

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Linear interpolation: `self + (other - self) * t`.
    ///
    /// `t` is not clamped; callers pass progress values already in `[0, 1]`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl std::ops::Mul<f64> for Vec2 {
    type Output = Self;

    fn mul(self, s: f64) -> Self::Output {
        Self::new(self.x * s, self.y * s)
    }
}

/// Scalar linear interpolation.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::{Vec2, lerp};

    #[test]
    fn screen_offsets_compose() {
        let head = Vec2::new(120.0, 48.0);
        let jitter = Vec2::new(-3.0, 2.5);
        assert_eq!(head + jitter, Vec2::new(117.0, 50.5));
        assert_eq!(head - jitter, Vec2::new(123.0, 45.5));
        assert_eq!(jitter * 2.0, Vec2::new(-6.0, 5.0));
    }

    #[test]
    fn lerp_hits_endpoints_and_midpoint() {
        let from = Vec2::new(10.0, 20.0);
        let to = Vec2::new(30.0, -20.0);
        assert_eq!(from.lerp(to, 0.0), from);
        assert_eq!(from.lerp(to, 1.0), to);
        assert_eq!(from.lerp(to, 0.5), Vec2::new(20.0, 0.0));
        assert_eq!(lerp(8.0, 26.0, 0.5), 17.0);
    }
}
